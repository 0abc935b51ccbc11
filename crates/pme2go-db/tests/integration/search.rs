#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Directory and admin searches run end to end against Postgres.

use std::time::Duration;

use pme2go_db::db::query::search::catalog::{ADMIN_USERS, USER_DIRECTORY};
use pme2go_db::db::query::search::{QueryRequest, SearchPage, SortOrder, execute_search};
use pme2go_db::model::user::{AdminUser, DirectoryUser};

use super::helpers::{SeedUser, TestDb};

/// The caller is named like the best match so that self-exclusion is visible.
async fn seed_directory(db: &TestDb) {
    db.seed_users(&[
        SeedUser::new("u1", "Mari").skills(&["react"]),
        SeedUser::new("u2", "Mari")
            .company("Acme")
            .skills(&["react"])
            .availability("available")
            .updated_minutes_ago(30),
        SeedUser::new("u3", "Marianne")
            .skills(&["node"])
            .updated_minutes_ago(10),
        SeedUser::new("u4", "Bob")
            .company("Mari & Co")
            .skills(&["go"])
            .updated_minutes_ago(5),
        SeedUser::new("u5", "Zed")
            .skills(&["rust"])
            .updated_minutes_ago(1),
    ])
    .await
    .expect("Failed to seed users");
}

fn ids(page: &SearchPage<DirectoryUser>) -> Vec<&str> {
    page.rows.iter().map(|row| row.id.as_str()).collect()
}

#[test_log::test(tokio::test)]
async fn relevance_ranks_exact_then_substring_then_rest() {
    let Some(db) = TestDb::new("relevance").await.expect("Failed to create test database") else {
        return;
    };
    seed_directory(&db).await;
    let storage = db.storage(2).await.expect("Failed to build storage");

    let query = USER_DIRECTORY.build(&QueryRequest::new("u1").with_free_text("MARI"));
    let page = execute_search::<DirectoryUser>(&storage, &query)
        .await
        .expect("Search failed");

    // u2 equals the text, u3 contains it in its name, u4 only in its company
    assert_eq!(ids(&page), vec!["u2", "u3", "u4"]);
    assert_eq!(page.total, 3);
}

#[test_log::test(tokio::test)]
async fn skills_filter_matches_any_listed_skill() {
    let Some(db) = TestDb::new("skills_any").await.expect("Failed to create test database") else {
        return;
    };
    seed_directory(&db).await;
    let storage = db.storage(2).await.expect("Failed to build storage");

    let query = USER_DIRECTORY
        .build(&QueryRequest::new("u1").with_filter("skills", vec!["react", "node"]));
    let page = execute_search::<DirectoryUser>(&storage, &query)
        .await
        .expect("Search failed");

    // u1 also lists react but is the caller; default order is most recent first
    assert_eq!(ids(&page), vec!["u3", "u2"]);
    assert_eq!(page.total, 2);
    assert_eq!(page.rows[1].skills, serde_json::json!(["react"]));
}

#[test_log::test(tokio::test)]
async fn caller_is_never_returned() {
    let Some(db) = TestDb::new("self_exclusion").await.expect("Failed to create test database")
    else {
        return;
    };
    seed_directory(&db).await;
    let storage = db.storage(2).await.expect("Failed to build storage");

    for caller in ["u1", "u2", "u5"] {
        let query = USER_DIRECTORY.build(&QueryRequest::new(caller).with_limit(50));
        let page = execute_search::<DirectoryUser>(&storage, &query)
            .await
            .expect("Search failed");

        assert!(!ids(&page).contains(&caller));
        assert_eq!(page.total, 4);
    }
}

#[test_log::test(tokio::test)]
async fn count_reports_all_matches_across_pages() {
    let Some(db) = TestDb::new("count_pages").await.expect("Failed to create test database") else {
        return;
    };
    seed_directory(&db).await;
    let storage = db.storage(2).await.expect("Failed to build storage");

    let query = USER_DIRECTORY.build(&QueryRequest::new("u1").with_page(2).with_limit(2));
    let page = execute_search::<DirectoryUser>(&storage, &query)
        .await
        .expect("Search failed");

    assert_eq!(ids(&page), vec!["u3", "u2"]);
    assert_eq!(page.total, 4);
    assert_eq!(page.total_pages(), 2);

    let combined = USER_DIRECTORY.build(
        &QueryRequest::new("u1")
            .with_filter("company", "acme")
            .with_filter("availability", "Available"),
    );
    let page = execute_search::<DirectoryUser>(&storage, &combined)
        .await
        .expect("Search failed");

    assert_eq!(ids(&page), vec!["u2"]);
    assert_eq!(page.total, 1);
}

#[test_log::test(tokio::test)]
async fn like_wildcards_in_text_match_literally() {
    let Some(db) = TestDb::new("like_escape").await.expect("Failed to create test database") else {
        return;
    };
    db.seed_users(&[
        SeedUser::new("u1", "Caller"),
        SeedUser::new("u2", "50% Growth").updated_minutes_ago(20),
        SeedUser::new("u3", "500 Club").updated_minutes_ago(10),
        SeedUser::new("u4", "Growth_Partners").updated_minutes_ago(5),
        SeedUser::new("u5", "Growth Partners"),
    ])
    .await
    .expect("Failed to seed users");
    let storage = db.storage(2).await.expect("Failed to build storage");

    let query = USER_DIRECTORY.build(&QueryRequest::new("u1").with_free_text("50%"));
    let page = execute_search::<DirectoryUser>(&storage, &query)
        .await
        .expect("Search failed");
    assert_eq!(ids(&page), vec!["u2"]);

    let query = USER_DIRECTORY.build(&QueryRequest::new("u1").with_free_text("growth_partners"));
    let page = execute_search::<DirectoryUser>(&storage, &query)
        .await
        .expect("Search failed");
    assert_eq!(ids(&page), vec!["u4"]);
}

#[test_log::test(tokio::test)]
async fn search_completes_with_single_connection_pool() {
    let Some(db) = TestDb::new("pool_of_one").await.expect("Failed to create test database") else {
        return;
    };
    seed_directory(&db).await;
    let storage = db.storage(1).await.expect("Failed to build storage");

    let query = USER_DIRECTORY.build(&QueryRequest::new("u1").with_free_text("mari"));
    let searches = futures::future::try_join_all(
        (0..4).map(|_| execute_search::<DirectoryUser>(&storage, &query)),
    );

    let pages = tokio::time::timeout(Duration::from_secs(10), searches)
        .await
        .expect("Searches stalled waiting for connections")
        .expect("Search failed");

    for page in pages {
        assert_eq!(page.total, 3);
    }
}

#[test_log::test(tokio::test)]
async fn admin_listing_maps_rows() {
    let Some(db) = TestDb::new("admin_listing").await.expect("Failed to create test database")
    else {
        return;
    };
    seed_directory(&db).await;
    let storage = db.storage(2).await.expect("Failed to build storage");

    let request = QueryRequest::new("u1")
        .with_filter("status", "ACTIVE")
        .with_sort("name", SortOrder::Asc);
    let page = execute_search::<AdminUser>(&storage, &ADMIN_USERS.build(&request))
        .await
        .expect("Listing failed");

    let names: Vec<&str> = page.rows.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["Bob", "Mari", "Marianne", "Zed"]);
    assert_eq!(page.total, 4);
    assert!(page.rows.iter().all(|row| row.status == "active"));
    assert!(page.rows.iter().all(|row| row.last_login_at.is_none()));
}
