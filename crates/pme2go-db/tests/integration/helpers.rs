#![allow(clippy::expect_used, dead_code)]
//! Test helpers for database-backed search tests.
//!
//! Each test owns a uniquely named database, recreated from scratch when the
//! test starts, so tests can run in parallel.

use diesel::sql_types::{Integer, Jsonb, Nullable, Text};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use pme2go_db::db::connection::{DbPool, LiveStorage, create_pool};

const USERS_DDL: &str = "CREATE TABLE users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    company TEXT,
    position TEXT,
    bio TEXT,
    location TEXT,
    industry TEXT,
    availability TEXT,
    user_type TEXT,
    skills JSONB NOT NULL DEFAULT '[]'::jsonb,
    status TEXT NOT NULL DEFAULT 'active',
    role TEXT NOT NULL DEFAULT 'member',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    last_login_at TIMESTAMPTZ
)";

/// Returns the server URL tests connect to, if one is configured.
pub fn base_database_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .map(|url| url.trim_end_matches('/').to_string())
}

/// A seeded row of the `users` table.
pub struct SeedUser<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub company: Option<&'a str>,
    pub skills: &'a [&'a str],
    pub availability: Option<&'a str>,
    /// How long ago the row was last updated.
    pub updated_minutes_ago: i32,
}

impl<'a> SeedUser<'a> {
    pub fn new(id: &'a str, name: &'a str) -> Self {
        Self {
            id,
            name,
            email: "someone@example.com",
            company: None,
            skills: &[],
            availability: None,
            updated_minutes_ago: 0,
        }
    }

    pub const fn company(mut self, company: &'a str) -> Self {
        self.company = Some(company);
        self
    }

    pub const fn skills(mut self, skills: &'a [&'a str]) -> Self {
        self.skills = skills;
        self
    }

    pub const fn availability(mut self, availability: &'a str) -> Self {
        self.availability = Some(availability);
        self
    }

    pub const fn updated_minutes_ago(mut self, minutes: i32) -> Self {
        self.updated_minutes_ago = minutes;
        self
    }
}

/// An isolated database holding only the `users` table.
pub struct TestDb {
    database_url: String,
}

impl TestDb {
    /// Recreates the database `pme2go_test_{name}` and creates the schema.
    ///
    /// Returns `None` when no test database server is configured.
    pub async fn new(name: &str) -> anyhow::Result<Option<Self>> {
        let Some(base_url) = base_database_url() else {
            tracing::warn!(test = name, "No test database configured, skipping");
            return Ok(None);
        };

        let db_name = format!("pme2go_test_{name}");
        let mut admin = AsyncPgConnection::establish(&format!("{base_url}/postgres")).await?;
        diesel::sql_query(format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
            .execute(&mut admin)
            .await?;
        diesel::sql_query(format!("CREATE DATABASE \"{db_name}\""))
            .execute(&mut admin)
            .await?;

        let database_url = format!("{base_url}/{db_name}");
        let mut conn = AsyncPgConnection::establish(&database_url).await?;
        diesel::sql_query(USERS_DDL).execute(&mut conn).await?;

        Ok(Some(Self { database_url }))
    }

    /// Builds pooled storage over this database with exactly `size` connections.
    pub async fn storage(&self, size: u32) -> anyhow::Result<LiveStorage> {
        Ok(LiveStorage::new(create_pool(&self.database_url, size).await?))
    }

    /// A small pool for seeding, independent of the storage under test.
    async fn seed_pool(&self) -> anyhow::Result<DbPool> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&self.database_url);
        Ok(Pool::builder().max_size(1).build(manager).await?)
    }

    pub async fn seed_users(&self, users: &[SeedUser<'_>]) -> anyhow::Result<()> {
        let pool = self.seed_pool().await?;
        let mut conn = pool.get().await?;

        for user in users {
            diesel::sql_query(
                "INSERT INTO users (id, name, email, company, skills, availability, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, now() - make_interval(mins => $7))",
            )
            .bind::<Text, _>(user.id)
            .bind::<Text, _>(user.name)
            .bind::<Text, _>(user.email)
            .bind::<Nullable<Text>, _>(user.company)
            .bind::<Jsonb, _>(serde_json::json!(user.skills))
            .bind::<Nullable<Text>, _>(user.availability)
            .bind::<Integer, _>(user.updated_minutes_ago)
            .execute(&mut conn)
            .await?;
        }

        Ok(())
    }
}
