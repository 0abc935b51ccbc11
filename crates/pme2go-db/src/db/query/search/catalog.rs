//! The two search catalogs over the `users` table.

use super::spec::{FilterSpec, SearchSchema, SearchTarget, SortSpec};

pub const AVAILABILITY_VALUES: &[&str] = &["available", "limited", "unavailable"];
pub const USER_TYPE_VALUES: &[&str] = &["business", "freelancer", "investor", "mentor"];
pub const ACCOUNT_STATUS_VALUES: &[&str] = &["active", "pending", "suspended"];
pub const ROLE_VALUES: &[&str] = &["member", "admin"];

/// Member-facing directory search.
pub const USER_DIRECTORY: SearchSchema = SearchSchema {
    target: SearchTarget {
        table: "users",
        select_list: "id::text AS id, name, company, position, bio, location, industry, \
                      availability, user_type, skills, updated_at",
        id_column: "id",
        free_text_columns: &["name", "email", "company", "position", "bio"],
        primary_text_column: "name",
        recency_column: "updated_at",
        default_sort_field: "updated_at",
    },
    filters: &[
        FilterSpec::substring("company", "company"),
        FilterSpec::contains_any("skills", "skills"),
        FilterSpec::one_of("availability", "availability", AVAILABILITY_VALUES),
        FilterSpec::exact("industry", "industry"),
        FilterSpec::substring("location", "location"),
        FilterSpec::one_of("user_type", "user_type", USER_TYPE_VALUES),
    ],
    sorts: &[
        SortSpec::new("name", "name"),
        SortSpec::new("company", "company"),
        SortSpec::new("created_at", "created_at"),
        SortSpec::new("updated_at", "updated_at"),
    ],
};

/// Administrative user listing.
pub const ADMIN_USERS: SearchSchema = SearchSchema {
    target: SearchTarget {
        table: "users",
        select_list: "id::text AS id, name, email, company, user_type, status, role, \
                      created_at, last_login_at",
        id_column: "id",
        free_text_columns: &["name", "email", "company"],
        primary_text_column: "name",
        recency_column: "created_at",
        default_sort_field: "created_at",
    },
    filters: &[
        FilterSpec::one_of("status", "status", ACCOUNT_STATUS_VALUES),
        FilterSpec::one_of("user_type", "user_type", USER_TYPE_VALUES),
        FilterSpec::one_of("role", "role", ROLE_VALUES),
        FilterSpec::contains_any("skills", "skills"),
    ],
    sorts: &[
        SortSpec::new("name", "name"),
        SortSpec::new("email", "email"),
        SortSpec::new("status", "status"),
        SortSpec::new("created_at", "created_at"),
        SortSpec::new("last_login_at", "last_login_at"),
    ],
};
