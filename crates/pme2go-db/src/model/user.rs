use chrono::{DateTime, Utc};
use diesel::QueryableByName;
use diesel::sql_types::{Jsonb, Nullable, Text, Timestamptz};
use serde::Serialize;

/// A row of the member-facing directory search.
///
/// Field set matches [`crate::db::query::search::catalog::USER_DIRECTORY`]'s
/// select list.
#[derive(Debug, Clone, QueryableByName, Serialize)]
pub struct DirectoryUser {
    #[diesel(sql_type = Text)]
    pub id: String,
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub company: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub position: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub bio: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub location: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub industry: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub availability: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub user_type: Option<String>,
    #[diesel(sql_type = Jsonb)]
    pub skills: serde_json::Value,
    #[diesel(sql_type = Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// A row of the administrative user listing.
///
/// Field set matches [`crate::db::query::search::catalog::ADMIN_USERS`]'s
/// select list.
#[derive(Debug, Clone, QueryableByName, Serialize)]
pub struct AdminUser {
    #[diesel(sql_type = Text)]
    pub id: String,
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = Text)]
    pub email: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub company: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub user_type: Option<String>,
    #[diesel(sql_type = Text)]
    pub status: String,
    #[diesel(sql_type = Text)]
    pub role: String,
    #[diesel(sql_type = Timestamptz)]
    pub created_at: DateTime<Utc>,
    #[diesel(sql_type = Nullable<Timestamptz>)]
    pub last_login_at: Option<DateTime<Utc>>,
}
