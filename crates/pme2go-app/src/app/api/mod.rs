mod admin;
mod app_specific;
pub mod search;
mod users;

use salvo::Router;

// Re-export route constants from core
pub use pme2go_core::constants::{
    ADMIN_ROUTE_COMPONENT, ADMIN_ROUTE_PREFIX, API_ROUTE_COMPONENT, API_ROUTE_PREFIX,
    USERS_ROUTE_COMPONENT, USERS_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the main API router.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(users::routes())
        .push(admin::routes())
}
