use salvo::Router;

use pme2go_core::constants::ADMIN_ROUTE_COMPONENT;

mod users;

#[must_use]
pub fn routes() -> Router {
    Router::with_path(ADMIN_ROUTE_COMPONENT).push(users::routes())
}
