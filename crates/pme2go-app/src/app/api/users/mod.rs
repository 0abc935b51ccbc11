use salvo::Router;

use pme2go_core::constants::USERS_ROUTE_COMPONENT;

mod search;

#[must_use]
pub fn routes() -> Router {
    Router::with_path(USERS_ROUTE_COMPONENT).push(search::routes())
}
