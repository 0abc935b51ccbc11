use salvo::{Depot, Request, Response, Router, handler};

use crate::app::api::search::respond_with_search;
use pme2go_db::db::query::search::catalog::ADMIN_USERS;
use pme2go_db::model::user::AdminUser;

/// The administrator viewing the listing; excluded from it.
const IDENTITY_PARAM: &str = "admin_id";

/// ## Summary
/// GET /api/admin/users - Paginated user listing for the admin dashboard
///
/// Supports free text (`q`, or its alias `search`), `status`, `user_type`,
/// `role` and `skills` filters, `sort_by`, `sort_order`, `page` and `limit`.
///
/// ## Errors
/// Returns HTTP 400 if `admin_id` is missing
/// Returns HTTP 503 if the database is unavailable
/// Returns HTTP 500 if the listing query fails
#[handler]
async fn list_users(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    tracing::debug!("Processing admin user listing");

    respond_with_search::<AdminUser>(req, depot, res, &ADMIN_USERS, IDENTITY_PARAM).await;
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("users").get(list_users)
}
