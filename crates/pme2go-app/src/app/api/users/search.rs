use salvo::{Depot, Request, Response, Router, handler};

use crate::app::api::search::respond_with_search;
use pme2go_db::db::query::search::catalog::USER_DIRECTORY;
use pme2go_db::model::user::DirectoryUser;

/// Identifies the searching member, who never appears in their own results.
const IDENTITY_PARAM: &str = "user_id";

/// ## Summary
/// GET /api/users/search - Directory search across member profiles
///
/// Supports free text (`q`, or its alias `search`), the directory filters
/// (`company`, `skills`, `availability`, `industry`, `location`,
/// `user_type`), `sort_by`, `sort_order`, `page` and `limit`.
///
/// ## Errors
/// Returns HTTP 400 if `user_id` is missing
/// Returns HTTP 503 if the database is unavailable
/// Returns HTTP 500 if the search fails
#[handler]
async fn search_users(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    tracing::debug!("Processing user directory search");

    respond_with_search::<DirectoryUser>(req, depot, res, &USER_DIRECTORY, IDENTITY_PARAM).await;
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("search").get(search_users)
}
