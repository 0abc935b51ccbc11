//! Shared plumbing for the search endpoints.

mod params;

pub use params::query_request_from_pairs;

use std::sync::Arc;

use diesel::QueryableByName;
use diesel::pg::Pg;
use salvo::{Depot, Request, Response, http::StatusCode, writing::Json};
use serde::Serialize;
use tracing::error;

use crate::error::{AppError, AppResult};
use crate::storage_handler::get_storage_from_depot;
use pme2go_db::db::Storage;
use pme2go_db::db::query::search::{QueryResult, SearchPage, SearchSchema, execute_search};

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// ## Summary
/// Search response payload
#[derive(Debug, Serialize)]
pub struct SearchResponse<R> {
    pub users: Vec<R>,
    pub pagination: Pagination,
}

impl<R> From<SearchPage<R>> for SearchResponse<R> {
    fn from(page: SearchPage<R>) -> Self {
        let pagination = Pagination {
            page: page.page,
            limit: page.limit,
            total: page.total,
            total_pages: page.total_pages(),
        };
        Self {
            users: page.rows,
            pagination,
        }
    }
}

fn render_error(res: &mut Response, status: StatusCode, message: impl Into<String>) {
    res.status_code(status);
    res.render(Json(ErrorResponse {
        error: message.into(),
    }));
}

/// ## Summary
/// Parses the query string, runs the search described by `schema` and renders
/// the page as JSON.
///
/// Responds 400 when `identity_param` is missing, 503 when storage cannot hand
/// out connections and 500 on any other failure. Failure responses never
/// include query text.
pub async fn respond_with_search<R>(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    schema: &SearchSchema,
    identity_param: &str,
) where
    R: QueryableByName<Pg> + Serialize + Send + 'static,
{
    let pairs = req.queries().iter_all().flat_map(|(key, values)| {
        values
            .iter()
            .map(move |value| (key.as_str(), value.as_str()))
    });

    let request = match query_request_from_pairs(pairs, schema, identity_param) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected search request");
            render_error(res, StatusCode::BAD_REQUEST, e.to_string());
            return;
        }
    };

    let query = schema.build(&request);

    let outcome = match get_storage_from_depot(depot) {
        Ok(storage) => run_search::<R>(storage, &query).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(page) => {
            res.render(Json(SearchResponse::from(page)));
        }
        Err(e) if e.is_unavailable() => {
            tracing::warn!(error = %e, table = schema.target.table, "Search storage unavailable");
            render_error(
                res,
                StatusCode::SERVICE_UNAVAILABLE,
                "Search is temporarily unavailable",
            );
        }
        Err(AppError::CoreError(e)) => {
            error!(error = ?e, "Failed to get storage");
            render_error(res, StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
        Err(e) => {
            error!(
                error = ?e,
                table = schema.target.table,
                page = query.page,
                filter_count = request.filters.len(),
                has_free_text = request.free_text.is_some(),
                "Search failed"
            );
            render_error(res, StatusCode::INTERNAL_SERVER_ERROR, "Search failed");
        }
    }
}

async fn run_search<R>(storage: Arc<dyn Storage>, query: &QueryResult) -> AppResult<SearchPage<R>>
where
    R: QueryableByName<Pg> + Send + 'static,
{
    Ok(execute_search::<R>(storage.as_ref(), query).await?)
}
