use salvo::{Depot, Response, Router, handler, writing::Json};
use serde::Serialize;

use crate::storage_handler::get_storage_from_depot;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    storage: &'static str,
}

#[handler]
async fn healthcheck(depot: &mut Depot, res: &mut Response) {
    let storage = get_storage_from_depot(depot).map_or("missing", |storage| {
        if storage.is_available() {
            "available"
        } else {
            "unavailable"
        }
    });

    res.render(Json(HealthResponse {
        status: "ok",
        storage,
    }));
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("healthcheck").get(healthcheck)
}
