use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use pme2go_core::error::CoreError;
use pme2go_db::db::Storage;

pub struct StorageHandler {
    pub storage: Arc<dyn Storage>,
}

#[async_trait]
impl salvo::Handler for StorageHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.storage));
    }
}

/// ## Summary
/// Retrieves the storage from the depot.
///
/// ## Errors
/// Returns an error if no storage was injected into the depot.
pub fn get_storage_from_depot(depot: &salvo::Depot) -> AppResult<Arc<dyn Storage>> {
    depot
        .obtain::<Arc<dyn Storage>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Storage not found in depot").into())
}
