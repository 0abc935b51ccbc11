use crate::error::DbResult;
use std::future::Future;
use std::pin::Pin;

pub mod connection;
pub mod query;

/// Source of database connections handed to request handlers.
///
/// Chosen once at startup: [`connection::LiveStorage`] when the pool could be
/// built, [`connection::UnavailableStorage`] when running degraded.
pub trait Storage: Send + Sync {
    fn get_connection<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = DbResult<connection::DbConnection<'a>>> + Send + 'a>>;

    /// Whether connections can be expected from this storage at all.
    fn is_available(&self) -> bool {
        true
    }
}
