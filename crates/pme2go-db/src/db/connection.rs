use std::sync::Arc;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use pme2go_core::config::DatabaseConfig;

use crate::db::Storage;
use crate::error::{DbError, DbResult};

pub type DbPool = Pool<AsyncPgConnection>;
pub type DbConnection<'pool> = PooledConnection<'pool, AsyncPgConnection>;

/// ## Summary
/// Creates a new database connection pool.
///
/// The pool is only returned once its minimum number of idle connections has
/// been established, so an unreachable database surfaces here.
///
/// ## Errors
/// Returns an error if the pool cannot be created with the provided database URL.
#[tracing::instrument(skip(database_url), fields(pool_size = size))]
pub async fn create_pool(database_url: &str, size: u32) -> anyhow::Result<DbPool> {
    tracing::debug!("Creating database connection pool");

    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);

    let pool = Pool::builder()
        .max_size(size)
        .min_idle(Some(size))
        .test_on_check_out(false)
        .idle_timeout(None)
        .max_lifetime(None)
        .build(config)
        .await?;

    tracing::info!(
        pool_size = size,
        "Database connection pool created successfully"
    );

    Ok(pool)
}

/// Pooled Postgres storage.
#[derive(Clone)]
pub struct LiveStorage {
    pool: DbPool,
}

impl LiveStorage {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl Storage for LiveStorage {
    #[tracing::instrument(skip(self))]
    fn get_connection<'a>(
        &'a self,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = DbResult<DbConnection<'a>>> + Send + 'a>>
    {
        Box::pin(async move {
            let conn = self.pool.get().await?;
            Ok(conn)
        })
    }
}

/// Storage used when the database could not be reached at startup.
///
/// Every connection request fails with [`DbError::Unavailable`].
#[derive(Debug, Clone)]
pub struct UnavailableStorage {
    reason: String,
}

impl UnavailableStorage {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Storage for UnavailableStorage {
    fn get_connection<'a>(
        &'a self,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = DbResult<DbConnection<'a>>> + Send + 'a>>
    {
        let reason = self.reason.clone();
        Box::pin(async move { Err(DbError::Unavailable(reason)) })
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// ## Summary
/// Builds the process-wide storage from configuration.
///
/// When the pool cannot be created and `allow_unavailable` is set, the server
/// starts with [`UnavailableStorage`] instead of exiting.
///
/// ## Errors
/// Returns the pool creation error when degraded startup is not allowed.
pub async fn select_storage(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn Storage>> {
    match create_pool(&config.url, u32::from(config.max_connections)).await {
        Ok(pool) => Ok(Arc::new(LiveStorage::new(pool))),
        Err(e) if config.allow_unavailable => {
            tracing::warn!(error = %e, "Database unreachable, starting with unavailable storage");
            Ok(Arc::new(UnavailableStorage::new(e.to_string())))
        }
        Err(e) => Err(e),
    }
}
