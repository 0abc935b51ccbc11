use thiserror::Error;

/// Database layer errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),

    #[error("Pool error: {0}")]
    PoolError(#[from] diesel_async::pooled_connection::bb8::RunError),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    CoreError(#[from] pme2go_core::error::CoreError),
}

impl DbError {
    /// Returns whether the error means no connection could be obtained at all,
    /// as opposed to a failure while running a statement.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::PoolError(_))
    }
}

pub type DbResult<T> = std::result::Result<T, DbError>;
