use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    DatabaseError(#[from] pme2go_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] pme2go_core::error::CoreError),
}

impl AppError {
    /// Whether the request failed only because storage could not hand out a
    /// connection.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        match self {
            Self::DatabaseError(e) => e.is_unavailable(),
            Self::CoreError(_) => false,
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
