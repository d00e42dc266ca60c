use thiserror::Error;

/// Database layer errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),

    #[error("Pool error: {0}")]
    PoolError(#[from] diesel_async::pooled_connection::bb8::RunError),

    #[error("Invalid SQL identifier: {0:?}")]
    InvalidIdentifier(String),

    /// A unique index rejected the slug at write time. The caller may resolve
    /// a fresh slug and retry the insert.
    #[error("Slug conflict on column '{column}': {message}")]
    SlugConflict { column: String, message: String },

    #[error(transparent)]
    SlugError(#[from] slugline_core::error::SlugError),
}

impl DbError {
    /// Returns `true` if retrying the write with a freshly resolved slug may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::SlugConflict { .. })
    }
}

pub type DbResult<T> = std::result::Result<T, DbError>;
