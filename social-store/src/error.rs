use rusqlite::ErrorCode;
use social_types::FeedQueryError;
use thiserror::Error;

/// Errors returned by the store.
///
/// Callers are only expected to tell `NotFound` apart from everything else;
/// the remaining variants exist for logging and diagnostics.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No row matched a fetch, or a conditional update/delete touched zero rows
    #[error("resource not found")]
    NotFound,

    #[error("resource already exists")]
    Conflict,

    #[error("query exceeded its time limit")]
    Timeout,

    #[error("invalid feed query: {0}")]
    InvalidQuery(#[from] FeedQueryError),

    #[error("database error: {0}")]
    Database(rusqlite::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::OperationInterrupted) => {
                tracing::warn!("Query interrupted by deadline: {}", err);
                StoreError::Timeout
            }
            _ => StoreError::Database(err),
        }
    }
}

/// True when `err` is a UNIQUE or PRIMARY KEY violation
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == ErrorCode::ConstraintViolation
                && (e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
        }
        _ => false,
    }
}
