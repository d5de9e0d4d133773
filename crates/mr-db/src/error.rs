//! Error types for mr-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Driver not compiled in (D003)
    #[error("[D003] No {backend} driver available: {reason}")]
    DriverUnavailable { backend: String, reason: String },

    /// Malformed or unsupported connection URL (D004)
    #[error("[D004] Invalid connection URL: {0}")]
    InvalidUrl(String),

    /// Mutex poisoned (D005)
    #[error("[D005] Database mutex poisoned: {0}")]
    MutexPoisoned(String),
}

impl DbError {
    /// The underlying message without the error code prefix
    pub fn detail(&self) -> String {
        match self {
            DbError::ConnectionError(msg)
            | DbError::ExecutionError(msg)
            | DbError::InvalidUrl(msg)
            | DbError::MutexPoisoned(msg) => msg.clone(),
            DbError::DriverUnavailable { reason, .. } => reason.clone(),
        }
    }

    /// Whether the connection is gone and further statements cannot run
    pub fn is_connection_lost(&self) -> bool {
        matches!(self, DbError::ConnectionError(_) | DbError::MutexPoisoned(_))
    }
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        DbError::ExecutionError(err.to_string())
    }
}
