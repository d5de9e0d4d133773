//! Error types for mr-core

use thiserror::Error;

/// Core error type for Migrun
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Migration file not found
    #[error("[E001] Migration file not found: {path}")]
    MigrationNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config {path}: {message}")]
    ConfigParseError { path: String, message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Unknown target name
    #[error("[E004] Target '{name}' not found in config. Available targets: {available}")]
    TargetNotFound { name: String, available: String },

    /// E005: IO error with file path context
    #[error("[E005] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

impl CoreError {
    /// Whether this error means the migration file is absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::MigrationNotFound { .. })
    }
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
