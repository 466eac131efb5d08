//! Core error types

use thiserror::Error;

/// Core error type for Sigil
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration missing or unreadable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging subscriber could not be installed
    #[error("Logging error: {0}")]
    Logging(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
