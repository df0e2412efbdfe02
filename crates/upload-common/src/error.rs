//! Common error types for the upload front-end.

use thiserror::Error;

/// Errors shared across components
#[derive(Debug, Error)]
pub enum UploadError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input (unknown mode label, malformed field, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    /// Process exit code for this error when it ends a binary
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 78,
            Self::InvalidInput(_) => 64,
            Self::Io(_) => 74,
        }
    }
}
