//! Errors raised while talking to the upload API.

use thiserror::Error;

/// Failure of a single upload, cleanup, or health call
#[derive(Debug, Error)]
pub enum FlowError {
    /// Network or transport failure (connect, timeout, broken body)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a body that is not JSON
    #[error("Response (HTTP {status}) is not valid JSON: {source}")]
    InvalidJson {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// A file part could not be read
    #[error("Failed to read form file {path}: {source}")]
    Payload {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A file part carries a content type that is not a MIME type
    #[error("Invalid content type {mime:?} for form part {name}")]
    InvalidPart {
        name: String,
        mime: String,
        #[source]
        source: reqwest::Error,
    },

    /// The verification widget could not be rendered
    #[error("Widget error: {0}")]
    Widget(String),
}

impl FlowError {
    /// Whether the request ran out of time
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Every call is a single attempt; nothing is retried
    pub fn is_retryable(&self) -> bool {
        false
    }
}
