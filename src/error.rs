//! Danella API error types.

use thiserror::Error;

/// Errors returned by the Danella API client.
#[derive(Debug, Error)]
pub enum DanellaError {
    /// Authentication failed (401), including a failed token refresh.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Request rejected by validation (400).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Any other non-2xx response.
    #[error("Request failed with status {status}: {body}")]
    Request {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// No response received (connectivity, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local file I/O failed, e.g. writing the token cache.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Client configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DanellaError {
    /// Create an authentication error.
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status code associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication(_) => Some(401),
            Self::NotFound(_) => Some(404),
            Self::Validation(_) => Some(400),
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for Danella API operations.
pub type DanellaResult<T> = Result<T, DanellaError>;
