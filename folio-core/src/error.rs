//! Error types for folio-core.

use thiserror::Error;

/// Result type alias using folio-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for folio operations
#[derive(Error, Debug)]
pub enum Error {
    // Transport errors
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    // Auth errors
    #[error("Not authenticated")]
    Unauthorized,

    // Backend errors
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a non-success API response
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Error::Other(format!("Failed to parse response: {}", e))
        } else {
            Error::Http(e.to_string())
        }
    }
}
