//! Error types for the coleta-atas crate

use thiserror::Error;

/// Result type for collector operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for collector operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Page fetch error (rendered or raw)
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Text extraction error
    #[error("Extraction error: {0}")]
    Extract(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
