//! Error types for page fetching

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for rendered and raw fetches
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Headless rendering error
    #[error("Render error: {0}")]
    Render(String),

    /// Every retry attempt failed
    #[error("{url}: no response after {attempts} attempts")]
    Exhausted { url: String, attempts: u32 },
}

impl From<FetchError> for CrateError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Http(e) => CrateError::Http(e),
            _ => CrateError::Fetch(err.to_string()),
        }
    }
}
