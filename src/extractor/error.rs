//! Error types for text extraction

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for per-document extraction backends.
///
/// These never escape the extractor: every failure is logged and degraded
/// to empty text at the dispatch boundary.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// PDF parsing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// DOCX container error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// DOCX XML error
    #[error("XML error: {0}")]
    Xml(String),
}

impl From<ExtractError> for CrateError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Io(e) => CrateError::Io(e),
            _ => CrateError::Extract(err.to_string()),
        }
    }
}
