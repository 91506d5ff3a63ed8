//! PDF text extraction

use std::path::Path;

use lopdf::Document;
use tracing::debug;

use super::ExtractError;

/// Extract text page by page, joined with newlines.
///
/// A page that yields no text contributes an empty string instead of
/// aborting the document; scanned pages are common in these archives.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let document = Document::load(path)?;
    let mut text = String::new();

    for (page_number, _) in document.get_pages() {
        let page_text = document.extract_text(&[page_number]).unwrap_or_else(|e| {
            debug!(file = %path.display(), page = page_number, error = %e, "page yielded no text");
            String::new()
        });
        text.push_str(&page_text);
        text.push('\n');
    }

    Ok(text.trim().to_string())
}
