//! HTML text extraction
//!
//! Only visible text nodes count: scripts, styles and markup are excluded,
//! and the trimmed pieces are joined with single spaces.

use std::path::Path;

use scraper::{ElementRef, Html};

use super::ExtractError;

pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let content = std::fs::read(path)?;
    Ok(visible_text(&String::from_utf8_lossy(&content)))
}

/// Visible text of an HTML document.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts = Vec::new();
    collect_text(document.root_element(), &mut parts);
    parts.join(" ")
}

fn collect_text(element: ElementRef, parts: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if name != "script" && name != "style" {
                collect_text(child_element, parts);
            }
        }
    }
}
