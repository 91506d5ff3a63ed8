//! Metadata extraction
//!
//! Turns every [`DownloadedFile`] into exactly one [`MetadataRecord`]. The
//! extension picks a text-extraction backend; the extracted text then runs
//! through the meeting-type and date detectors. No failure crosses this
//! boundary — an unreadable document still produces a record, with empty
//! text and the default classifications.
//!
//! As a side effect the extracted text is saved next to the source file
//! with a `.txt` extension, best-effort, for later inspection.

pub mod classify;
mod error;
mod html;
mod pdf;
mod word;

pub use classify::{MeetingKeywords, detect_meeting_date, detect_meeting_type};
pub use error::ExtractError;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::downloader::DownloadedFile;

/// One report line per downloaded document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Owning pension-fund name
    pub rpps: Option<String>,

    /// State code
    pub uf: Option<String>,

    /// Filename on disk
    pub file_name: String,

    /// Full path on disk
    pub file_path: String,

    /// Extension, dot included (e.g. ".pdf")
    pub formato: String,

    /// Direct URL the document came from
    pub file_url: Option<String>,

    /// Candidate page the link was found on
    pub source_page: Option<String>,

    /// Detected meeting type
    pub tipo_reuniao: String,

    /// Detected meeting date
    pub data_reuniao: String,
}

/// Extract a document's text, dispatching on its extension.
///
/// Unknown extensions and any backend failure degrade to an empty string.
pub fn extract_text(path: &Path) -> String {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let result = match extension.as_str() {
        "pdf" => pdf::extract_text(path),
        "html" | "htm" => html::extract_text(path),
        "docx" => word::extract_docx_text(path),
        "doc" => word::extract_doc_text(path),
        _ => Ok(String::new()),
    };

    match result {
        Ok(text) => text,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "text extraction failed");
            String::new()
        }
    }
}

/// Build one [`MetadataRecord`] per downloaded file.
pub fn extract_metadata_from_files(
    files: &[DownloadedFile],
    keywords: &MeetingKeywords,
) -> Vec<MetadataRecord> {
    let mut records = Vec::with_capacity(files.len());

    for entry in files {
        let path = &entry.file_path;
        let text = extract_text(path);

        let tipo_reuniao = detect_meeting_type(&text, keywords);
        let data_reuniao = detect_meeting_date(&text);

        // Keep the extracted text next to the source file for inspection
        let txt_path = path.with_extension("txt");
        if let Err(e) = std::fs::write(&txt_path, &text) {
            warn!(file = %txt_path.display(), error = %e, "could not save extracted text");
        } else {
            debug!(file = %txt_path.display(), "saved extracted text");
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        records.push(MetadataRecord {
            rpps: Some(entry.rpps.clone()),
            uf: Some(entry.uf.clone()),
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            file_path: path.display().to_string(),
            formato: if extension.is_empty() {
                String::new()
            } else {
                format!(".{extension}")
            },
            file_url: Some(entry.file_url.clone()),
            source_page: Some(entry.source_page.clone()),
            tipo_reuniao,
            data_reuniao,
        });
    }

    records
}
