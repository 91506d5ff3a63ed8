//! Document downloading
//!
//! For each candidate page the downloader enumerates direct document links
//! (by extension, minus the blacklist), then fetches each document with the
//! retrying [`HttpFetcher`]. Two dedup layers apply inside one run: a
//! name-based pre-existence check against the destination directory, and a
//! SHA-256 content digest so the same bytes reached through two different
//! URLs are written only once. Files are never overwritten.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::{debug, info, warn};
use url::Url;

use crate::discovery::{absolutize, anchors};
use crate::fetch::HttpFetcher;
use crate::rules::LinkRules;
use crate::site::Site;

/// One document written to disk during this run
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    /// Where the bytes landed
    pub file_path: PathBuf,

    /// Candidate page the link was found on
    pub source_page: String,

    /// Direct URL of the document
    pub file_url: String,

    /// Owning site name
    pub rpps: String,

    /// Owning site state code
    pub uf: String,
}

/// Strip characters that are unsafe in a filename.
///
/// Keeps alphanumerics, spaces, dots, underscores and hyphens; trailing
/// whitespace is trimmed.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-'))
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Last path segment of a document URL, sanitized for the filesystem.
fn filename_from_url(url: &Url) -> String {
    let name = url
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or_default();
    sanitize_filename(name)
}

/// Enumerate direct document links on a page, de-duplicated in order.
pub fn document_links(html: &str, page_url: &Url, rules: &LinkRules) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in anchors(html) {
        if rules.is_blacklisted(&anchor.href) {
            debug!(href = %anchor.href, "dropped blacklisted document link");
            continue;
        }
        if rules.is_document_link(&anchor.href) {
            if let Some(absolute) = absolutize(page_url, &anchor.href) {
                if seen.insert(absolute.clone()) {
                    links.push(absolute);
                }
            }
        }
    }

    links
}

/// Download every unique document reachable from `page_links` into `out_dir`.
///
/// Nothing here is fatal: unfetchable pages and documents are logged and
/// skipped, and the returned records cover exactly the files written.
pub async fn download_files(
    fetcher: &HttpFetcher,
    page_links: &[String],
    out_dir: &Path,
    site: &Site,
    rules: &LinkRules,
) -> Vec<DownloadedFile> {
    if let Err(e) = fs::create_dir_all(out_dir).await {
        warn!(dir = %out_dir.display(), error = %e, "could not create output directory");
        return Vec::new();
    }

    let mut downloaded = Vec::new();
    let mut seen_hashes: HashSet<[u8; 32]> = HashSet::new();

    let progress = ProgressBar::new(page_links.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{msg} {bar:40} {pos}/{len}")
            .expect("valid progress template"),
    );
    progress.set_message("Baixando arquivos");

    for page_link in page_links {
        progress.inc(1);

        let page_url = match Url::parse(page_link) {
            Ok(url) => url,
            Err(e) => {
                warn!(page = %page_link, error = %e, "invalid candidate page URL");
                continue;
            }
        };

        let html = match fetcher.get_text(page_link).await {
            Ok(html) => html,
            Err(e) => {
                warn!(page = %page_link, error = %e, "skipping unfetchable page");
                continue;
            }
        };

        for doc_url in document_links(&html, &page_url, rules) {
            let parsed = match Url::parse(&doc_url) {
                Ok(url) => url,
                Err(e) => {
                    warn!(url = %doc_url, error = %e, "invalid document URL");
                    continue;
                }
            };

            let file_name = filename_from_url(&parsed);
            if file_name.is_empty() {
                warn!(url = %doc_url, "document URL yields no usable filename");
                continue;
            }
            let dest_path = out_dir.join(&file_name);

            // Name-based pre-existence check only; an on-disk file with the
            // same name is trusted without re-verification.
            match fs::try_exists(&dest_path).await {
                Ok(true) => {
                    debug!(file = %dest_path.display(), "already on disk, skipping");
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(file = %dest_path.display(), error = %e, "existence check failed");
                    continue;
                }
            }

            let bytes = match fetcher.get_bytes(&doc_url).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(url = %doc_url, error = %e, "skipping unfetchable document");
                    continue;
                }
            };

            let digest: [u8; 32] = Sha256::digest(&bytes).into();
            if !seen_hashes.insert(digest) {
                debug!(url = %doc_url, "duplicate content, skipping");
                continue;
            }

            if let Err(e) = fs::write(&dest_path, &bytes).await {
                warn!(file = %dest_path.display(), error = %e, "write failed");
                continue;
            }

            info!(file = %dest_path.display(), url = %doc_url, "downloaded");
            downloaded.push(DownloadedFile {
                file_path: dest_path,
                source_page: page_link.clone(),
                file_url: doc_url,
                rpps: site.name.clone(),
                uf: site.uf.clone(),
            });
        }
    }

    progress.finish_and_clear();
    downloaded
}
