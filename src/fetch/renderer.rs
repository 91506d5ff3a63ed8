//! Headless rendering via the spider crawler
//!
//! Several RPPS portals are ASP.NET applications that only emit their link
//! lists after client-side scripts run, so discovery cannot rely on the raw
//! response body. [`SpiderRenderer`] drives spider's headless Chrome
//! integration at depth 0 / limit 1 and hands back the rendered HTML of the
//! single page after a fixed settle delay.

use std::time::Duration;

use spider::configuration::WaitForDelay;
use spider::website::Website;
use tracing::{debug, info};

use super::{FetchError, RenderHtml};

/// Fixed settle delay applied after navigation before the HTML is read
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(3);

/// Rendered-page fetcher backed by spider's Chrome integration
#[derive(Debug, Clone)]
pub struct SpiderRenderer {
    settle: Duration,
}

impl Default for SpiderRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE)
    }
}

impl SpiderRenderer {
    pub fn new(settle: Duration) -> Self {
        Self { settle }
    }
}

impl RenderHtml for SpiderRenderer {
    async fn rendered_html(&self, url: &str) -> Result<String, FetchError> {
        info!(url, "rendering page");

        let mut website = Website::new(url);
        website
            .configuration
            .with_respect_robots_txt(false)
            .with_depth(0)
            .with_limit(1)
            .with_wait_for_delay(Some(WaitForDelay::new(Some(self.settle))));

        let mut rx = website.subscribe(1);

        let handle = tokio::spawn(async move {
            let mut html: Option<String> = None;
            while let Ok(page) = rx.recv().await {
                debug!(url = %page.get_url(), "received rendered page");
                if html.is_none() {
                    html = Some(page.get_html());
                }
            }
            html
        });

        website.crawl().await;
        website.unsubscribe();

        let html = handle
            .await
            .map_err(|e| FetchError::Render(format!("render task join error: {e}")))?;
        html.ok_or_else(|| FetchError::Render(format!("no page rendered for {url}")))
    }
}
