//! Page fetching
//!
//! Two fetch paths feed the pipeline. Discovery needs the page as a browser
//! would see it, after client-side scripts have run; that capability is the
//! [`RenderHtml`] trait, implemented for production by
//! [`SpiderRenderer`] and by canned-HTML doubles in tests. The downloader
//! needs plain HTTP with retries, which [`HttpFetcher`] provides.
//!
//! Every raw fetch rotates its User-Agent across a pool of realistic
//! browser signatures, one random pick per attempt. Some municipal portals
//! reject anything that looks like a script.

mod error;
mod renderer;

pub use error::FetchError;
pub use renderer::SpiderRenderer;

use rand::{Rng, thread_rng};
use reqwest::Client as ReqwestClient;
use reqwest::header::USER_AGENT;
use std::time::Duration;
use tracing::{debug, warn};

/// Fetch a URL's HTML after allowing client-side rendering to settle.
pub trait RenderHtml {
    fn rendered_html(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<String, FetchError>>;
}

/// Configuration for raw HTTP fetches
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Maximum attempts per URL
    pub attempts: u32,

    /// Base backoff; attempt `n` waits `n * backoff_base` before retrying
    pub backoff_base: Duration,

    /// Per-request timeout
    pub timeout: Duration,

    /// User-Agent pool, one random pick per attempt
    pub user_agents: Vec<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff_base: Duration::from_secs(1),
            timeout: Duration::from_secs(15),
            user_agents: [
                // Chrome on Windows
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36",
                // Edge
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36 Edg/120.0",
                // Firefox
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
                // Safari on macOS
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_0) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15",
                // Android
                "Mozilla/5.0 (Linux; Android 11; SM-G991B) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Mobile Safari/537.36",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Builder for FetchConfig
#[derive(Debug, Default)]
pub struct FetchConfigBuilder {
    config: FetchConfig,
}

impl FetchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: FetchConfig::default(),
        }
    }

    /// Set the maximum attempts per URL
    pub fn attempts(mut self, attempts: u32) -> Self {
        self.config.attempts = attempts;
        self
    }

    /// Set the base backoff between attempts
    pub fn backoff_base(mut self, backoff_base: Duration) -> Self {
        self.config.backoff_base = backoff_base;
        self
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Replace the User-Agent pool. Tests pass a single entry to keep the
    /// rotation deterministic.
    pub fn user_agents(mut self, user_agents: Vec<String>) -> Self {
        self.config.user_agents = user_agents;
        self
    }

    pub fn build(self) -> FetchConfig {
        self.config
    }
}

impl FetchConfig {
    pub fn builder() -> FetchConfigBuilder {
        FetchConfigBuilder::new()
    }
}

/// Retrying HTTP fetcher for document-listing pages and document bodies
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: ReqwestClient,
    config: FetchConfig,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(FetchConfig::default())
    }
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Self {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self { client, config }
    }

    fn pick_user_agent(&self) -> &str {
        let pool = &self.config.user_agents;
        if pool.is_empty() {
            return "";
        }
        &pool[thread_rng().gen_range(0..pool.len())]
    }

    /// GET a URL, retrying with linear backoff.
    ///
    /// Non-2xx statuses count as failures. After the last attempt the error
    /// is [`FetchError::Exhausted`]; callers treat it as a skip.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        for attempt in 1..=self.config.attempts {
            let user_agent = self.pick_user_agent();
            match self.try_get(url, user_agent).await {
                Ok(bytes) => {
                    debug!(url, attempt, bytes = bytes.len(), "fetch ok");
                    return Ok(bytes);
                }
                Err(e) => {
                    warn!(url, attempt, error = %e, "fetch attempt failed");
                    if attempt < self.config.attempts {
                        tokio::time::sleep(self.config.backoff_base * attempt).await;
                    }
                }
            }
        }
        Err(FetchError::Exhausted {
            url: url.to_string(),
            attempts: self.config.attempts,
        })
    }

    /// GET a URL and decode the body as text (lossy UTF-8).
    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let bytes = self.get_bytes(url).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn try_get(&self, url: &str, user_agent: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}
