//! HTTP page fetching.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use distill_shared::{DistillError, FetchConfig, Result};

/// HTML fetcher with a browser User-Agent, a redirect cap, and a per-request
/// timeout. No retries: a failed request is final for the run.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Build a fetcher from runtime fetch settings.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DistillError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Fetch `url` and return its body as text.
    ///
    /// Transport errors, non-2xx statuses, and unreadable bodies are all
    /// reported as [`DistillError::Network`].
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_html(&self, url: &Url) -> Result<String> {
        debug!("fetching page");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| DistillError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DistillError::Network(format!("{url}: HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DistillError::Network(format!("{url}: body read failed: {e}")))?;

        debug!(status = status.as_u16(), len = body.len(), "page fetched");
        Ok(body)
    }
}
