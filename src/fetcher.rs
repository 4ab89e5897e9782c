use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::{Duration, Instant};

use crate::config::ScraperConfig;
use crate::utils::error::Result;

/// Retrieves a document as text.
///
/// Network errors, non-2xx statuses and timeouts are all reported as `Err`;
/// callers decide how to degrade.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .user_agent(config.user_agent.as_str())
            .redirect(Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let start_time = Instant::now();

        let response = self.client.get(url).send().await?.error_for_status()?;
        let final_url = response.url().to_string();
        let body = response.text().await?;

        tracing::debug!(
            url = %url,
            final_url = %final_url,
            bytes = body.len(),
            elapsed_ms = %start_time.elapsed().as_millis(),
            "Fetched page"
        );

        Ok(body)
    }
}
