//! HTTP render provider
//!
//! Listing pages are rendered server side, so "rendering" a page here means
//! fetching its HTML once and querying that snapshot. Network failures and
//! non-success statuses are render errors; a request that runs past the fixed
//! request timeout is reported as `DeadlineExceeded`.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::render::{RenderProvider, RenderedPage, SnapshotPage};
use crate::RenderError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with the configured user agent and request timeout
///
/// # Example
///
/// ```no_run
/// use view_tally::config::{CrawlerConfig, UserAgentConfig};
/// use view_tally::render::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.value.clone())
        .timeout(crawler.request_wait())
        .connect_timeout(Duration::from_secs(10).min(crawler.request_wait()))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Renders listing pages by fetching them over HTTP
pub struct HttpProvider {
    client: Client,
    request_timeout: Duration,
    poll_interval: Duration,
}

impl HttpProvider {
    /// Creates a provider from the crawler and user agent settings
    pub fn new(
        crawler: &CrawlerConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(crawler, user_agent)?,
            request_timeout: crawler.request_wait(),
            poll_interval: crawler.poll_every(),
        })
    }

    fn classify(&self, url: &str, err: reqwest::Error) -> RenderError {
        if err.is_timeout() {
            RenderError::DeadlineExceeded {
                target: format!("navigation to {}", url),
                waited: self.request_timeout,
            }
        } else {
            RenderError::Navigation {
                url: url.to_string(),
                source: err,
            }
        }
    }
}

#[async_trait]
impl RenderProvider for HttpProvider {
    async fn navigate(&self, url: &str) -> Result<Box<dyn RenderedPage>, RenderError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        let final_url = response.url().to_string();

        if !status.is_success() {
            return Err(RenderError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.classify(url, e))?;
        tracing::debug!("Fetched {} ({} bytes)", final_url, body.len());

        Ok(Box::new(SnapshotPage::new(
            final_url,
            body,
            self.poll_interval,
        )))
    }
}
