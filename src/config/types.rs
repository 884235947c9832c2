use crate::aggregate::AggregationStrategy;
use serde::Deserialize;
use std::time::Duration;

/// Default listing host
pub const DEFAULT_BASE_URL: &str = "https://www.cnblogs.com/";

/// Sample blog user crawled when none is given
pub const DEFAULT_USER: &str = "apocelipes";

/// Desktop browser user agent sent with every listing request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Main configuration structure for View-Tally
///
/// Every section is optional; a missing file or section falls back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Which blog to crawl
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Listing host; the user's index lives at `<base-url>/<user>/`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Blog user identifier
    pub user: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user: DEFAULT_USER.to_string(),
        }
    }
}

/// Crawler timing and aggregation configuration
///
/// All durations are in milliseconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Bound on each layout selector probe
    #[serde(rename = "layout-probe-timeout")]
    pub layout_probe_timeout: u64,

    /// Bound on the first page's "next page" anchor probe
    #[serde(rename = "next-page-probe-timeout")]
    pub next_page_probe_timeout: u64,

    /// Bound on the readiness wait after navigation
    #[serde(rename = "ready-timeout")]
    pub ready_timeout: u64,

    /// Fixed timeout for a single listing request
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Lower bound of the randomized delay between page requests
    #[serde(rename = "min-page-delay")]
    pub min_page_delay: u64,

    /// Upper bound of the randomized delay between page requests
    #[serde(rename = "max-page-delay")]
    pub max_page_delay: u64,

    /// How often a bounded wait re-checks the page
    #[serde(rename = "poll-interval")]
    pub poll_interval: u64,

    /// How concurrent page results are summed
    pub aggregation: AggregationStrategy,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            layout_probe_timeout: 5_000,
            next_page_probe_timeout: 2_000,
            ready_timeout: 30_000,
            request_timeout: 30_000,
            min_page_delay: 1_000,
            max_page_delay: 3_000,
            poll_interval: 100,
            aggregation: AggregationStrategy::default(),
        }
    }
}

impl CrawlerConfig {
    pub fn layout_probe(&self) -> Duration {
        Duration::from_millis(self.layout_probe_timeout)
    }

    pub fn next_page_probe(&self) -> Duration {
        Duration::from_millis(self.next_page_probe_timeout)
    }

    pub fn ready_wait(&self) -> Duration {
        Duration::from_millis(self.ready_timeout)
    }

    pub fn request_wait(&self) -> Duration {
        Duration::from_millis(self.request_timeout)
    }

    pub fn poll_every(&self) -> Duration {
        Duration::from_millis(self.poll_interval)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Full User-Agent header value
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
