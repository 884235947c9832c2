use crate::config::types::{Config, CrawlerConfig, SiteConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates the target site and user
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    validate_user(&config.user)
}

/// Validates a blog user identifier
///
/// The identifier becomes one path segment of the seed URL.
pub(crate) fn validate_user(user: &str) -> Result<(), ConfigError> {
    if user.trim().is_empty() {
        return Err(ConfigError::Validation("user cannot be empty".to_string()));
    }

    if user.contains(['/', '?', '#']) || user.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "user must be a single path segment, got '{}'",
            user
        )));
    }

    Ok(())
}

/// Validates crawler timings
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("layout-probe-timeout", config.layout_probe_timeout),
        ("next-page-probe-timeout", config.next_page_probe_timeout),
        ("ready-timeout", config.ready_timeout),
        ("request-timeout", config.request_timeout),
        ("poll-interval", config.poll_interval),
    ] {
        if value == 0 {
            return Err(ConfigError::Validation(format!(
                "{} must be > 0ms",
                name
            )));
        }
    }

    if config.min_page_delay > config.max_page_delay {
        return Err(ConfigError::Validation(format!(
            "min-page-delay ({}ms) must not exceed max-page-delay ({}ms)",
            config.min_page_delay, config.max_page_delay
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent value cannot be empty".to_string(),
        ));
    }

    Ok(())
}
