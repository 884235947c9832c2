//! View-Tally: a blog listing crawler that totals post view counts
//!
//! This crate walks the paginated post index of a blog, detects which of two
//! listing layouts each page uses, extracts per-post metadata (title, publish
//! date, view count) and sums the view counts of every post it saw.

pub mod aggregate;
pub mod config;
pub mod crawler;
pub mod output;
pub mod render;
pub mod state;
pub mod url;

use std::time::Duration;
use thiserror::Error;

/// Main error type for View-Tally operations
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No posts found on {url}: neither listing layout matched")]
    NoPostsFound { url: String },

    #[error("Required field '{field}' not found in {context}")]
    FieldNotFound { field: &'static str, context: String },

    #[error("Text does not match pattern {pattern}: {text:?}")]
    PatternMismatch { pattern: &'static str, text: String },

    #[error("No pagination control on page {page_index} ({url})")]
    NoPaginationControl { page_index: u32, url: String },

    #[error("Render timeout after {waited:?} waiting for {target}")]
    RenderTimeout { target: String, waited: Duration },

    #[error("Render error: {0}")]
    Render(RenderError),

    #[error("Invalid traversal transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::TraversalPhase,
        to: state::TraversalPhase,
    },

    #[error("Aggregation sink closed before page {page_index} was submitted")]
    SinkClosed { page_index: u32 },

    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RenderError> for TallyError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::DeadlineExceeded { target, waited } => {
                TallyError::RenderTimeout { target, waited }
            }
            other => TallyError::Render(other),
        }
    }
}

/// Errors raised by a render provider or a rendered page
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Navigation to {url} failed: {source}")]
    Navigation {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} while loading {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Deadline exceeded after {waited:?} waiting for {target}")]
    DeadlineExceeded { target: String, waited: Duration },

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

impl RenderError {
    /// Returns true if a bounded wait expired
    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, Self::DeadlineExceeded { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

// Re-export commonly used types
pub use aggregate::AggregationStrategy;
pub use config::Config;
pub use crawler::{PageLayout, PostRecord};
pub use output::TallyReport;
pub use state::{TraversalPhase, TraversalState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_maps_to_render_timeout() {
        let err: TallyError = RenderError::DeadlineExceeded {
            target: ".day".to_string(),
            waited: Duration::from_secs(5),
        }
        .into();
        assert!(matches!(err, TallyError::RenderTimeout { ref target, .. } if target == ".day"));
    }

    #[test]
    fn test_other_render_errors_stay_render() {
        let err: TallyError = RenderError::HttpStatus {
            url: "https://example.com/".to_string(),
            status: 404,
        }
        .into();
        assert!(matches!(err, TallyError::Render(RenderError::HttpStatus { status: 404, .. })));
    }
}
