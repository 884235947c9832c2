//! Configuration module for View-Tally
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every setting has a default, so running without a file
//! crawls the sample user with the stock timings.
//!
//! # Example
//!
//! ```no_run
//! use view_tally::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("view-tally.toml")).unwrap();
//! println!("Crawling user: {}", config.site.user);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, SiteConfig, UserAgentConfig, DEFAULT_BASE_URL, DEFAULT_USER,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{config_fingerprint, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
