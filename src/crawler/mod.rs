//! Crawler module for listing traversal and post extraction
//!
//! This module contains the core crawling logic, including:
//! - Listing layout detection
//! - Post record extraction
//! - Next-page resolution
//! - Request pacing
//! - Overall traversal coordination

mod coordinator;
mod extractor;
mod layout;
mod pagination;
mod scheduler;

pub use coordinator::Coordinator;
pub use extractor::{extract_page, extract_record, parse_published_at, parse_view_count, PostRecord};
pub use layout::{detect_layout, DetectedLayout, PageLayout, DAY_SELECTOR, POST_SELECTOR, READY_SELECTOR};
pub use pagination::{resolve_next, FIRST_PAGE_NEXT_SELECTOR, NEXT_PAGE_LABEL, PAGER_SELECTOR};
pub use scheduler::Pacer;

use crate::config::Config;
use crate::output::TallyReport;
use crate::render::HttpProvider;
use crate::TallyError;
use std::sync::Arc;

/// Runs a complete crawl of the configured user's listing over HTTP
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `collect_posts` - Keep every extracted post in the report
///
/// # Returns
///
/// * `Ok(TallyReport)` - Crawl completed successfully
/// * `Err(TallyError)` - Crawl failed
pub async fn crawl(config: Config, collect_posts: bool) -> Result<TallyReport, TallyError> {
    let provider = HttpProvider::new(&config.crawler, &config.user_agent)?;
    Coordinator::new(config, Arc::new(provider))
        .collect_posts(collect_posts)
        .run()
        .await
}
