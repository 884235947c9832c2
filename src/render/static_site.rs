//! In-memory render provider
//!
//! Serves fixed HTML for known URLs. Unknown URLs fail like a 404. Every
//! navigation is recorded so callers can check which pages were visited.

use crate::render::{RenderProvider, RenderedPage, SnapshotPage};
use crate::RenderError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Render provider backed by a URL → HTML map
#[derive(Debug)]
pub struct StaticProvider {
    pages: HashMap<String, String>,
    visits: Mutex<Vec<String>>,
    poll_interval: Duration,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            visits: Mutex::new(Vec::new()),
            poll_interval: Duration::from_millis(100),
        }
    }

    /// Sets how often bounded waits re-check a served page
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Registers the HTML served for `url`
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// URLs navigated to so far, in order
    pub fn visits(&self) -> Vec<String> {
        self.visits
            .lock()
            .map(|visits| visits.clone())
            .unwrap_or_default()
    }
}

impl Default for StaticProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RenderProvider for StaticProvider {
    async fn navigate(&self, url: &str) -> Result<Box<dyn RenderedPage>, RenderError> {
        if let Ok(mut visits) = self.visits.lock() {
            visits.push(url.to_string());
        }

        let html = self.pages.get(url).ok_or_else(|| RenderError::HttpStatus {
            url: url.to_string(),
            status: 404,
        })?;

        Ok(Box::new(SnapshotPage::new(
            url,
            html.clone(),
            self.poll_interval,
        )))
    }
}
