//! Rendered page backed by an HTML snapshot
//!
//! Selectors are evaluated with `scraper` against the HTML captured at
//! navigation time. Matches are copied out as owned [`DomNode`] trees so the
//! parsed document never outlives a single query.

use crate::render::{DomNode, RenderedPage};
use crate::RenderError;
use async_trait::async_trait;
use scraper::{ElementRef, Html, Node, Selector};
use std::time::Duration;

/// A listing page captured as HTML
#[derive(Debug, Clone)]
pub struct SnapshotPage {
    url: String,
    html: String,
    poll_interval: Duration,
}

impl SnapshotPage {
    /// Creates a page from its final URL and HTML
    pub fn new(url: impl Into<String>, html: impl Into<String>, poll_interval: Duration) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
            poll_interval,
        }
    }

    /// Evaluates `selector` once against the snapshot
    fn select_now(&self, selector: &str) -> Result<Vec<DomNode>, RenderError> {
        let parsed = Selector::parse(selector).map_err(|e| RenderError::InvalidSelector {
            selector: selector.to_string(),
            message: format!("{:?}", e),
        })?;

        let document = Html::parse_document(&self.html);
        Ok(document.select(&parsed).map(to_dom_node).collect())
    }

    /// Re-evaluates `selector` until it matches or `limit` elapses
    async fn poll_until_present(
        &self,
        selector: &str,
        limit: Duration,
    ) -> Result<Vec<DomNode>, RenderError> {
        let poll = async {
            loop {
                let nodes = self.select_now(selector)?;
                if !nodes.is_empty() {
                    return Ok(nodes);
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        };

        match tokio::time::timeout(limit, poll).await {
            Ok(result) => result,
            Err(_) => Err(RenderError::DeadlineExceeded {
                target: selector.to_string(),
                waited: limit,
            }),
        }
    }
}

#[async_trait]
impl RenderedPage for SnapshotPage {
    fn url(&self) -> &str {
        &self.url
    }

    async fn wait_ready(&self, selector: &str, timeout: Duration) -> Result<(), RenderError> {
        self.poll_until_present(selector, timeout).await.map(|_| ())
    }

    async fn query_all(
        &self,
        selector: &str,
        wait: Option<Duration>,
    ) -> Result<Vec<DomNode>, RenderError> {
        match wait {
            Some(limit) => self.poll_until_present(selector, limit).await,
            None => self.select_now(selector),
        }
    }
}

/// Copies an element and its subtree out of the parsed document
///
/// Whitespace-only text nodes are dropped, so the first child of an element
/// is its first meaningful child.
fn to_dom_node(element: ElementRef<'_>) -> DomNode {
    let value = element.value();
    let attributes = value
        .attrs()
        .map(|(name, val)| (name.to_string(), val.to_string()))
        .collect();

    let mut children = Vec::new();
    for child in element.children() {
        match child.value() {
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    children.push(to_dom_node(child_element));
                }
            }
            Node::Text(text) => {
                let text: &str = text;
                if !text.trim().is_empty() {
                    children.push(DomNode::text(text));
                }
            }
            _ => {}
        }
    }

    DomNode::element(value.name(), attributes, children)
}
