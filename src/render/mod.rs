//! Render provider abstraction
//!
//! The crawler core never fetches or renders pages itself. It talks to a
//! [`RenderProvider`], which turns a URL into a [`RenderedPage`] that can be
//! waited on and queried with CSS selectors. Each wait is bounded by a
//! caller-supplied timeout that fails with [`RenderError::DeadlineExceeded`],
//! a condition callers can tell apart from real render failures.
//!
//! # Components
//!
//! - `DomNode`: owned, immutable snapshot of a matched element subtree
//! - `SnapshotPage`: a rendered page backed by captured HTML
//! - `HttpProvider`: fetches listing pages over HTTP
//! - `StaticProvider`: serves fixed HTML per URL

mod dom;
mod http;
mod snapshot;
mod static_site;

pub use dom::DomNode;
pub use http::{build_http_client, HttpProvider};
pub use snapshot::SnapshotPage;
pub use static_site::StaticProvider;

use crate::RenderError;
use async_trait::async_trait;
use std::time::Duration;

/// Turns URLs into queryable rendered pages
#[async_trait]
pub trait RenderProvider: Send + Sync {
    /// Loads `url` and returns a handle to the rendered page
    async fn navigate(&self, url: &str) -> Result<Box<dyn RenderedPage>, RenderError>;
}

/// One rendered page, queried with CSS selectors
#[async_trait]
pub trait RenderedPage: Send + Sync {
    /// Final URL of the page
    fn url(&self) -> &str;

    /// Waits until `selector` matches at least one node
    async fn wait_ready(&self, selector: &str, timeout: Duration) -> Result<(), RenderError>;

    /// Returns every node matching `selector`
    ///
    /// With `wait`, blocks until at least one node matches or the wait
    /// expires with `DeadlineExceeded`. Without it, returns the current
    /// matches immediately, possibly none.
    async fn query_all(
        &self,
        selector: &str,
        wait: Option<Duration>,
    ) -> Result<Vec<DomNode>, RenderError>;
}
