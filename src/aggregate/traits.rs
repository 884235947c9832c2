//! Aggregation sink traits
//!
//! These traits decouple the traversal driver from the way concurrent page
//! results are summed, so either sink strategy can back a run.

use crate::TallyError;
use async_trait::async_trait;

/// Collects per-page view counts from concurrent producers into one total
///
/// A sink hands out one [`Producer`] per page. The total is only available
/// through [`AggregationSink::finish`], which returns after every producer
/// has either submitted or been dropped.
#[async_trait]
pub trait AggregationSink: Send + Sync {
    /// Creates a producer for one page's records
    fn producer(&self, page_index: u32) -> Box<dyn Producer>;

    /// Waits for all producers to complete and returns the final total
    ///
    /// Must only be called once every producer has been consumed or dropped;
    /// until then it keeps waiting.
    async fn finish(self: Box<Self>) -> Result<u64, TallyError>;
}

/// Submits the view counts of one fully-extracted page
///
/// Submitting consumes the producer, which is how it signals completion. A
/// producer dropped without submitting contributes nothing.
#[async_trait]
pub trait Producer: Send {
    /// Adds every view count of the page to the total
    async fn submit(self: Box<Self>, view_counts: Vec<u64>) -> Result<(), TallyError>;
}
