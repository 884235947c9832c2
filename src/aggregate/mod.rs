//! Aggregation of view counts from concurrently processed pages
//!
//! Two interchangeable strategies:
//! - `ChannelSink`: bounded channel drained by one reducer task
//! - `AtomicSink`: shared atomic counter read behind a producer barrier
//!
//! Both guarantee that no value is counted twice or dropped, and that the
//! final total is read only after every producer has finished. Both clamp
//! at `u64::MAX` rather than wrapping.

mod atomic;
mod channel;
mod traits;

pub use atomic::AtomicSink;
pub use channel::{ChannelSink, CHANNEL_CAPACITY};
pub use traits::{AggregationSink, Producer};

use serde::Deserialize;
use std::fmt;

/// How page results are summed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AggregationStrategy {
    /// Single reducer task fed by a channel
    #[default]
    Channel,
    /// Shared atomic accumulator
    Atomic,
}

impl AggregationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Channel => "channel",
            Self::Atomic => "atomic",
        }
    }
}

impl fmt::Display for AggregationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Creates a fresh sink for one run
///
/// Must be called inside a tokio runtime.
pub fn new_sink(strategy: AggregationStrategy) -> Box<dyn AggregationSink> {
    match strategy {
        AggregationStrategy::Channel => Box::new(ChannelSink::new()),
        AggregationStrategy::Atomic => Box::new(AtomicSink::new()),
    }
}
