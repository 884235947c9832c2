//! Atomic-accumulator sink
//!
//! Producers add their page sum straight into a shared `AtomicU64`. Each
//! producer also holds a completion token; `finish` waits until every token
//! is dropped before loading the total.

use crate::aggregate::{AggregationSink, Producer};
use crate::TallyError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Sink backed by a shared atomic counter and a producer barrier
pub struct AtomicSink {
    total: Arc<AtomicU64>,
    token: mpsc::Sender<()>,
    barrier: mpsc::Receiver<()>,
}

impl AtomicSink {
    pub fn new() -> Self {
        // Nothing is ever sent; the channel only reports when all senders are gone.
        let (token, barrier) = mpsc::channel(1);
        Self {
            total: Arc::new(AtomicU64::new(0)),
            token,
            barrier,
        }
    }
}

impl Default for AtomicSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AggregationSink for AtomicSink {
    fn producer(&self, _page_index: u32) -> Box<dyn Producer> {
        Box::new(AtomicProducer {
            total: Arc::clone(&self.total),
            _token: self.token.clone(),
        })
    }

    async fn finish(self: Box<Self>) -> Result<u64, TallyError> {
        let AtomicSink {
            total,
            token,
            mut barrier,
        } = *self;
        drop(token);
        while barrier.recv().await.is_some() {}
        Ok(total.load(Ordering::Acquire))
    }
}

struct AtomicProducer {
    total: Arc<AtomicU64>,
    _token: mpsc::Sender<()>,
}

#[async_trait]
impl Producer for AtomicProducer {
    async fn submit(self: Box<Self>, view_counts: Vec<u64>) -> Result<(), TallyError> {
        let page_sum = view_counts.iter().fold(0u64, |acc, v| acc.saturating_add(*v));
        // Saturates like the channel reducer instead of wrapping on overflow.
        let _ = self
            .total
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |total| {
                Some(total.saturating_add(page_sum))
            });
        Ok(())
    }
}
