//! Channel-reduction sink
//!
//! Producers send view counts over a bounded mpsc channel. A single reducer
//! task owns the running sum and returns it once every sender is gone.

use crate::aggregate::{AggregationSink, Producer};
use crate::TallyError;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Buffered values between producers and the reducer
pub const CHANNEL_CAPACITY: usize = 10;

/// Sink backed by a single-writer reducer task
pub struct ChannelSink {
    tx: mpsc::Sender<u64>,
    reducer: JoinHandle<u64>,
}

impl ChannelSink {
    /// Spawns the reducer task; must be called inside a tokio runtime
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let reducer = tokio::spawn(reduce(rx));
        Self { tx, reducer }
    }
}

impl Default for ChannelSink {
    fn default() -> Self {
        Self::new()
    }
}

async fn reduce(mut rx: mpsc::Receiver<u64>) -> u64 {
    let mut sum: u64 = 0;
    while let Some(views) = rx.recv().await {
        sum = sum.saturating_add(views);
    }
    tracing::debug!("Reducer drained, total {}", sum);
    sum
}

#[async_trait]
impl AggregationSink for ChannelSink {
    fn producer(&self, page_index: u32) -> Box<dyn Producer> {
        Box::new(ChannelProducer {
            tx: self.tx.clone(),
            page_index,
        })
    }

    async fn finish(self: Box<Self>) -> Result<u64, TallyError> {
        let ChannelSink { tx, reducer } = *self;
        // The reducer stops once the last sender, this one included, is dropped.
        drop(tx);
        Ok(reducer.await?)
    }
}

struct ChannelProducer {
    tx: mpsc::Sender<u64>,
    page_index: u32,
}

#[async_trait]
impl Producer for ChannelProducer {
    async fn submit(self: Box<Self>, view_counts: Vec<u64>) -> Result<(), TallyError> {
        for views in view_counts {
            self.tx.send(views).await.map_err(|_| TallyError::SinkClosed {
                page_index: self.page_index,
            })?;
        }
        Ok(())
    }
}
