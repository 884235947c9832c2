//! Request pacing between listing pages
//!
//! Navigation is strictly sequential, so pacing reduces to one randomized
//! pause before each request after the first.

use crate::config::CrawlerConfig;
use rand::Rng;
use std::time::Duration;

/// Randomized delay between consecutive page requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    min: Duration,
    max: Duration,
}

impl Pacer {
    /// Creates a pacer; bounds given in the wrong order are swapped
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(
            Duration::from_millis(config.min_page_delay),
            Duration::from_millis(config.max_page_delay),
        )
    }

    /// Picks the next delay uniformly from `[min, max]`
    pub fn next_delay(&self) -> Duration {
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        let ms = rand::thread_rng().gen_range(min..=max);
        Duration::from_millis(ms)
    }

    /// Sleeps for a freshly picked delay
    pub async fn pause(&self) {
        let delay = self.next_delay();
        if delay.is_zero() {
            return;
        }
        tracing::debug!("Waiting {:?} before the next page", delay);
        tokio::time::sleep(delay).await;
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::from_config(&CrawlerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delay_range() {
        let pacer = Pacer::default();
        for _ in 0..200 {
            let delay = pacer.next_delay();
            assert!(delay >= Duration::from_secs(1));
            assert!(delay <= Duration::from_secs(3));
        }
    }

    #[test]
    fn test_fixed_delay() {
        let pacer = Pacer::new(Duration::from_millis(250), Duration::from_millis(250));
        assert_eq!(pacer.next_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_swapped_bounds() {
        let pacer = Pacer::new(Duration::from_millis(30), Duration::from_millis(10));
        let delay = pacer.next_delay();
        assert!(delay >= Duration::from_millis(10) && delay <= Duration::from_millis(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_sleeps_within_bounds() {
        let pacer = Pacer::new(Duration::from_secs(1), Duration::from_secs(3));
        let start = tokio::time::Instant::now();
        pacer.pause().await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(1));
        assert!(elapsed <= Duration::from_secs(3) + Duration::from_millis(5));
    }
}
