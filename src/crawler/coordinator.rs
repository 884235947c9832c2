//! Traversal driver - main crawl orchestration logic
//!
//! This module contains the page-by-page loop that coordinates every part of
//! a run:
//! - Navigating to the current listing page and waiting until it is ready
//! - Detecting the page layout and handing extraction to a background task
//! - Resolving the next page URL and pacing requests
//! - Waiting for all extraction work before reading the aggregate total
//!
//! Navigation is sequential because each next URL comes from the current
//! page. Extraction of page N runs concurrently with navigation of page N+1.
//! Any fatal error aborts the run and outstanding extraction tasks; no
//! partial total is reported.

use crate::aggregate::{new_sink, AggregationSink, Producer};
use crate::config::Config;
use crate::crawler::layout::{detect_layout, DetectedLayout, READY_SELECTOR};
use crate::crawler::pagination::resolve_next;
use crate::crawler::scheduler::Pacer;
use crate::crawler::{extract_page, PostRecord};
use crate::output::TallyReport;
use crate::render::RenderProvider;
use crate::state::{TraversalPhase, TraversalState};
use crate::url::{resolve_href, seed_url};
use crate::TallyError;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Result of one page's background extraction
#[derive(Debug)]
struct PageOutcome {
    page_index: u32,
    posts: usize,
    records: Vec<PostRecord>,
}

/// Running totals of the pages whose extraction has finished
#[derive(Debug, Default)]
struct Progress {
    pages_visited: u32,
    posts: usize,
    records: Vec<PostRecord>,
}

impl Progress {
    fn absorb(&mut self, outcome: PageOutcome) {
        tracing::debug!(
            "Page {} extracted: {} posts",
            outcome.page_index,
            outcome.posts
        );
        self.posts += outcome.posts;
        self.records.extend(outcome.records);
    }
}

type ExtractionTasks = JoinSet<Result<PageOutcome, TallyError>>;

/// Main traversal driver
pub struct Coordinator {
    config: Arc<Config>,
    provider: Arc<dyn RenderProvider>,
    pacer: Pacer,
    collect_posts: bool,
}

impl Coordinator {
    /// Creates a driver rendering pages through `provider`
    pub fn new(config: Config, provider: Arc<dyn RenderProvider>) -> Self {
        let pacer = Pacer::from_config(&config.crawler);
        Self {
            config: Arc::new(config),
            provider,
            pacer,
            collect_posts: false,
        }
    }

    /// Keeps every extracted post in the report, not just the counts
    pub fn collect_posts(mut self, enabled: bool) -> Self {
        self.collect_posts = enabled;
        self
    }

    /// Listing URL the traversal starts from
    pub fn seed_url(&self) -> Result<String, TallyError> {
        let site = &self.config.site;
        Ok(seed_url(&site.base_url, &site.user)?.to_string())
    }

    /// Runs the traversal to completion
    ///
    /// # Returns
    ///
    /// * `Ok(TallyReport)` - Every page was visited and extracted
    /// * `Err(TallyError)` - The traversal failed; nothing is salvaged
    pub async fn run(&self) -> Result<TallyReport, TallyError> {
        let seed = self.seed_url()?;
        let user = self.config.site.user.clone();
        tracing::info!(
            "Crawling {} from {} ({} aggregation)",
            user,
            seed,
            self.config.crawler.aggregation
        );

        let sink = new_sink(self.config.crawler.aggregation);
        let mut tasks = ExtractionTasks::new();
        let mut phase = TraversalPhase::Fetching;
        let mut progress = Progress::default();

        let outcome = match self
            .traverse(seed, sink.as_ref(), &mut tasks, &mut phase, &mut progress)
            .await
        {
            Ok(()) => drain(&mut tasks, &mut progress).await,
            Err(e) => Err(e),
        };

        if let Err(e) = outcome {
            if phase.can_transition_to(TraversalPhase::Failed) {
                phase = TraversalPhase::Failed;
            }
            tracing::error!("Traversal {}: {}", phase, e);
            tasks.shutdown().await;
            return Err(e);
        }

        transition(&mut phase, TraversalPhase::Done)?;

        // Every producer is finished or dropped by now, so this cannot block.
        let total_views = sink.finish().await?;

        let mut records = progress.records;
        records.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        tracing::info!(
            "Crawl completed: {} pages, {} posts, {} views",
            progress.pages_visited,
            progress.posts,
            total_views
        );

        Ok(TallyReport {
            user,
            pages_visited: progress.pages_visited,
            posts: progress.posts,
            total_views,
            records,
        })
    }

    /// Visits pages until the resolver runs out of next URLs
    async fn traverse(
        &self,
        seed: String,
        sink: &dyn AggregationSink,
        tasks: &mut ExtractionTasks,
        phase: &mut TraversalPhase,
        progress: &mut Progress,
    ) -> Result<(), TallyError> {
        let crawler = &self.config.crawler;
        let mut state = TraversalState::seed(seed);

        while let Some(url) = state.current_url.clone() {
            tracing::info!("page: {}", state.page_index);

            let page = self.provider.navigate(&url).await?;
            // The readiness selector is the union of both layouts, so an
            // expired wait means neither layout rendered any posts.
            match page.wait_ready(READY_SELECTOR, crawler.ready_wait()).await {
                Ok(()) => {}
                Err(e) if e.is_deadline_exceeded() => {
                    return Err(TallyError::NoPostsFound {
                        url: page.url().to_string(),
                    });
                }
                Err(e) => return Err(e.into()),
            }
            transition(phase, TraversalPhase::Extracting)?;

            let detected = detect_layout(page.as_ref(), crawler.layout_probe()).await?;
            let producer = sink.producer(state.page_index);
            tasks.spawn(process_page(
                state.page_index,
                detected,
                producer,
                self.collect_posts,
            ));
            progress.pages_visited += 1;
            transition(phase, TraversalPhase::Resolving)?;

            let current_url = page.url().to_string();
            let next = resolve_next(page.as_ref(), state, crawler.next_page_probe()).await?;
            drop(page);

            // Surface failed extractions without waiting for the last page
            while let Some(joined) = tasks.try_join_next() {
                progress.absorb(joined??);
            }

            state = match next.current_url.clone() {
                Some(href) => {
                    let resolved = resolve_href(&current_url, &href)?;
                    transition(phase, TraversalPhase::Fetching)?;
                    self.pacer.pause().await;
                    next.with_url(Some(resolved))
                }
                None => next,
            };
        }

        Ok(())
    }
}

/// Extracts one page and submits its view counts
///
/// The counts are submitted only once every post on the page parsed, so a
/// failing page contributes nothing to the total.
async fn process_page(
    page_index: u32,
    detected: DetectedLayout,
    producer: Box<dyn Producer>,
    keep_records: bool,
) -> Result<PageOutcome, TallyError> {
    let records = extract_page(&detected.posts, detected.layout)?;
    let view_counts = records.iter().map(|record| record.view_count).collect();
    producer.submit(view_counts).await?;

    Ok(PageOutcome {
        page_index,
        posts: records.len(),
        records: if keep_records { records } else { Vec::new() },
    })
}

/// Waits for every outstanding extraction task
async fn drain(tasks: &mut ExtractionTasks, progress: &mut Progress) -> Result<(), TallyError> {
    while let Some(joined) = tasks.join_next().await {
        progress.absorb(joined??);
    }
    Ok(())
}

fn transition(phase: &mut TraversalPhase, next: TraversalPhase) -> Result<(), TallyError> {
    if !phase.can_transition_to(next) {
        return Err(TallyError::InvalidTransition {
            from: *phase,
            to: next,
        });
    }
    tracing::debug!("Traversal {} -> {}", phase, next);
    *phase = next;
    Ok(())
}
