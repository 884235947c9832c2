//! Next-page resolution
//!
//! The first listing page and the later ones use different pager widgets:
//!
//! | Page | Control | No next page when |
//! |------|---------|-------------------|
//! | 1 | `#nav_next_page a` | the anchor does not appear within the probe |
//! | >1 | `#homepage_top_pager div.pager a` | the last anchor is not labelled `下一页` |
//!
//! On page 1 an expired probe is the normal end of the listing. On later
//! pages the pager always renders, so an empty pager is an error.

use crate::render::RenderedPage;
use crate::state::TraversalState;
use crate::{RenderError, TallyError};
use std::time::Duration;

/// "Next page" anchor of the first listing page
pub const FIRST_PAGE_NEXT_SELECTOR: &str = "#nav_next_page a";

/// Pager anchors of every later listing page
pub const PAGER_SELECTOR: &str = "#homepage_top_pager div.pager a";

/// Label of the pager's "next page" anchor
pub const NEXT_PAGE_LABEL: &str = "下一页";

/// Resolves the page after `state` and advances the page index
///
/// The returned state carries the raw `href` of the next page (possibly
/// relative), or `None` when `state` is the last page.
///
/// # Arguments
///
/// * `page` - The rendered page `state` points at
/// * `state` - Current traversal position
/// * `first_page_probe` - Bound on the page-1 anchor probe
pub async fn resolve_next(
    page: &dyn RenderedPage,
    state: TraversalState,
    first_page_probe: Duration,
) -> Result<TraversalState, TallyError> {
    let next_url = if state.is_first_page() {
        resolve_from_first_page(page, first_page_probe).await?
    } else {
        resolve_from_pager(page, state.page_index).await?
    };

    match &next_url {
        Some(url) => tracing::debug!("Page {} links to {}", state.page_index, url),
        None => tracing::debug!("Page {} is the last page", state.page_index),
    }

    Ok(state.advance(next_url))
}

async fn resolve_from_first_page(
    page: &dyn RenderedPage,
    probe: Duration,
) -> Result<Option<String>, TallyError> {
    match page.query_all(FIRST_PAGE_NEXT_SELECTOR, Some(probe)).await {
        Ok(anchors) => {
            let href = anchors
                .first()
                .and_then(|anchor| anchor.attr("href"))
                .map(str::to_string);
            if href.is_none() {
                tracing::warn!("Next page anchor without href on {}", page.url());
            }
            Ok(href)
        }
        // Page 1 only renders the anchor when a second page exists, so an
        // expired probe means the listing has a single page.
        Err(RenderError::DeadlineExceeded { .. }) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn resolve_from_pager(
    page: &dyn RenderedPage,
    page_index: u32,
) -> Result<Option<String>, TallyError> {
    let anchors = page.query_all(PAGER_SELECTOR, None).await?;

    let last = anchors.last().ok_or_else(|| TallyError::NoPaginationControl {
        page_index,
        url: page.url().to_string(),
    })?;

    if last.first_child_text() != Some(NEXT_PAGE_LABEL) {
        return Ok(None);
    }

    let href = last.attr("href").ok_or_else(|| TallyError::FieldNotFound {
        field: "href",
        context: format!("next page anchor on page {}", page_index),
    })?;

    Ok(Some(href.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SnapshotPage;

    fn page(html: &str) -> SnapshotPage {
        SnapshotPage::new("https://example.com/u/", html, Duration::from_millis(100))
    }

    fn later_page(index: u32) -> TraversalState {
        TraversalState {
            current_url: Some("https://example.com/u/?page=2".to_string()),
            page_index: index,
        }
    }

    fn pager(anchors: &str) -> String {
        format!(
            r#"<div id="homepage_top_pager" class="topicListFooter"><div class="pager">{}</div></div>"#,
            anchors
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_page_with_next_anchor() {
        let page = page(r#"<div id="nav_next_page"><a href="/u/?page=2">下一页</a></div>"#);
        let state = resolve_next(&page, TraversalState::seed("https://example.com/u/"), Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(state.current_url.as_deref(), Some("/u/?page=2"));
        assert_eq!(state.page_index, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_page_without_anchor_ends_after_probe() {
        let page = page(r#"<div class="day">only page</div>"#);
        let start = tokio::time::Instant::now();
        let state = resolve_next(&page, TraversalState::seed("https://example.com/u/"), Duration::from_secs(2))
            .await
            .unwrap();
        assert!(state.is_done());
        assert_eq!(state.page_index, 2);
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_page_ignores_later_pager() {
        // page 1 never consults the later-page pager
        let page = page(&pager(r#"<a href="/p2">下一页</a>"#));
        let state = resolve_next(&page, TraversalState::seed("https://example.com/u/"), Duration::from_secs(2))
            .await
            .unwrap();
        assert!(state.is_done());
    }

    #[tokio::test]
    async fn test_later_page_next_label() {
        let page = page(&pager(
            r#"<a href="/p1">上一页</a><a href="/p1">1</a><span class="current">2</span><a href="/p2">下一页</a>"#,
        ));
        let state = resolve_next(&page, later_page(2), Duration::from_secs(2)).await.unwrap();
        assert_eq!(state.current_url.as_deref(), Some("/p2"));
        assert_eq!(state.page_index, 3);
    }

    #[tokio::test]
    async fn test_later_page_other_label_ends() {
        let page = page(&pager(r#"<a href="/p1">上一页</a><a href="/p1">1</a><a href="/p2">2</a>"#));
        let state = resolve_next(&page, later_page(3), Duration::from_secs(2)).await.unwrap();
        assert!(state.is_done());
        assert_eq!(state.page_index, 4);
    }

    #[tokio::test]
    async fn test_later_page_label_must_match_exactly() {
        let page = page(&pager(r#"<a href="/p1">上一页</a><a href="/p2">下一页 &gt;</a>"#));
        let state = resolve_next(&page, later_page(2), Duration::from_secs(2)).await.unwrap();
        assert!(state.is_done());
    }

    #[tokio::test]
    async fn test_later_page_without_pager() {
        let page = page(r#"<div class="day">no pager</div>"#);
        let err = resolve_next(&page, later_page(2), Duration::from_secs(2)).await.unwrap_err();
        assert!(matches!(err, TallyError::NoPaginationControl { page_index: 2, .. }));
    }

    #[tokio::test]
    async fn test_later_page_next_without_href() {
        let page = page(&pager(r#"<a href="/p1">上一页</a><a>下一页</a>"#));
        let err = resolve_next(&page, later_page(2), Duration::from_secs(2)).await.unwrap_err();
        assert!(matches!(err, TallyError::FieldNotFound { field: "href", .. }));
    }
}
