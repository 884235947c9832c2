//! Listing layout detection
//!
//! Blogs on the target site render their post index with one of two
//! templates. Day-grouped listings wrap posts in `.day` containers, while
//! post-grouped listings use one `.post` container per post. A page using one
//! template simply lacks the other's containers, so a probe that times out is
//! a normal answer, not a failure.

use crate::render::{DomNode, RenderedPage};
use crate::{RenderError, TallyError};
use std::fmt;
use std::time::Duration;

/// Container selector of day-grouped listings
pub const DAY_SELECTOR: &str = ".day";

/// Container selector of post-grouped listings
pub const POST_SELECTOR: &str = ".post";

/// Readiness condition covering both layouts
pub const READY_SELECTOR: &str = ".day *, .post *";

/// The two known listing templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageLayout {
    /// Posts grouped under per-day `.day` containers
    DayGrouped,
    /// One `.post` container per post
    PostGrouped,
}

impl PageLayout {
    /// Selector matching this layout's post containers
    pub fn selector(&self) -> &'static str {
        match self {
            Self::DayGrouped => DAY_SELECTOR,
            Self::PostGrouped => POST_SELECTOR,
        }
    }

    /// Class of the child holding the publish date and view count
    pub fn description_class(&self) -> &'static str {
        match self {
            Self::DayGrouped => "postDesc",
            Self::PostGrouped => "postfoot",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DayGrouped => "day-grouped",
            Self::PostGrouped => "post-grouped",
        }
    }
}

impl fmt::Display for PageLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of classifying one page
#[derive(Debug, Clone)]
pub struct DetectedLayout {
    pub layout: PageLayout,
    /// Post containers matched by the winning selector
    pub posts: Vec<DomNode>,
}

/// Classifies a rendered listing page
///
/// Probes for day-grouped containers first, then post-grouped ones, each
/// bounded by `probe`. Only an expired probe moves on to the next layout;
/// any other render error is returned as is.
///
/// # Returns
///
/// * `Ok(DetectedLayout)` - The layout whose containers are present
/// * `Err(TallyError::NoPostsFound)` - Neither layout matched in time
pub async fn detect_layout(
    page: &dyn RenderedPage,
    probe: Duration,
) -> Result<DetectedLayout, TallyError> {
    for layout in [PageLayout::DayGrouped, PageLayout::PostGrouped] {
        match page.query_all(layout.selector(), Some(probe)).await {
            // a bounded query only returns once something matched
            Ok(posts) => {
                tracing::debug!(
                    "{} layout with {} containers on {}",
                    layout,
                    posts.len(),
                    page.url()
                );
                return Ok(DetectedLayout { layout, posts });
            }
            Err(RenderError::DeadlineExceeded { .. }) => {
                tracing::debug!("No {} containers within {:?}", layout, probe);
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(TallyError::NoPostsFound {
        url: page.url().to_string(),
    })
}
