//! Post record extraction
//!
//! This module turns one post container into a [`PostRecord`]:
//! - the title, from the post's title element
//! - the publish time, from `posted @ YYYY-MM-DD HH:MM` in the description
//! - the view count, from `阅读(<digits>)` in the description's view-count node
//!
//! A missing element is a [`TallyError::FieldNotFound`] and text that does not
//! match its pattern is a [`TallyError::PatternMismatch`]. Both mean the
//! markup changed upstream, so neither is papered over with a default.

use crate::crawler::PageLayout;
use crate::render::DomNode;
use crate::TallyError;
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

/// Class of the day-grouped title element
pub const TITLE_CLASS: &str = "postTitle";

/// Class of the view count node inside the description
pub const VIEW_COUNT_CLASS: &str = "post-view-count";

const POSTED_AT_PATTERN: &str = r"posted @ (\d{4}-\d{2}-\d{2}\s\d{2}:\d{2})";
const VIEW_COUNT_PATTERN: &str = r"阅读\(([0-9]+)\)";
const POSTED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

static POSTED_AT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(POSTED_AT_PATTERN).expect("valid posted-at pattern"));

static VIEW_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VIEW_COUNT_PATTERN).expect("valid view-count pattern"));

/// Metadata of one listed post
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostRecord {
    pub title: String,
    pub published_at: NaiveDateTime,
    pub view_count: u64,
}

/// Extracts every post of a page, stopping at the first failure
///
/// A single bad post fails the whole page so its count is never partially
/// reported.
pub fn extract_page(posts: &[DomNode], layout: PageLayout) -> Result<Vec<PostRecord>, TallyError> {
    posts
        .iter()
        .map(|post| extract_record(post, layout))
        .collect()
}

/// Extracts one post container laid out as `layout`
///
/// # Example
///
/// ```no_run
/// use view_tally::crawler::{extract_record, PageLayout};
/// use view_tally::render::DomNode;
///
/// # fn example(post: &DomNode) {
/// let record = extract_record(post, PageLayout::DayGrouped).unwrap();
/// println!("{} has {} views", record.title, record.view_count);
/// # }
/// ```
pub fn extract_record(post: &DomNode, layout: PageLayout) -> Result<PostRecord, TallyError> {
    let title = extract_title(post, layout)?;

    let description_class = layout.description_class();
    let description = post
        .find_child_by_class(description_class)
        .ok_or_else(|| missing(description_class, layout))?;

    let (published_at, view_count) = extract_metadata(description, layout)?;

    Ok(PostRecord {
        title,
        published_at,
        view_count,
    })
}

/// Title element of a post: the `postTitle` child for day-grouped posts, the
/// first child element for post-grouped ones
fn extract_title(post: &DomNode, layout: PageLayout) -> Result<String, TallyError> {
    let title_node = match layout {
        PageLayout::DayGrouped => post
            .find_child_by_class(TITLE_CLASS)
            .ok_or_else(|| missing(TITLE_CLASS, layout))?,
        PageLayout::PostGrouped => post
            .first_element_child()
            .ok_or_else(|| missing("title element", layout))?,
    };

    // title > a > span > text
    let text = title_node
        .first_text()
        .ok_or_else(|| missing("title text", layout))?;

    Ok(text.trim().to_string())
}

/// Publish time and view count from a description node
fn extract_metadata(
    description: &DomNode,
    layout: PageLayout,
) -> Result<(NaiveDateTime, u64), TallyError> {
    let description_text = description
        .first_child_text()
        .ok_or_else(|| missing("description text", layout))?;
    let published_at = parse_published_at(description_text)?;

    let count_node = description
        .find_child_by_class(VIEW_COUNT_CLASS)
        .ok_or_else(|| missing(VIEW_COUNT_CLASS, layout))?;
    let count_text = count_node
        .first_child_text()
        .ok_or_else(|| missing("view count text", layout))?;
    let view_count = parse_view_count(count_text)?;

    Ok((published_at, view_count))
}

/// Parses the first `posted @ YYYY-MM-DD HH:MM` occurrence in `text`
pub fn parse_published_at(text: &str) -> Result<NaiveDateTime, TallyError> {
    let mismatch = || TallyError::PatternMismatch {
        pattern: POSTED_AT_PATTERN,
        text: text.to_string(),
    };

    let captured = POSTED_AT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .ok_or_else(mismatch)?;

    // \s may be any whitespace; the timestamp format wants a plain space
    let normalized: String = captured
        .as_str()
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();

    NaiveDateTime::parse_from_str(&normalized, POSTED_AT_FORMAT).map_err(|_| mismatch())
}

/// Parses the first `阅读(<digits>)` occurrence in `text`
pub fn parse_view_count(text: &str) -> Result<u64, TallyError> {
    let mismatch = || TallyError::PatternMismatch {
        pattern: VIEW_COUNT_PATTERN,
        text: text.to_string(),
    };

    VIEW_COUNT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .ok_or_else(mismatch)?
        .as_str()
        .parse::<u64>()
        .map_err(|_| mismatch())
}

fn missing(field: &'static str, layout: PageLayout) -> TallyError {
    TallyError::FieldNotFound {
        field,
        context: format!("{} post", layout),
    }
}
