/// Position of the traversal within a paginated listing
///
/// Each resolver step consumes the current state and returns the next one,
/// so the driver loop threads a value instead of sharing mutable references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalState {
    /// URL of the page to visit next; `None` ends the traversal
    pub current_url: Option<String>,

    /// 1-based index of the page `current_url` points at
    pub page_index: u32,
}

impl TraversalState {
    /// Starting state for a seed listing URL
    pub fn seed(url: impl Into<String>) -> Self {
        Self {
            current_url: Some(url.into()),
            page_index: 1,
        }
    }

    pub fn is_first_page(&self) -> bool {
        self.page_index == 1
    }

    /// Returns true once there is no page left to visit
    pub fn is_done(&self) -> bool {
        self.current_url.is_none()
    }

    /// Moves to the following page, or to the end when `next_url` is `None`
    ///
    /// The page index always advances, whatever the outcome.
    pub fn advance(self, next_url: Option<String>) -> Self {
        Self {
            current_url: next_url,
            page_index: self.page_index + 1,
        }
    }

    /// Replaces the URL while keeping the page index
    pub fn with_url(self, url: Option<String>) -> Self {
        Self {
            current_url: url,
            ..self
        }
    }
}
