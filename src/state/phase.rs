/// Traversal phase definitions for the page-by-page crawl
///
/// This module defines the states the traversal driver moves through while
/// walking a listing, and which moves between them are legal.
use std::fmt;

/// Represents the current phase of a listing traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalPhase {
    // ===== Active Phases =====
    /// Navigating to the current page and waiting for it to be ready
    Fetching,

    /// Detecting the layout and dispatching record extraction
    Extracting,

    /// Working out the next page URL
    Resolving,

    // ===== Terminal Phases =====
    /// The last page was processed and every extraction finished
    Done,

    /// An unrecovered error aborted the traversal
    Failed,
}

impl TraversalPhase {
    /// Returns true if this is a terminal phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if the driver may move from this phase to `next`
    ///
    /// Any active phase may fail; terminal phases never change.
    pub fn can_transition_to(&self, next: TraversalPhase) -> bool {
        match (self, next) {
            (Self::Fetching, Self::Extracting) => true,
            (Self::Extracting, Self::Resolving) => true,
            (Self::Resolving, Self::Fetching) => true,
            (Self::Resolving, Self::Done) => true,
            (current, Self::Failed) => !current.is_terminal(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::Resolving => "resolving",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// Returns all possible phases
    pub fn all_phases() -> Vec<Self> {
        vec![
            Self::Fetching,
            Self::Extracting,
            Self::Resolving,
            Self::Done,
            Self::Failed,
        ]
    }
}

impl fmt::Display for TraversalPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_terminal() {
        assert!(!TraversalPhase::Fetching.is_terminal());
        assert!(!TraversalPhase::Extracting.is_terminal());
        assert!(!TraversalPhase::Resolving.is_terminal());

        assert!(TraversalPhase::Done.is_terminal());
        assert!(TraversalPhase::Failed.is_terminal());
    }

    #[test]
    fn test_page_cycle_transitions() {
        use TraversalPhase::*;
        assert!(Fetching.can_transition_to(Extracting));
        assert!(Extracting.can_transition_to(Resolving));
        assert!(Resolving.can_transition_to(Fetching));
        assert!(Resolving.can_transition_to(Done));
    }

    #[test]
    fn test_illegal_transitions() {
        use TraversalPhase::*;
        assert!(!Fetching.can_transition_to(Resolving));
        assert!(!Fetching.can_transition_to(Done));
        assert!(!Extracting.can_transition_to(Done));
        assert!(!Done.can_transition_to(Fetching));
        assert!(!Failed.can_transition_to(Fetching));
    }

    #[test]
    fn test_only_active_phases_can_fail() {
        for phase in TraversalPhase::all_phases() {
            assert_eq!(
                phase.can_transition_to(TraversalPhase::Failed),
                !phase.is_terminal(),
                "unexpected failure rule for {:?}",
                phase
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", TraversalPhase::Fetching), "fetching");
        assert_eq!(format!("{}", TraversalPhase::Done), "done");
    }
}
