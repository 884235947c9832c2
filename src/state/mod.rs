//! State module for tracking traversal progress
//!
//! # Components
//!
//! - `TraversalState`: the URL and page index of the next page to visit
//! - `TraversalPhase`: where the driver is in the per-page cycle

mod phase;
mod traversal;

// Re-export main types
pub use phase::TraversalPhase;
pub use traversal::TraversalState;
