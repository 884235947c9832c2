//! Output module for presenting crawl results
//!
//! This module handles:
//! - The per-run report returned by the traversal driver
//! - Printing the total (and optionally every post) to stdout

mod report;

pub use report::{print_report, write_posts, TallyReport};
