//! Final run report and console output

use crate::crawler::PostRecord;
use std::io::{self, Write};

/// Outcome of one completed traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyReport {
    /// Blog user whose listing was crawled
    pub user: String,

    /// Number of listing pages visited
    pub pages_visited: u32,

    /// Number of posts extracted across all pages
    pub posts: usize,

    /// Sum of all view counts
    pub total_views: u64,

    /// Extracted posts, newest first; empty unless collection was requested
    pub records: Vec<PostRecord>,
}

impl TallyReport {
    /// One-line summary of the total
    pub fn summary_line(&self) -> String {
        format!("User: {}\ttotal view count: {}", self.user, self.total_views)
    }
}

/// Writes one line per collected post: date, views, title
pub fn write_posts<W: Write>(report: &TallyReport, out: &mut W) -> io::Result<()> {
    for record in &report.records {
        writeln!(
            out,
            "{}\t{:>8}\t{}",
            record.published_at.format("%Y-%m-%d %H:%M"),
            record.view_count,
            record.title
        )?;
    }
    Ok(())
}

/// Prints the report to stdout
pub fn print_report(report: &TallyReport, with_posts: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if with_posts {
        write_posts(report, &mut out)?;
        writeln!(out)?;
    }

    writeln!(out, "{}", report.summary_line())?;
    out.flush()
}
