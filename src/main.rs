//! View-Tally main entry point
//!
//! This is the command-line interface for the View-Tally blog view counter.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use view_tally::aggregate::AggregationStrategy;
use view_tally::config::{load_config_with_hash, validate, Config};
use view_tally::crawler::crawl;
use view_tally::output::print_report;

/// View-Tally: total the view counts of a blog's posts
///
/// View-Tally walks every page of a user's post listing, reads each post's
/// title, publish date and view count, and prints the total number of views.
#[derive(Parser, Debug)]
#[command(name = "view-tally")]
#[command(version = "1.0.0")]
#[command(about = "Total the view counts of a blog's posts", long_about = None)]
struct Cli {
    /// Blog user whose listing is crawled [default: apocelipes]
    #[arg(short, long)]
    user: Option<String>,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// How concurrent page results are summed
    #[arg(long, value_enum)]
    aggregation: Option<AggregationStrategy>,

    /// Print every post before the total
    #[arg(long)]
    posts: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    // Command-line flags win over the file
    if let Some(user) = cli.user {
        config.site.user = user;
    }
    if let Some(strategy) = cli.aggregation {
        config.crawler.aggregation = strategy;
    }
    validate(&config)?;

    match crawl(config, cli.posts).await {
        Ok(report) => {
            print_report(&report, cli.posts)?;
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("view_tally=info,warn"),
            1 => EnvFilter::new("view_tally=debug,info"),
            2 => EnvFilter::new("view_tally=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
