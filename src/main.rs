//! Topic-Tally main entry point
//!
//! Command-line interface for collecting and ranking topic tags from a
//! paginated search. Can run the sequential strategy, the concurrent
//! strategy, or both back to back with timing for comparison.

use clap::{Parser, ValueEnum};
use std::time::{Duration, Instant};
use topic_tally::collector::{collect_labels, CollectOptions, Mode};
use topic_tally::{top_n, CollectError};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Which collection strategy (or strategies) to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Sequential,
    Concurrent,
    /// Run both strategies back to back and report timing for each
    Both,
}

/// Topic-Tally: rank the most common topic tags for a search query
#[derive(Parser, Debug)]
#[command(name = "topic-tally")]
#[command(version = "1.0.0")]
#[command(about = "Rank the most common topic tags for a search query", long_about = None)]
struct Cli {
    /// Search query
    #[arg(long)]
    query: String,

    /// Number of result pages to analyse
    #[arg(long, default_value_t = 1)]
    pages_count: u32,

    /// How many top tags to report
    #[arg(long, default_value_t = 1)]
    top: usize,

    /// Backoff unit in seconds between retries
    #[arg(long, default_value_t = 1)]
    timeout: u64,

    /// Attempts per page before giving up
    #[arg(long, default_value_t = 1)]
    retries_count: u32,

    /// Collection strategy
    #[arg(long, value_enum, default_value_t = ModeArg::Both)]
    mode: ModeArg,

    /// Search endpoint
    #[arg(long, default_value = "https://github.com/search")]
    url: Url,

    /// Increase logging verbosity (-v, -vv)
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

    let opts = CollectOptions {
        base_url: cli.url.clone(),
        query: cli.query.clone(),
        pages_count: cli.pages_count,
        timeout_unit: Duration::from_secs(cli.timeout),
        max_retries: cli.retries_count,
    };

    match cli.mode {
        ModeArg::Sequential => run_mode(&opts, Mode::Sequential, cli.top).await?,
        ModeArg::Concurrent => run_mode(&opts, Mode::Concurrent, cli.top).await?,
        ModeArg::Both => {
            run_mode(&opts, Mode::Sequential, cli.top).await?;
            run_mode(&opts, Mode::Concurrent, cli.top).await?;
        }
    }

    Ok(())
}

/// Runs one collection strategy and reports its ranking and timing
async fn run_mode(opts: &CollectOptions, mode: Mode, top: usize) -> Result<(), CollectError> {
    let name = match mode {
        Mode::Sequential => "Sequential approach",
        Mode::Concurrent => "Concurrent approach",
    };
    tracing::info!("{}", name);

    let start = Instant::now();
    let labels = match collect_labels(opts, mode).await {
        Ok(labels) => labels,
        Err(e) => {
            tracing::error!("Collection failed: {}", e);
            return Err(e);
        }
    };
    let elapsed = start.elapsed();

    tracing::info!("--- Results ---");
    for entry in top_n(&labels, top) {
        tracing::info!("Tag {} has {} usages", entry.label, entry.count);
    }
    tracing::info!(
        "{} labels total, elapsed time: {:.1}s",
        labels.len(),
        elapsed.as_secs_f64()
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("topic_tally=info,warn"),
            1 => EnvFilter::new("topic_tally=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
