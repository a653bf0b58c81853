//! Fleetscrape main entry point
//!
//! Command-line interface for the vehicle-listing batch scraper.

use anyhow::Context;
use clap::Parser;
use fleetscrape::config::{CrawlConfig, DEFAULT_BASE_URL, DEFAULT_WORKERS};
use fleetscrape::crawler::run_pipeline;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Fleetscrape: batch scraper for a paginated vehicle-listing site
///
/// Discovers all brands from the entry page, scrapes every listing page of
/// every brand with bounded concurrency, enriches each listing from its
/// detail page, and writes one deduplicated tab-delimited dataset per brand
/// plus a merged global dataset.
#[derive(Parser, Debug)]
#[command(name = "fleetscrape")]
#[command(version = "1.0.0")]
#[command(about = "Scrape a brand-organized vehicle listing site", long_about = None)]
struct Cli {
    /// Output directory for dataset files (e.g. 2026_02_19)
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Number of concurrent page workers
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Skip brands whose dataset file already exists
    #[arg(short, long)]
    resume: bool,

    /// Entry URL of the listing site
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = CrawlConfig::new(cli.base_url, cli.output_dir, cli.workers, cli.resume);

    tracing::info!(
        "Starting scrape of {} with {} worker(s), resume={}",
        config.base_url,
        config.workers,
        config.resume
    );

    let report = run_pipeline(&config)
        .await
        .context("scrape run aborted")?;

    tracing::info!(
        "Scraping finished: {}/{} brand(s) processed ({} skipped, {} failed)",
        report.brands_processed,
        report.brands_discovered,
        report.brands_skipped,
        report.brands_failed
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("fleetscrape=info,warn"),
            1 => EnvFilter::new("fleetscrape=debug,info"),
            2 => EnvFilter::new("fleetscrape=trace,debug"),
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
