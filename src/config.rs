//! Run configuration for a scrape
//!
//! All configuration is carried on the command line; this module holds the
//! resolved values that get passed through the pipeline.

use std::path::PathBuf;

/// Default entry point of the listing site
pub const DEFAULT_BASE_URL: &str = "https://www.used-renault-trucks.fr";

/// Default number of concurrent page workers
pub const DEFAULT_WORKERS: usize = 5;

/// Resolved configuration for one pipeline run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Entry URL of the listing site (brand discovery starts here)
    pub base_url: String,

    /// Directory receiving per-brand datasets and the global merge
    pub output_dir: PathBuf,

    /// Maximum number of page fetches in flight at once
    pub workers: usize,

    /// Skip brands whose dataset file already exists
    pub resume: bool,
}

impl CrawlConfig {
    /// Creates a configuration, clamping the worker count to at least 1
    pub fn new(base_url: String, output_dir: PathBuf, workers: usize, resume: bool) -> Self {
        Self {
            base_url,
            output_dir,
            workers: workers.max(1),
            resume,
        }
    }
}
