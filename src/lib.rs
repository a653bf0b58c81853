//! Fleetscrape: a batch scraper for a paginated vehicle-listing site
//!
//! This crate crawls a listing site organized by brand, extracts structured
//! records (title, category, link, price, mileage), and writes one
//! deduplicated tab-delimited dataset per brand plus a merged global dataset.
//! The whole run is a single finite batch job that can resume past brands
//! already written to disk.

pub mod config;
pub mod crawler;
pub mod dataset;
pub mod urls;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fleetscrape operations
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("Entry page unreachable: {url}: {reason}")]
    EntryPage { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Dataset {path} has no '{column}' column")]
    MissingColumn { path: PathBuf, column: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for fleetscrape operations
pub type Result<T> = std::result::Result<T, FleetError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{run_pipeline, PipelineReport};
pub use dataset::ListingRecord;
