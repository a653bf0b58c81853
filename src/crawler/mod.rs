//! Crawler module: fetching, extraction, and pipeline orchestration
//!
//! This module contains the core scraping logic:
//! - HTTP fetching with bounded retry and backoff
//! - HTML extraction of brands, listings, pagination, and details
//! - Per-brand page fan-out under a bounded worker pool
//! - Overall pipeline orchestration and the final merge

mod brand;
mod extract;
mod fetcher;
mod pipeline;

pub use brand::{process_brand, scrape_page, Brand, BrandOutcome};
pub use extract::{
    extract_brand_urls, extract_detail, extract_listings, extract_total_pages, ListingDetail,
    ListingEntry,
};
pub use fetcher::{build_http_client, fetch_text, FetchError};
pub use pipeline::{run_pipeline, PipelineReport};
