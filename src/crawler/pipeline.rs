//! Pipeline driver
//!
//! Orchestrates a full run: entry-page fetch, brand discovery, sequential
//! brand processing, and the final global merge. The merge always runs once
//! brands have been attempted; a brand failure never blocks it.

use crate::config::CrawlConfig;
use crate::crawler::brand::{process_brand, Brand, BrandOutcome};
use crate::crawler::extract::extract_brand_urls;
use crate::crawler::fetcher::{build_http_client, fetch_text};
use crate::dataset::merge_datasets;
use crate::{FleetError, Result};
use url::Url;

/// Summary of one pipeline run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Brands discovered on the entry page
    pub brands_discovered: usize,

    /// Brands whose dataset was written this run
    pub brands_processed: usize,

    /// Brands skipped by resume
    pub brands_skipped: usize,

    /// Brands whose first page was unreachable
    pub brands_failed: usize,
}

/// Runs the full scrape pipeline
///
/// # Flow
///
/// 1. Create the output directory if missing
/// 2. Fetch the entry page (fatal on failure: there is nothing to crawl)
/// 3. Extract the deduplicated set of brand URLs
/// 4. Process brands strictly sequentially; only page-level work is
///    concurrent, so in-flight fetches never exceed the worker count
/// 5. Merge all per-brand datasets into the global dataset
///
/// # Returns
///
/// * `Ok(PipelineReport)` - Run finished; per-brand failures are counted,
///   not raised
/// * `Err(FleetError)` - Fatal failure before any brand was processed
pub async fn run_pipeline(config: &CrawlConfig) -> Result<PipelineReport> {
    let start_time = std::time::Instant::now();

    if config.output_dir.exists() {
        tracing::info!("Using existing output directory: {}", config.output_dir.display());
    } else {
        std::fs::create_dir_all(&config.output_dir)?;
        tracing::info!("Created output directory: {}", config.output_dir.display());
    }

    let client = build_http_client()?;

    tracing::info!("Downloading entry page: {}", config.base_url);
    let entry_body = fetch_text(&client, &config.base_url)
        .await
        .map_err(|e| FleetError::EntryPage {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

    let base = Url::parse(&config.base_url)?;
    let brands: Vec<Brand> = extract_brand_urls(&entry_body, &base)
        .into_iter()
        .map(Brand::new)
        .collect();

    tracing::info!("Discovered {} brand(s)", brands.len());

    let mut report = PipelineReport {
        brands_discovered: brands.len(),
        ..PipelineReport::default()
    };

    for brand in &brands {
        match process_brand(&client, brand, config).await? {
            BrandOutcome::Processed { .. } => report.brands_processed += 1,
            BrandOutcome::Skipped => report.brands_skipped += 1,
            BrandOutcome::Failed => report.brands_failed += 1,
        }
    }

    // Merge runs regardless of per-brand failures; a failed brand simply has
    // no dataset to contribute.
    let global_path = merge_datasets(&config.output_dir)?;

    tracing::info!(
        "Run complete in {:?}: {} processed, {} skipped, {} failed, global dataset at {}",
        start_time.elapsed(),
        report.brands_processed,
        report.brands_skipped,
        report.brands_failed,
        global_path.display()
    );

    Ok(report)
}
