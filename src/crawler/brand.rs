//! Brand processing: pagination fan-out and page workers
//!
//! One brand is processed at a time. Its page count is resolved from page 1,
//! then every page is scraped by a pool of tasks bounded by the configured
//! worker count. Collection is a barrier: the brand dataset is only written
//! once every page task has finished, successfully or not.

use crate::config::CrawlConfig;
use crate::crawler::extract::{extract_detail, extract_listings, extract_total_pages, ListingDetail};
use crate::crawler::fetcher::fetch_text;
use crate::dataset::{brand_dataset_path, dedup_dataset, write_dataset, ListingRecord};
use crate::urls::{brand_short_name, page_url};
use crate::Result;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// A discovered brand: canonical URL plus derived short name
#[derive(Debug, Clone)]
pub struct Brand {
    pub url: Url,
    pub name: String,
}

impl Brand {
    pub fn new(url: Url) -> Self {
        let name = brand_short_name(&url);
        Self { url, name }
    }
}

/// How a brand run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrandOutcome {
    /// Dataset file written and deduplicated
    Processed { pages: u32, records: usize },

    /// Resume enabled and the dataset file already existed; nothing fetched
    Skipped,

    /// First page unreachable; no dataset written, retried on a resumed run
    Failed,
}

/// Processes one brand end to end
///
/// Resume check, page-count resolution, bounded page fan-out, barrier
/// collection, dataset write, in-place dedup. A page failure costs only that
/// page's records; only a page-1 fetch failure abandons the brand.
pub async fn process_brand(
    client: &Client,
    brand: &Brand,
    config: &CrawlConfig,
) -> Result<BrandOutcome> {
    let dataset_path = brand_dataset_path(&config.output_dir, &brand.name);

    if config.resume && dataset_path.exists() {
        tracing::info!("Skipping {} (dataset already exists)", brand.name);
        return Ok(BrandOutcome::Skipped);
    }

    tracing::info!("Processing brand: {}", brand.name);

    let first_page = match fetch_text(client, brand.url.as_str()).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Brand {} unreachable, skipping this run: {}", brand.name, e);
            return Ok(BrandOutcome::Failed);
        }
    };

    let total_pages = extract_total_pages(&first_page);
    tracing::info!("Brand {} has {} page(s)", brand.name, total_pages);

    // One bounded pool per brand; pools never overlap across brands, so
    // total in-flight fetches stay capped at the worker count.
    let semaphore = Arc::new(Semaphore::new(config.workers));
    let mut tasks = JoinSet::new();

    for page_number in 1..=total_pages {
        let client = client.clone();
        let brand_url = brand.url.clone();
        let semaphore = semaphore.clone();

        tasks.spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return Vec::new();
            };
            scrape_page(&client, &brand_url, page_number).await
        });
    }

    let mut records = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(page_records) => records.extend(page_records),
            Err(e) => tracing::error!("Page task for {} aborted: {}", brand.name, e),
        }
    }

    let collected = records.len();
    write_dataset(&dataset_path, &records)?;
    dedup_dataset(&dataset_path)?;

    tracing::info!(
        "Brand {} done: {} record(s) from {} page(s)",
        brand.name,
        collected,
        total_pages
    );

    Ok(BrandOutcome::Processed {
        pages: total_pages,
        records: collected,
    })
}

/// Scrapes one listing page of a brand
///
/// Never fails the caller: a page fetch failure degrades to zero records and
/// a detail fetch failure degrades that entry's price/mileage to empty
/// strings. Detail fetches run inline, so concurrency stays bounded by the
/// page-task pool.
pub async fn scrape_page(client: &Client, brand_url: &Url, page_number: u32) -> Vec<ListingRecord> {
    let url = page_url(brand_url, page_number);

    let body = match fetch_text(client, url.as_str()).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Page {} failed, contributing no records: {}", url, e);
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for entry in extract_listings(&body, brand_url) {
        let detail = scrape_detail(client, &entry.link).await;

        records.push(ListingRecord {
            title: entry.title,
            categorie: entry.categorie,
            link: entry.link.to_string(),
            price: detail.price,
            mileage: detail.mileage,
        });
    }

    records
}

/// Fetches and extracts one listing's detail page
///
/// A failure costs only the price/mileage fields; the listing itself is
/// still recorded by the caller.
async fn scrape_detail(client: &Client, link: &Url) -> ListingDetail {
    match fetch_text(client, link.as_str()).await {
        Ok(body) => extract_detail(&body),
        Err(e) => {
            tracing::warn!("Detail fetch failed for {}: {}", link, e);
            ListingDetail::default()
        }
    }
}
