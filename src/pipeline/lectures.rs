// src/pipeline/lectures.rs

//! Lecture crawling pipeline.

use std::sync::Arc;

use chrono::Utc;

use crate::error::Result;
use crate::extract::PageParser;
use crate::models::Config;
use crate::pipeline::units::{enumerate, load_units, target_units};
use crate::pipeline::RunSummary;
use crate::services::{BoundedScheduler, LectureCrawler, ListingFetcher, Progress};
use crate::storage::CatalogStorage;
use crate::utils::http::PageSource;

/// Run the lecture crawler: units, then `campi.json`, then every lecture of
/// the target units into `db.json`.
pub async fn run_lectures(
    config: &Config,
    source: Arc<dyn PageSource>,
    storage: &dyn CatalogStorage,
    requested_units: Option<&[String]>,
) -> Result<RunSummary> {
    let start_time = Utc::now();
    log::info!("Starting lecture crawl");

    let listing = ListingFetcher::new(Arc::clone(&source), &config.crawler)?;
    let units = Arc::new(load_units(&listing).await?);
    storage.write_campuses(&units.campuses()).await?;

    let targets = target_units(&units, requested_units);
    log::info!("Listing lectures of {} units", targets.len());
    let lectures = enumerate(&targets, |code| {
        let listing = &listing;
        async move { listing.fetch_unit_lectures(&code).await }
    })
    .await;
    log::info!("Found {} lectures", lectures.len());

    let crawler = LectureCrawler::new(
        source,
        &config.crawler,
        Arc::new(PageParser::new()?),
        Arc::clone(&units),
    )?;
    let crawler = &crawler;
    let scheduler = BoundedScheduler::new(config.crawler.max_concurrent);
    let progress = Progress::new("Lectures", lectures.len());
    let listing_count = lectures.len();

    let accepted: Vec<_> = scheduler
        .run(lectures, &progress, |lecture| async move {
            crawler.fetch(&lecture).await
        })
        .await
        .into_iter()
        .flatten()
        .collect();

    storage.write_lectures(&accepted).await?;

    let summary = RunSummary {
        start_time,
        end_time: Utc::now(),
        unit_count: targets.len(),
        listing_count,
        record_count: accepted.len(),
    };
    log::info!("Lecture crawl complete: {}", summary);
    Ok(summary)
}
