// src/pipeline/courses.rs

//! Course crawling pipeline.

use std::sync::Arc;

use chrono::Utc;

use crate::error::Result;
use crate::extract::PageParser;
use crate::models::Config;
use crate::pipeline::units::{enumerate, load_units, target_units};
use crate::pipeline::RunSummary;
use crate::services::{BoundedScheduler, CourseCrawler, ListingFetcher, Progress};
use crate::storage::CatalogStorage;
use crate::utils::http::PageSource;

/// Run the course crawler: every course of the target units into
/// `cursos.json`.
pub async fn run_courses(
    config: &Config,
    source: Arc<dyn PageSource>,
    storage: &dyn CatalogStorage,
    requested_units: Option<&[String]>,
) -> Result<RunSummary> {
    let start_time = Utc::now();
    log::info!("Starting course crawl");

    let listing = ListingFetcher::new(Arc::clone(&source), &config.crawler)?;
    let units = Arc::new(load_units(&listing).await?);

    let targets = target_units(&units, requested_units);
    log::info!("Listing courses of {} units", targets.len());
    let courses = enumerate(&targets, |code| {
        let listing = &listing;
        async move { listing.fetch_unit_courses(&code).await }
    })
    .await;
    log::info!("Found {} courses", courses.len());

    let crawler = CourseCrawler::new(
        source,
        &config.crawler,
        Arc::new(PageParser::new()?),
        Arc::clone(&units),
    )?;
    let crawler = &crawler;
    let scheduler = BoundedScheduler::new(config.crawler.max_concurrent);
    let progress = Progress::new("Courses", courses.len());
    let listing_count = courses.len();

    let accepted: Vec<_> = scheduler
        .run(courses, &progress, |course| async move {
            crawler.fetch(&course).await
        })
        .await
        .into_iter()
        .flatten()
        .collect();

    storage.write_courses(&accepted).await?;

    let summary = RunSummary {
        start_time,
        end_time: Utc::now(),
        unit_count: targets.len(),
        listing_count,
        record_count: accepted.len(),
    };
    log::info!("Course crawl complete: {}", summary);
    Ok(summary)
}
