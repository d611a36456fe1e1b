// src/services/courses.rs

//! Course detail crawler.

use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::extract::{PageParser, assemble_course};
use crate::models::{Course, CourseListing, CrawlerConfig, UnitDirectory};
use crate::utils::http::PageSource;
use crate::utils::url::Endpoints;

/// Service for crawling course curricula.
pub struct CourseCrawler {
    source: Arc<dyn PageSource>,
    endpoints: Endpoints,
    parser: Arc<PageParser>,
    units: Arc<UnitDirectory>,
    timeout: Duration,
}

impl CourseCrawler {
    /// Create a new course crawler.
    pub fn new(
        source: Arc<dyn PageSource>,
        config: &CrawlerConfig,
        parser: Arc<PageParser>,
        units: Arc<UnitDirectory>,
    ) -> Result<Self> {
        Ok(Self {
            source,
            endpoints: Endpoints::new(&config.base_url)?,
            parser,
            units,
            timeout: config.detail_timeout(),
        })
    }

    /// Fetch one course page and read its curriculum.
    pub async fn fetch(&self, listing: &CourseListing) -> Result<Option<Course>> {
        let link = self.parser.course_link(&listing.link);
        if link.code.is_none() {
            log::warn!("{}: no course code in link", listing.link);
            return Ok(None);
        }

        let html = self
            .source
            .fetch_text(&self.endpoints.course(&listing.link), self.timeout)
            .await?;

        let name = self.parser.course_name(&html);
        let periods = self.parser.curriculum(&html);
        if periods.is_none() {
            log::debug!("{}: no curriculum table", listing.link);
        }

        Ok(assemble_course(listing, link, name, periods, &self.units))
    }
}
