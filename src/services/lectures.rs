// src/services/lectures.rs

//! Lecture detail crawler.
//!
//! Fetches the classroom page of a subject and, when it lists at least one
//! complete classroom, the subject page with its header and credits.

use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::extract::{LectureInfo, PageParser, assemble_lecture};
use crate::models::{CrawlerConfig, Lecture, LectureListing, UnitDirectory};
use crate::utils::http::PageSource;
use crate::utils::url::Endpoints;

/// Service for crawling lecture details.
pub struct LectureCrawler {
    source: Arc<dyn PageSource>,
    endpoints: Endpoints,
    parser: Arc<PageParser>,
    units: Arc<UnitDirectory>,
    timeout: Duration,
}

impl LectureCrawler {
    /// Create a new lecture crawler.
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

    /// Fetch one lecture.
    ///
    /// `Ok(None)` means the pages were read but the lecture was rejected:
    /// no accepted classroom or no readable subject code.
    pub async fn fetch(&self, listing: &LectureListing) -> Result<Option<Lecture>> {
        let html = self
            .source
            .fetch_text(&self.endpoints.classrooms(&listing.code), self.timeout)
            .await?;
        let classrooms = self.parser.classrooms(&html);

        if classrooms.is_empty() {
            log::debug!("{}: no complete classroom", listing.code);
            return Ok(None);
        }

        let html = self
            .source
            .fetch_text(&self.endpoints.lecture(&listing.code), self.timeout)
            .await?;
        let LectureInfo { header, credits } = self.parser.lecture_info(&html);

        if header.is_none() {
            log::warn!("{}: subject header not found", listing.code);
        }
        Ok(assemble_lecture(header, credits, classrooms, &self.units))
    }
}
