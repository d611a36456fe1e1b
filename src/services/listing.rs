// src/services/listing.rs

//! Listing fetcher.
//!
//! Enumerates teaching units, and the lectures and courses of each unit,
//! from the JupiterWeb listing pages.

use std::sync::Arc;
use std::time::Duration;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::extract::stripped;
use crate::models::{CourseListing, CrawlerConfig, LectureListing};
use crate::utils::http::PageSource;
use crate::utils::parse_selector;
use crate::utils::url::Endpoints;

/// Service for fetching and reading listing pages.
pub struct ListingFetcher {
    source: Arc<dyn PageSource>,
    endpoints: Endpoints,
    units_timeout: Duration,
    listing_timeout: Duration,
    links: Selector,
    cells: Selector,
    unit_code: Regex,
    lecture_code: Regex,
}

impl ListingFetcher {
    /// Create a new listing fetcher.
    pub fn new(source: Arc<dyn PageSource>, config: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            source,
            endpoints: Endpoints::new(&config.base_url)?,
            units_timeout: config.units_timeout(),
            listing_timeout: config.listing_timeout(),
            links: parse_selector("a[href]")?,
            cells: parse_selector("td")?,
            unit_code: Regex::new(r"codcg=(\d+)")?,
            lecture_code: Regex::new(r"sgldis=([A-Z0-9\s]{7})")?,
        })
    }

    /// Fetch every teaching unit as `(display_name, unit_code)` pairs.
    pub async fn fetch_units(&self) -> Result<Vec<(String, String)>> {
        let html = self
            .source
            .fetch_text(&self.endpoints.units(), self.units_timeout)
            .await?;
        Ok(self.parse_units(&html))
    }

    /// Fetch the lectures listed for one unit.
    pub async fn fetch_unit_lectures(&self, unit_code: &str) -> Result<Vec<LectureListing>> {
        let html = self
            .source
            .fetch_text(&self.endpoints.unit_lectures(unit_code), self.listing_timeout)
            .await?;
        Ok(self.parse_unit_lectures(&html))
    }

    /// Fetch the courses listed for one unit.
    pub async fn fetch_unit_courses(&self, unit_code: &str) -> Result<Vec<CourseListing>> {
        let html = self
            .source
            .fetch_text(&self.endpoints.unit_courses(unit_code), self.listing_timeout)
            .await?;
        Ok(self.parse_unit_courses(&html))
    }

    /// Read unit links (`jupColegiadoMenu?...codcg=N`) from the unit listing.
    pub fn parse_units(&self, html: &str) -> Vec<(String, String)> {
        let document = Html::parse_document(html);

        self.links_to(&document, "jupColegiadoMenu")
            .filter_map(|(link, href)| {
                let code = self.unit_code.captures(href)?.get(1)?.as_str().to_string();
                let name = link_text(link);
                (!name.is_empty()).then_some((name, code))
            })
            .collect()
    }

    /// Read lecture links (`obterTurma?...sgldis=CODE`) in page order.
    ///
    /// Duplicates are kept.
    pub fn parse_unit_lectures(&self, html: &str) -> Vec<LectureListing> {
        let document = Html::parse_document(html);

        self.links_to(&document, "obterTurma")
            .filter_map(|(link, href)| {
                let code = self.lecture_code.captures(href)?.get(1)?.as_str().to_string();
                Some(LectureListing {
                    code,
                    name: link_text(link),
                })
            })
            .collect()
    }

    /// Read course links (`listarGradeCurricular`) with the ideal period
    /// shown in the last cell of their row.
    pub fn parse_unit_courses(&self, html: &str) -> Vec<CourseListing> {
        let document = Html::parse_document(html);

        self.links_to(&document, "listarGradeCurricular")
            .map(|(link, href)| CourseListing {
                link: href.to_string(),
                ideal_period: self.row_period(link).unwrap_or_default(),
            })
            .collect()
    }

    fn links_to<'a>(
        &'a self,
        document: &'a Html,
        target: &'a str,
    ) -> impl Iterator<Item = (ElementRef<'a>, &'a str)> + 'a {
        document.select(&self.links).filter_map(move |link| {
            let href = link.value().attr("href")?;
            href.contains(target).then_some((link, href))
        })
    }

    /// First text of the last cell in the row enclosing `link`.
    fn row_period(&self, link: ElementRef<'_>) -> Option<String> {
        let row = link
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == "tr")?;
        let last = row.select(&self.cells).last()?;
        stripped(last.text()).next()
    }
}

/// Trimmed text of a link.
fn link_text(link: ElementRef<'_>) -> String {
    stripped(link.text()).collect::<Vec<_>>().join(" ")
}
