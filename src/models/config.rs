//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Output file names
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("cannot read {}: {}", path.display(), e)))?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        url::Url::parse(&self.crawler.base_url)
            .map_err(|e| AppError::validation(format!("crawler.base_url is invalid: {e}")))?;
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.units_timeout_secs == 0 {
            return Err(AppError::validation(
                "crawler.units_timeout_secs must be > 0",
            ));
        }
        if self.crawler.listing_timeout_secs == 0 {
            return Err(AppError::validation(
                "crawler.listing_timeout_secs must be > 0",
            ));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        for (key, name) in [
            ("output.lectures_file", &self.output.lectures_file),
            ("output.courses_file", &self.output.courses_file),
            ("output.campuses_file", &self.output.campuses_file),
        ] {
            if name.trim().is_empty() {
                return Err(AppError::validation(format!("{key} is empty")));
            }
        }
        Ok(())
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Root of every JupiterWeb endpoint
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Timeout for classroom, lecture and course detail pages
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Timeout for the unit listing page
    #[serde(default = "defaults::units_timeout")]
    pub units_timeout_secs: u64,

    /// Timeout for the per-unit lecture and course listing pages
    #[serde(default = "defaults::listing_timeout")]
    pub listing_timeout_secs: u64,

    /// Maximum detail fetches in flight
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Skip TLS certificate validation (the upstream chain is often broken)
    #[serde(default = "defaults::accept_invalid_certs")]
    pub accept_invalid_certs: bool,
}

impl CrawlerConfig {
    pub fn detail_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn units_timeout(&self) -> Duration {
        Duration::from_secs(self.units_timeout_secs)
    }

    pub fn listing_timeout(&self) -> Duration {
        Duration::from_secs(self.listing_timeout_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            units_timeout_secs: defaults::units_timeout(),
            listing_timeout_secs: defaults::listing_timeout(),
            max_concurrent: defaults::max_concurrent(),
            accept_invalid_certs: defaults::accept_invalid_certs(),
        }
    }
}

/// Output file names, relative to the output directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "defaults::lectures_file")]
    pub lectures_file: String,

    #[serde(default = "defaults::courses_file")]
    pub courses_file: String,

    #[serde(default = "defaults::campuses_file")]
    pub campuses_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            lectures_file: defaults::lectures_file(),
            courses_file: defaults::courses_file(),
            campuses_file: defaults::campuses_file(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn base_url() -> String {
        "https://uspdigital.usp.br/jupiterweb/".into()
    }
    pub fn user_agent() -> String {
        "MatrUSPbot/2.0 (+https://github.com/matrusp/matrusp)".into()
    }
    pub fn timeout() -> u64 {
        60
    }
    pub fn units_timeout() -> u64 {
        60
    }
    pub fn listing_timeout() -> u64 {
        120
    }
    pub fn max_concurrent() -> usize {
        50
    }
    pub fn accept_invalid_certs() -> bool {
        true
    }

    // Output defaults
    pub fn lectures_file() -> String {
        "db.json".into()
    }
    pub fn courses_file() -> String {
        "cursos.json".into()
    }
    pub fn campuses_file() -> String {
        "campi.json".into()
    }
}
