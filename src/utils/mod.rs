//! Utility functions and helpers.

pub mod http;
pub mod url;

use scraper::Selector;

use crate::error::{AppError, Result};

/// Parse a CSS selector, mapping failures into [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
