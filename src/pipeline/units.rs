// src/pipeline/units.rs

//! Unit discovery and per-unit enumeration shared by both pipelines.

use std::future::Future;

use futures::future::join_all;

use crate::error::{AppError, Result};
use crate::models::UnitDirectory;
use crate::services::ListingFetcher;

/// Fetch every unit and build the read-only directory.
pub async fn load_units(listing: &ListingFetcher) -> Result<UnitDirectory> {
    let units = UnitDirectory::new(listing.fetch_units().await?);
    if units.is_empty() {
        return Err(AppError::crawl("unit listing", "no units found"));
    }
    log::info!("Found {} units", units.len());
    Ok(units)
}

/// Unit codes to enumerate: the requested ones, or every known unit.
///
/// Requested codes are used as given, even if the directory lacks them.
pub fn target_units(units: &UnitDirectory, requested: Option<&[String]>) -> Vec<String> {
    match requested {
        Some(codes) if !codes.is_empty() => {
            for code in codes {
                if units.name_of(code).is_none() {
                    log::warn!("Unit {} is not in the unit listing", code);
                }
            }
            codes.to_vec()
        }
        _ => units.codes(),
    }
}

/// Run `fetch` for every unit at once and concatenate the results in unit
/// order.
///
/// A unit whose listing fails contributes nothing.
pub async fn enumerate<T, F, Fut>(codes: &[String], fetch: F) -> Vec<T>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let fetches = codes.iter().map(|code| {
        let pending = fetch(code.clone());
        async move { (code, pending.await) }
    });

    let mut items = Vec::new();
    for (code, result) in join_all(fetches).await {
        match result {
            Ok(found) => {
                log::debug!("Unit {}: {} items", code, found.len());
                items.extend(found);
            }
            Err(error) => log::warn!("Failed to list unit {}: {}", code, error),
        }
    }
    items
}
