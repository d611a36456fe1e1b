// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::redirect::Policy;

use crate::error::Result;
use crate::models::CrawlerConfig;

/// Maximum redirects followed per request.
const MAX_REDIRECTS: usize = 10;

/// Anything that can return the body of a GET request.
///
/// Fetch services depend on this instead of a concrete client so they can be
/// driven by canned pages in tests.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// GET `url` with a per-request timeout and return the body text.
    async fn fetch_text(&self, url: &str, timeout: Duration) -> Result<String>;
}

#[async_trait]
impl PageSource for reqwest::Client {
    async fn fetch_text(&self, url: &str, timeout: Duration) -> Result<String> {
        fetch_page_async(self, url, timeout).await
    }
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .build()?;
    Ok(client)
}

/// Fetch a page asynchronously and return its body.
///
/// Non-success statuses are reported as errors.
pub async fn fetch_page_async(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<String> {
    let text = client
        .get(url)
        .timeout(timeout)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(text)
}
