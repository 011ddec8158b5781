//! Listing page fetcher and the category scrape loop.
//!
//! A run fetches every configured category in table order, one request at
//! a time, and hands each page to the [`bbc`] adapter:
//!
//! 1. **Fetching**: plain `GET` with default client options, see [`fetch_page`]
//! 2. **Extraction**: card markup to [`ArticleRecord`]s, see [`bbc::extract_articles`]
//!
//! The first failing category aborts the run; there is no retry and no
//! partial result.

pub mod bbc;

use crate::config::{Category, SiteConfig};
use crate::error::{NewsError, Result};
use crate::models::ArticleRecord;
use chrono::NaiveDateTime;
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::get;
use tracing::{info, instrument, warn};

/// Fetch a listing page and return its body.
///
/// The status code is not checked: an error page with a body is returned
/// like any other and left to the extractor.
///
/// # Arguments
///
/// * `url` - Absolute URL of the listing page
///
/// # Returns
///
/// The response body as text.
///
/// # Errors
///
/// [`NewsError::Http`] on transport failure (DNS, refused connection,
/// broken body).
#[instrument(level = "info")]
pub async fn fetch_page(url: &str) -> Result<String> {
    let http_err = |source| NewsError::Http {
        url: url.to_string(),
        source,
    };

    let response = get(url).await.map_err(http_err)?;
    let status = response.status();
    if !status.is_success() {
        warn!(%status, "Listing responded with non-success status; parsing body anyway");
    }

    let body = response.text().await.map_err(http_err)?;
    info!(bytes = body.len(), %status, "Fetched listing page");
    Ok(body)
}

/// Fetch and extract a single category listing.
///
/// # Arguments
///
/// * `category` - The configured category; its name labels every record
/// * `origin` - Prefix for card links
/// * `now` - Reference time for relative dates
///
/// # Returns
///
/// The category's records in document order, or the fetch or markup error.
#[instrument(level = "info", skip_all, fields(category = %category.name))]
pub async fn scrape_category(
    category: &Category,
    origin: &str,
    now: NaiveDateTime,
) -> Result<Vec<ArticleRecord>> {
    let html = fetch_page(&category.url).await?;
    let records = bbc::extract_articles(&html, &category.name, origin, now)?;
    info!(count = records.len(), "Scraped category");
    Ok(records)
}

/// Scrape every configured category sequentially into one table.
///
/// Records keep category-major order with document order inside each
/// category. Relative dates are resolved against `now`.
///
/// # Arguments
///
/// * `config` - Site origin and the categories in fetch order
/// * `now` - Reference time for relative dates
///
/// # Returns
///
/// The concatenated records, or the first error. Categories after a
/// failing one are not requested.
#[instrument(level = "info", skip_all, fields(categories = config.categories.len()))]
pub async fn scrape_all(config: &SiteConfig, now: NaiveDateTime) -> Result<Vec<ArticleRecord>> {
    let records: Vec<ArticleRecord> = stream::iter(&config.categories)
        .then(|category| scrape_category(category, &config.origin, now))
        .try_concat()
        .await?;

    info!(count = records.len(), "Scraped all categories");
    Ok(records)
}
