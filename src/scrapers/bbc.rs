//! BBC category listing adapter.
//!
//! Maps the card markup of a BBC section page into [`ArticleRecord`]s.
//!
//! # Markup Contract
//!
//! | Field | Source | Fallback |
//! |-------|--------|----------|
//! | candidate | any `article` or `div` carrying `data-testid` (any value) | |
//! | title | first `h3` or `h2` inside the candidate | candidate skipped |
//! | summary | first `p` | [`NO_SUMMARY`] |
//! | date | first `span[data-testid="card-metadata-lastupdated"]` | [`PublishedAt::Unknown`] |
//! | link | first `a[href]`, appended to the site origin | [`NO_LINK`] |
//!
//! A page that yields no candidates, or whose candidates yield no record,
//! no longer matches this contract and is reported as
//! [`NewsError::MarkupDrift`].

use crate::error::{NewsError, Result};
use crate::models::{ArticleRecord, NO_LINK, NO_SUMMARY, PublishedAt};
use crate::utils::{resolve_relative_time, truncate_for_log};
use chrono::NaiveDateTime;
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};

static CANDIDATE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article[data-testid], div[data-testid]").unwrap());
static HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h3, h2").unwrap());
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static LAST_UPDATED: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"span[data-testid="card-metadata-lastupdated"]"#).unwrap()
});
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Extract article records from one category listing page.
///
/// Candidates are visited in document order. A candidate without a
/// non-empty heading is skipped, and a title already seen on this page is
/// skipped (first occurrence wins). Relative dates are resolved against `now`.
///
/// # Errors
///
/// [`NewsError::MarkupDrift`] when the page has no candidate elements or
/// none of them carries a heading.
#[instrument(level = "debug", skip(html, origin, now), fields(bytes = html.len()))]
pub fn extract_articles(
    html: &str,
    category: &str,
    origin: &str,
    now: NaiveDateTime,
) -> Result<Vec<ArticleRecord>> {
    let document = Html::parse_document(html);
    let candidates: Vec<ElementRef> = document.select(&CANDIDATE).collect();

    if candidates.is_empty() {
        warn!(
            preview = %truncate_for_log(html, 300),
            "Listing has no data-testid cards"
        );
        return Err(NewsError::MarkupDrift {
            category: category.to_string(),
            reason: "no article or div elements carry data-testid".to_string(),
        });
    }

    let records: Vec<ArticleRecord> = candidates
        .iter()
        .filter_map(|card| heading_text(card).map(|title| (card, title)))
        .unique_by(|(_, title)| title.clone())
        .map(|(card, title)| ArticleRecord {
            title,
            date: published_at(card, now),
            summary: first_text(card, &PARAGRAPH).unwrap_or_else(|| NO_SUMMARY.to_string()),
            link: link(card, origin).unwrap_or_else(|| NO_LINK.to_string()),
            category: category.to_string(),
        })
        .collect();

    if records.is_empty() {
        warn!(
            candidates = candidates.len(),
            "Listing candidates carry no h2/h3 headings"
        );
        return Err(NewsError::MarkupDrift {
            category: category.to_string(),
            reason: format!("none of {} candidates carries a heading", candidates.len()),
        });
    }

    debug!(
        candidates = candidates.len(),
        records = records.len(),
        "Extracted listing records"
    );
    Ok(records)
}

fn heading_text(card: &ElementRef) -> Option<String> {
    first_text(card, &HEADING).filter(|title| !title.is_empty())
}

fn published_at(card: &ElementRef, now: NaiveDateTime) -> PublishedAt {
    match first_text(card, &LAST_UPDATED) {
        Some(text) => resolve_relative_time(&text, now),
        None => PublishedAt::Unknown,
    }
}

fn link(card: &ElementRef, origin: &str) -> Option<String> {
    card.select(&LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| format!("{origin}{href}"))
}

/// Text of the first descendant matching `selector`, each text node trimmed
/// and joined without separators.
fn first_text(card: &ElementRef, selector: &Selector) -> Option<String> {
    card.select(selector).next().map(|el| stripped_text(&el))
}

fn stripped_text(el: &ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .concat()
}
