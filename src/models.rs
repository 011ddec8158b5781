//! Data models for scraped listing entries and the digest produced by a run.
//!
//! - [`ArticleRecord`]: one article card extracted from a category listing page
//! - [`PublishedAt`]: the resolved publication time, or an explicit unknown
//! - [`NewsDigest`]: the filtered records of one run, serialized to JSON

use crate::utils::{format_timestamp, parse_timestamp};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Summary text used when a card carries no paragraph.
pub const NO_SUMMARY: &str = "No summary available";
/// Link text used when a card carries no anchor with an `href`.
pub const NO_LINK: &str = "No link available";
/// Shown in place of a publication time that could not be resolved.
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Publication time of an article card.
///
/// Listing pages only expose relative phrases such as "3 hrs ago". When the
/// phrase is recognized it is resolved against the scrape time and kept at
/// whole-second precision; anything else is [`PublishedAt::Unknown`].
///
/// Serialized as `"%Y-%m-%d %H:%M:%S"` text, or `null` when unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Option<String>", try_from = "Option<String>")]
pub enum PublishedAt {
    Resolved(NaiveDateTime),
    Unknown,
}

impl PublishedAt {
    /// The resolved timestamp, if any.
    pub fn resolved(&self) -> Option<NaiveDateTime> {
        match self {
            PublishedAt::Resolved(ts) => Some(*ts),
            PublishedAt::Unknown => None,
        }
    }

    /// Human-readable form used by the Markdown renderer (minute precision).
    pub fn display(&self) -> String {
        match self {
            PublishedAt::Resolved(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
            PublishedAt::Unknown => UNKNOWN_DATE.to_string(),
        }
    }
}

impl From<PublishedAt> for Option<String> {
    fn from(value: PublishedAt) -> Self {
        value.resolved().map(|ts| format_timestamp(&ts))
    }
}

impl TryFrom<Option<String>> for PublishedAt {
    type Error = chrono::ParseError;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        match value {
            Some(text) => parse_timestamp(&text).map(PublishedAt::Resolved),
            None => Ok(PublishedAt::Unknown),
        }
    }
}

impl fmt::Display for PublishedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishedAt::Resolved(ts) => f.write_str(&format_timestamp(ts)),
            PublishedAt::Unknown => f.write_str(UNKNOWN_DATE),
        }
    }
}

/// One article card scraped from a category listing page.
///
/// `category` is assigned by the fetch loop from the configured category
/// table, never derived from the page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Card headline. Unique within one category's scrape.
    pub title: String,
    /// Resolved publication time, or unknown.
    pub date: PublishedAt,
    /// First paragraph of the card, or [`NO_SUMMARY`].
    pub summary: String,
    /// Absolute article URL, or [`NO_LINK`].
    pub link: String,
    /// Name of the category whose listing produced this card.
    pub category: String,
}

/// The filtered output of a single run.
///
/// # Edition Naming
///
/// `edition` follows the local time of the run:
/// - `"morning"`: 00:00 - 08:00
/// - `"afternoon"`: 08:00 - 16:00
/// - `"evening"`: 16:00 - 24:00
#[derive(Debug, Serialize, Deserialize)]
pub struct NewsDigest {
    /// Local date of the run in `YYYY-MM-DD` format.
    pub local_date: String,
    /// Edition name derived from the local time of the run.
    pub edition: String,
    /// Local time the digest was generated, `%Y-%m-%d %H:%M:%S`.
    pub generated_at: String,
    /// Time window that was applied (`all`, `24h`, `48h`, `7d`).
    pub window: String,
    /// Categories that were selected; empty means all.
    pub categories: Vec<String>,
    /// Surviving records in table order.
    pub articles: Vec<ArticleRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 6)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn record(date: PublishedAt) -> ArticleRecord {
        ArticleRecord {
            title: "Test Article".to_string(),
            date,
            summary: NO_SUMMARY.to_string(),
            link: "https://www.bbc.com/news/articles/abc123".to_string(),
            category: "World".to_string(),
        }
    }

    #[test]
    fn test_published_at_display() {
        assert_eq!(
            PublishedAt::Resolved(at(14, 30, 59)).display(),
            "2025-05-06 14:30"
        );
        assert_eq!(PublishedAt::Unknown.display(), "Unknown date");
    }

    #[test]
    fn test_article_record_serialization_resolved() {
        let json = serde_json::to_string(&record(PublishedAt::Resolved(at(8, 0, 5)))).unwrap();
        assert!(json.contains(r#""date":"2025-05-06 08:00:05""#));
        assert!(json.contains(r#""category":"World""#));
    }

    #[test]
    fn test_article_record_serialization_unknown() {
        let json = serde_json::to_string(&record(PublishedAt::Unknown)).unwrap();
        assert!(json.contains(r#""date":null"#));
    }

    #[test]
    fn test_article_record_deserialization() {
        let json = r#"{
            "title": "Headline",
            "date": "2025-05-06 20:30:00",
            "summary": "Summary here",
            "link": "https://www.bbc.com/news/articles/x",
            "category": "Business"
        }"#;

        let article: ArticleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "Headline");
        assert_eq!(article.date, PublishedAt::Resolved(at(20, 30, 0)));
        assert_eq!(article.category, "Business");
    }

    #[test]
    fn test_article_record_rejects_malformed_date() {
        let json = r#"{
            "title": "Headline",
            "date": "3 hrs ago",
            "summary": "",
            "link": "",
            "category": "Business"
        }"#;

        assert!(serde_json::from_str::<ArticleRecord>(json).is_err());
    }

    #[test]
    fn test_digest_serialization() {
        let digest = NewsDigest {
            local_date: "2025-05-06".to_string(),
            edition: "evening".to_string(),
            generated_at: "2025-05-06 20:30:00".to_string(),
            window: "24h".to_string(),
            categories: vec!["World".to_string()],
            articles: vec![record(PublishedAt::Unknown)],
        };

        let json = serde_json::to_string(&digest).unwrap();
        assert!(json.contains("2025-05-06"));
        assert!(json.contains("evening"));
        assert!(json.contains("Test Article"));
    }
}
