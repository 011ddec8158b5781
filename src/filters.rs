//! Time-window and category filtering of the scraped table.
//!
//! Unknown publication times never satisfy an active time window: they are
//! kept only when the window is [`TimeWindow::All`].

use crate::models::{ArticleRecord, PublishedAt};
use chrono::{Duration, NaiveDateTime};
use clap::ValueEnum;
use std::fmt;

/// How far back an article may have been published to be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TimeWindow {
    /// No time filtering.
    #[default]
    All,
    /// Published within the last 24 hours.
    #[value(name = "24h")]
    Last24Hours,
    /// Published within the last 48 hours.
    #[value(name = "48h")]
    Last48Hours,
    /// Published within the last 7 days.
    #[value(name = "7d")]
    Last7Days,
}

impl TimeWindow {
    fn span(self) -> Option<Duration> {
        match self {
            TimeWindow::All => None,
            TimeWindow::Last24Hours => Some(Duration::hours(24)),
            TimeWindow::Last48Hours => Some(Duration::hours(48)),
            TimeWindow::Last7Days => Some(Duration::days(7)),
        }
    }

    /// Oldest publication time still inside the window, relative to `now`.
    pub fn cutoff(self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        self.span().map(|span| now - span)
    }

    /// Whether a record published at `date` is shown under this window.
    pub fn admits(self, date: &PublishedAt, now: NaiveDateTime) -> bool {
        match (self.cutoff(now), date) {
            (None, _) => true,
            (Some(cutoff), PublishedAt::Resolved(ts)) => *ts >= cutoff,
            (Some(_), PublishedAt::Unknown) => false,
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeWindow::All => "all",
            TimeWindow::Last24Hours => "24h",
            TimeWindow::Last48Hours => "48h",
            TimeWindow::Last7Days => "7d",
        };
        f.write_str(name)
    }
}

/// The user's selection: a time window and a category subset.
///
/// An empty `categories` list selects every category.
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    pub window: TimeWindow,
    pub categories: Vec<String>,
}

impl ArticleFilter {
    fn admits_category(&self, category: &str) -> bool {
        self.categories.is_empty() || self.categories.iter().any(|c| c == category)
    }

    /// Whether `record` survives both filters at time `now`.
    pub fn admits(&self, record: &ArticleRecord, now: NaiveDateTime) -> bool {
        self.window.admits(&record.date, now) && self.admits_category(&record.category)
    }
}

/// Keep the records that pass `filter`, preserving table order.
pub fn apply(
    records: Vec<ArticleRecord>,
    filter: &ArticleFilter,
    now: NaiveDateTime,
) -> Vec<ArticleRecord> {
    records
        .into_iter()
        .filter(|record| filter.admits(record, now))
        .collect()
}
