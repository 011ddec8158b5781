//! Time resolution, timestamp formatting and file system helpers.
//!
//! - Relative-time resolution for card metadata ("3 hrs ago")
//! - The canonical second-precision timestamp text format
//! - Edition naming from the local time of a run
//! - Output directory validation

use crate::models::PublishedAt;
use chrono::{Duration, NaiveDateTime, NaiveTime, SubsecRound};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Text format of a resolved publication time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)").unwrap());

/// Resolve a card's relative-time phrase against `now`.
///
/// Only two phrasings are recognized:
/// - text containing `"hrs ago"`: the first integer is a number of hours
/// - text containing `"mins ago"`: the first integer is a number of minutes
///
/// The hours check wins when both appear. Anything else, including a
/// recognized phrase without digits or with an out-of-range number,
/// resolves to [`PublishedAt::Unknown`]. Resolved values are truncated to
/// whole seconds.
///
/// # Arguments
///
/// * `text` - The stripped text of the card's last-updated marker
/// * `now` - The scrape time the phrase is relative to
///
/// # Returns
///
/// [`PublishedAt::Resolved`] with `now` minus the elapsed time, or
/// [`PublishedAt::Unknown`].
///
/// # Examples
///
/// ```ignore
/// let t = resolve_relative_time("3 hrs ago", now);
/// assert_eq!(t, PublishedAt::Resolved((now - Duration::hours(3)).trunc_subsecs(0)));
/// assert_eq!(resolve_relative_time("yesterday", now), PublishedAt::Unknown);
/// ```
pub fn resolve_relative_time(text: &str, now: NaiveDateTime) -> PublishedAt {
    let elapsed = if text.contains("hrs ago") {
        first_number(text).and_then(Duration::try_hours)
    } else if text.contains("mins ago") {
        first_number(text).and_then(Duration::try_minutes)
    } else {
        None
    };

    elapsed
        .and_then(|delta| now.checked_sub_signed(delta))
        .map(|ts| PublishedAt::Resolved(ts.trunc_subsecs(0)))
        .unwrap_or(PublishedAt::Unknown)
}

fn first_number(text: &str) -> Option<i64> {
    FIRST_NUMBER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Format a timestamp as [`TIMESTAMP_FORMAT`] text.
///
/// Sub-second precision is dropped, so parsing the result with
/// [`parse_timestamp`] yields the input truncated to whole seconds.
///
/// # Arguments
///
/// * `ts` - The timestamp to format
///
/// # Returns
///
/// Text such as `"2025-05-06 14:30:00"`.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse [`TIMESTAMP_FORMAT`] text back into a timestamp.
///
/// # Arguments
///
/// * `text` - Text produced by [`format_timestamp`]
///
/// # Returns
///
/// The parsed timestamp, or a `chrono` parse error for any other format.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
}

/// Classify a local time into morning, afternoon, or evening.
///
/// - **Morning**: 00:00 - 08:00
/// - **Afternoon**: 08:00 - 16:00
/// - **Evening**: 16:00 - 24:00
///
/// # Arguments
///
/// * `tod` - Local wall-clock time of the run
///
/// # Returns
///
/// `"morning"`, `"afternoon"`, or `"evening"`.
pub fn time_of_day(tod: NaiveTime) -> &'static str {
    let morning_high = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
    let afternoon_high = NaiveTime::from_hms_opt(16, 0, 0).unwrap();

    let which = if tod < morning_high {
        "morning"
    } else if tod < afternoon_high {
        "afternoon"
    } else {
        "evening"
    };
    tracing::debug!(%tod, %which, "Computed time_of_day");
    which
}

/// Truncate a string for logging purposes.
///
/// Strings longer than `max` bytes are cut on a char boundary and suffixed
/// with `"…(+N bytes)"`.
///
/// # Arguments
///
/// * `s` - The string to potentially truncate
/// * `max` - Maximum number of bytes to keep
///
/// # Returns
///
/// The original string if it fits, otherwise the truncated version.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then creates and removes a probe file.
///
/// # Arguments
///
/// * `path` - The directory path to validate
///
/// # Errors
///
/// Returns the IO error if the directory cannot be created or written to
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> std::io::Result<()> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 6)
            .unwrap()
            .and_hms_milli_opt(12, 0, 30, 750)
            .unwrap()
    }

    fn truncated(ts: NaiveDateTime) -> NaiveDateTime {
        ts.trunc_subsecs(0)
    }

    #[test]
    fn test_resolve_hours() {
        let now = reference();
        assert_eq!(
            resolve_relative_time("3 hrs ago", now),
            PublishedAt::Resolved(truncated(now - Duration::hours(3)))
        );
    }

    #[test]
    fn test_resolve_minutes() {
        let now = reference();
        assert_eq!(
            resolve_relative_time("45 mins ago", now),
            PublishedAt::Resolved(truncated(now - Duration::minutes(45)))
        );
    }

    #[test]
    fn test_resolved_value_has_no_subseconds() {
        let resolved = resolve_relative_time("1 mins ago", reference()).resolved().unwrap();
        assert_eq!(
            resolved,
            NaiveDate::from_ymd_opt(2025, 5, 6)
                .unwrap()
                .and_hms_opt(11, 59, 30)
                .unwrap()
        );
    }

    #[test]
    fn test_resolve_unrecognized_phrases() {
        let now = reference();
        assert_eq!(resolve_relative_time("yesterday", now), PublishedAt::Unknown);
        assert_eq!(resolve_relative_time("2 days ago", now), PublishedAt::Unknown);
        // singular forms are not part of the recognized vocabulary
        assert_eq!(resolve_relative_time("1 hr ago", now), PublishedAt::Unknown);
        assert_eq!(resolve_relative_time("", now), PublishedAt::Unknown);
    }

    #[test]
    fn test_resolve_without_digits_is_unknown() {
        assert_eq!(
            resolve_relative_time("some hrs ago", reference()),
            PublishedAt::Unknown
        );
    }

    #[test]
    fn test_resolve_out_of_range_is_unknown() {
        assert_eq!(
            resolve_relative_time("99999999999999999999 hrs ago", reference()),
            PublishedAt::Unknown
        );
        assert_eq!(
            resolve_relative_time("9223372036854775807 hrs ago", reference()),
            PublishedAt::Unknown
        );
    }

    #[test]
    fn test_resolve_uses_first_number() {
        let now = reference();
        assert_eq!(
            resolve_relative_time("Updated 2 hrs ago (was 5)", now),
            PublishedAt::Resolved(truncated(now - Duration::hours(2)))
        );
    }

    #[test]
    fn test_timestamp_text_round_trip_truncates() {
        let now = reference();
        let parsed = parse_timestamp(&format_timestamp(&now)).unwrap();
        assert_eq!(parsed, truncated(now));
    }

    #[test]
    fn test_parse_timestamp_rejects_other_formats() {
        assert!(parse_timestamp("2025-05-06T12:00:00").is_err());
        assert!(parse_timestamp("Unknown date").is_err());
    }

    #[test]
    fn test_time_of_day_boundaries() {
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert_eq!(time_of_day(t(0, 0)), "morning");
        assert_eq!(time_of_day(t(7, 59)), "morning");
        assert_eq!(time_of_day(t(8, 0)), "afternoon");
        assert_eq!(time_of_day(t(15, 59)), "afternoon");
        assert_eq!(time_of_day(t(16, 0)), "evening");
        assert_eq!(time_of_day(t(23, 59)), "evening");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundary() {
        let result = truncate_for_log("ééé", 3);
        assert_eq!(result, "é…(+4 bytes)");
    }
}
