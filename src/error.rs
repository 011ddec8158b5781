//! Error type shared by the fetch, extraction, configuration and output stages.
//!
//! Only conditions that should stop a run are represented here. Per-article
//! anomalies (missing summary, missing link, unrecognized date phrase) are
//! absorbed by the extractor with placeholder values and never surface as errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsError {
    /// Transport-level failure while requesting a listing page.
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The listing page no longer matches the markup the extractor expects.
    #[error("markup drift on '{category}' listing: {reason}")]
    MarkupDrift { category: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NewsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_drift_message_names_category() {
        let err = NewsError::MarkupDrift {
            category: "World".to_string(),
            reason: "no candidate elements".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "markup drift on 'World' listing: no candidate elements"
        );
    }

    #[test]
    fn test_url_error_converts() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: NewsError = parse_err.into();
        assert!(matches!(err, NewsError::InvalidUrl(_)));
    }
}
