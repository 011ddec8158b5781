//! JSON output of the run's digest.
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── morning.json
//!     ├── afternoon.json
//!     └── evening.json
//! ```
//!
//! A later run in the same edition overwrites the earlier file.

use crate::error::Result;
use crate::models::NewsDigest;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `digest` to `{json_output_dir}/{local_date}/{edition}.json`.
///
/// Creates the dated directory if needed and overwrites an existing file.
///
/// # Arguments
///
/// * `digest` - The filtered records and run metadata to serialize
/// * `json_output_dir` - Base directory for JSON output
///
/// # Returns
///
/// The path of the written file, or the serialization or IO error.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_digest(digest: &NewsDigest, json_output_dir: &str) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(digest)?;

    let full_json_dir = Path::new(json_output_dir).join(&digest.local_date);
    info!(full_json_dir = %full_json_dir.display(), "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(full_json_dir = %full_json_dir.display(), error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = full_json_dir.join(format!("{}.json", digest.edition));
    fs::write(&path, json).await?;
    info!(path = %path.display(), articles = digest.articles.len(), "Wrote JSON digest");

    Ok(path)
}
