//! Output generation for the filtered digest.
//!
//! # Submodules
//!
//! - [`markdown`]: renders the article list shown to the reader
//! - [`json`]: writes the digest to a dated JSON file
//!
//! # Output Structure
//!
//! ```text
//! stdout (or --markdown-output)      # rendered article list
//!
//! json_output_dir/
//! └── 2025-05-06/
//!     └── afternoon.json
//! ```

pub mod json;
pub mod markdown;
