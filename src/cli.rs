//! Command-line interface definitions.
//!
//! The two selections of the digest (time window and category subset) are
//! flags; everything else is optional output and configuration.

use crate::filters::{ArticleFilter, TimeWindow};
use clap::Parser;

/// Command-line arguments for the BBC news digest.
///
/// # Examples
///
/// ```sh
/// # Everything from every category
/// bbc_news_digest
///
/// # World and Science from the last 24 hours, also written as JSON
/// bbc_news_digest -w 24h -C World -C Science -j ./json
///
/// # Alternate category table
/// bbc_news_digest --config ./sections.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Show articles from the last: all, 24h, 48h or 7d
    #[arg(short, long, value_enum, default_value_t = TimeWindow::All)]
    pub window: TimeWindow,

    /// Category to show (repeatable); all categories when omitted
    #[arg(short = 'C', long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// Optional path to a YAML file with the site origin and category table
    #[arg(short, long, env = "BBC_NEWS_CONFIG")]
    pub config: Option<String>,

    /// Output directory for the JSON digest
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Write the Markdown article list to this file instead of stdout
    #[arg(short, long)]
    pub markdown_output: Option<String>,
}

impl Cli {
    /// The filter selected on the command line.
    pub fn filter(&self) -> ArticleFilter {
        ArticleFilter {
            window: self.window,
            categories: self.categories.clone(),
        }
    }
}
