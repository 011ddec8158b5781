//! # BBC News Digest
//!
//! Scrapes the BBC section listing pages, extracts each article card into a
//! structured record, and renders the records as a filterable Markdown list.
//!
//! ## Usage
//!
//! ```sh
//! bbc_news_digest -w 24h -C World -C Technology
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetching**: one sequential `GET` per configured category
//! 2. **Extraction**: card markup to [`models::ArticleRecord`]s, relative dates resolved
//! 3. **Filtering**: time window and category subset
//! 4. **Output**: Markdown to stdout (or a file), optional JSON digest

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod filters;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use config::SiteConfig;
use models::NewsDigest;
use outputs::{json, markdown};
use utils::{ensure_writable_dir, format_timestamp, time_of_day};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init (stderr, stdout carries the digest) ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("bbc_news_digest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    if let Err(e) = run(&args).await {
        error!(error = %e, "Run failed");
        return Err(e.into());
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

async fn run(args: &Cli) -> error::Result<()> {
    let site = SiteConfig::load(args.config.as_deref())?;
    site.check_selection(&args.categories)?;

    // Fail before any request if the JSON digest could not be written
    if let Some(dir) = &args.json_output_dir {
        ensure_writable_dir(dir).await?;
    }

    // ---- Scrape ----
    let scraped_at = Local::now().naive_local();
    let records = scrapers::scrape_all(&site, scraped_at).await?;

    // ---- Filter ----
    let selection = args.filter();
    let rendered_at = Local::now().naive_local();
    let total = records.len();
    let articles = filters::apply(records, &selection, rendered_at);
    info!(
        total,
        shown = articles.len(),
        window = %selection.window,
        categories = ?selection.categories,
        "Applied filters"
    );

    // ---- Markdown ----
    let md = markdown::render(&articles);
    match &args.markdown_output {
        Some(path) => {
            tokio::fs::write(path, md).await?;
            info!(%path, "Wrote Markdown digest");
        }
        None => print!("{md}"),
    }

    // ---- JSON ----
    if let Some(dir) = &args.json_output_dir {
        let digest = NewsDigest {
            local_date: rendered_at.date().to_string(),
            edition: time_of_day(rendered_at.time()).to_string(),
            generated_at: format_timestamp(&rendered_at),
            window: selection.window.to_string(),
            categories: selection.categories,
            articles,
        };
        json::write_digest(&digest, dir).await?;
    }

    Ok(())
}
