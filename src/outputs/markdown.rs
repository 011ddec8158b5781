//! Markdown rendering of the filtered article list.

use crate::models::ArticleRecord;
use std::fmt::Write;

pub const PAGE_TITLE: &str = "BBC News Dashboard";
pub const PAGE_DESCRIPTION: &str =
    "Explore the latest news articles from BBC with real-time updates.";
pub const LIST_HEADING: &str = "Latest BBC News Articles";

/// Render the page header followed by one block per record.
///
/// Each block lists title, publish time, summary, link and category in that
/// order, closed by a horizontal rule. Records are rendered in the order
/// given.
pub fn render(records: &[ArticleRecord]) -> String {
    let mut md = String::new();

    writeln!(md, "# {PAGE_TITLE}\n").unwrap();
    writeln!(md, "{PAGE_DESCRIPTION}\n").unwrap();
    writeln!(md, "## {LIST_HEADING}\n").unwrap();

    for record in records {
        md.push_str(&render_article(record));
    }
    md
}

fn render_article(record: &ArticleRecord) -> String {
    let mut md = String::new();
    writeln!(md, "### {}\n", record.title).unwrap();
    writeln!(md, "**Published on:** {}\n", record.date.display()).unwrap();
    writeln!(md, "{}\n", record.summary).unwrap();
    writeln!(md, "[Read more]({})\n", record.link).unwrap();
    writeln!(md, "**Category:** {}\n", record.category).unwrap();
    writeln!(md, "---\n").unwrap();
    md
}
