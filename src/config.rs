//! Site configuration: the link origin and the category table.
//!
//! The built-in table covers the ten BBC sections. A YAML file with the same
//! shape can replace it:
//!
//! ```yaml
//! origin: https://www.bbc.com
//! categories:
//!   - name: World
//!     url: https://www.bbc.com/news/world
//! ```

use crate::error::{NewsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, instrument};
use url::Url;

/// Origin prepended to the relative `href` of every article card.
pub const BBC_ORIGIN: &str = "https://www.bbc.com";

const BBC_CATEGORIES: [(&str, &str); 10] = [
    ("World", "https://www.bbc.com/news/world"),
    ("Business", "https://www.bbc.com/news/business"),
    ("Technology", "https://www.bbc.com/news/technology"),
    (
        "Artificial intelligence",
        "https://www.bbc.com/innovation/artificial-intelligence",
    ),
    ("Innovation", "https://www.bbc.com/innovation"),
    ("Travel", "https://www.bbc.com/travel"),
    ("Culture", "https://www.bbc.com/culture"),
    ("Arts", "https://www.bbc.com/arts"),
    ("Earth", "https://www.bbc.com/future-planet"),
    ("Science", "https://www.bbc.com/innovation/science"),
];

/// A named news section and the listing page it is scraped from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Prefix for card links, without a trailing slash.
    pub origin: String,
    /// Categories in fetch order.
    pub categories: Vec<Category>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: BBC_ORIGIN.to_string(),
            categories: BBC_CATEGORIES
                .iter()
                .map(|(name, url)| Category {
                    name: name.to_string(),
                    url: url.to_string(),
                })
                .collect(),
        }
    }
}

impl SiteConfig {
    /// Load the configuration from `path`, or fall back to the built-in table.
    #[instrument(level = "info")]
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                let config = Self::from_yaml(&text)?;
                info!(path, categories = config.categories.len(), "Loaded site configuration");
                config
            }
            None => Self::default(),
        };
        Ok(config)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: SiteConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        Url::parse(&self.origin)?;
        if self.origin.ends_with('/') {
            return Err(NewsError::Config(format!(
                "origin '{}' must not end with '/'",
                self.origin
            )));
        }
        if self.categories.is_empty() {
            return Err(NewsError::Config("no categories configured".to_string()));
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(NewsError::Config("category with empty name".to_string()));
            }
            if !seen.insert(category.name.as_str()) {
                return Err(NewsError::Config(format!(
                    "duplicate category '{}'",
                    category.name
                )));
            }
            Url::parse(&category.url)?;
        }
        Ok(())
    }

    /// Check that every requested name is a configured category.
    pub fn check_selection(&self, selected: &[String]) -> Result<()> {
        match selected
            .iter()
            .find(|name| !self.categories.iter().any(|c| &c.name == *name))
        {
            Some(unknown) => Err(NewsError::UnknownCategory(unknown.clone())),
            None => Ok(()),
        }
    }
}
