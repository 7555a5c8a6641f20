use clap::Parser;

use crate::config::{Config, ErrorPolicy};

/// Scrapes the certified-companies listing into a CSV file.
///
/// Every flag overrides the corresponding config.yml value; unset flags
/// leave the config untouched.
#[derive(Debug, Parser)]
#[command(name = "certified-scraper", version)]
pub struct Args {
    /// Base URL of the listing (page 1).
    #[arg(long)]
    pub url: Option<String>,

    /// Where to write the CSV.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to the YAML configuration file.
    #[arg(long, default_value = "config.yml")]
    pub config: String,

    /// Politeness delay between page requests, in milliseconds.
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Safety bound on the page index.
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// How to handle a failed page fetch mid-run.
    #[arg(long, value_enum)]
    pub error_policy: Option<ErrorPolicy>,
}

impl Args {
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.scraping.base_url = url.clone();
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(delay_ms) = self.delay_ms {
            config.scraping.delay_ms = delay_ms;
        }
        if let Some(max_pages) = self.max_pages {
            config.scraping.max_pages = max_pages;
        }
        if let Some(policy) = self.error_policy {
            config.scraping.error_policy = policy;
        }
    }
}
