use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub scraping: ScrapingConfig,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScrapingConfig {
    pub base_url: String,
    /// Politeness delay observed before every page request.
    pub delay_ms: u64,
    pub timeout_seconds: u64,
    /// Safety bound on the page index, in case the site never serves an
    /// empty page.
    pub max_pages: usize,
    pub error_policy: ErrorPolicy,
}

/// What to do when fetching a listing page fails mid-run (other than a 404,
/// which always just ends pagination).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// End pagination and keep everything accumulated so far.
    Conservative,
    /// Abort the run; no output file is produced.
    Fatal,
}

/// All site-specific CSS selectors. The markup drifts over time, so these
/// live in config.yml rather than in code.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectorConfig {
    /// One company entry on a listing page.
    pub entry: String,
    /// The company name inside an entry.
    pub name: String,
    /// The detail blocks inside an entry; the first three are employee
    /// count, sector and headquarters, in that order.
    pub detail: String,
    /// Website and social media links inside an entry.
    pub link: String,
    /// Links inside the pagination nav, used to read the advertised total
    /// page count.
    pub pagenav: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scraping: ScrapingConfig {
                base_url: "https://greatplacetowork.es/certificadas/".to_string(),
                delay_ms: 5000,
                timeout_seconds: 30,
                max_pages: 200,
                error_policy: ErrorPolicy::Conservative,
            },
            selectors: SelectorConfig {
                entry: "article".to_string(),
                name: ".entry-title".to_string(),
                detail: "div.uvc-sub-heading.ult-responsive".to_string(),
                link: r#"a[data-toggle="tooltip"][href]"#.to_string(),
                pagenav: "div.pagenav a[href]".to_string(),
            },
            output: OutputConfig {
                path: "great_place_to_work_companies.csv".to_string(),
            },
        }
    }
}

pub async fn load_config(
    path: &str,
) -> std::result::Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}
