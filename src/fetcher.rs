use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

use crate::config::ScrapingConfig;
use crate::error::{Result, ScrapeError};

/// One HTTP GET, no retries. Behind a trait so the pagination driver can be
/// exercised against static fixtures in tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScrapingConfig) -> Self {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (compatible; CertifiedScraper/1.0)")
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ScrapeError::PageNotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let html = response.text().await.map_err(|source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        })?;
        debug!("Fetched {} bytes from {}", html.len(), url);

        Ok(html)
    }
}
