use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{ErrorPolicy, ScrapingConfig};
use crate::error::{Result, ScrapeError};
use crate::extractor::CompanyExtractor;
use crate::fetcher::PageFetcher;
use crate::models::Dataset;

/// Walks the listing pages in order, one at a time, and accumulates the
/// extracted records. Built fresh per run; holds no global state.
pub struct ScrapeRunner {
    config: ScrapingConfig,
    fetcher: Box<dyn PageFetcher>,
    extractor: CompanyExtractor,
    interrupted: Arc<AtomicBool>,
}

impl ScrapeRunner {
    pub fn new(
        config: ScrapingConfig,
        fetcher: Box<dyn PageFetcher>,
        extractor: CompanyExtractor,
        interrupted: Arc<AtomicBool>,
    ) -> Self {
        Self {
            config,
            fetcher,
            extractor,
            interrupted,
        }
    }

    /// Runs until the site stops yielding entries. Pagination ends on the
    /// first empty page or a 404; a fetch failure either ends it early
    /// (conservative policy) or aborts the run (fatal policy). An interrupt
    /// stops between pages, keeping everything accumulated so far.
    pub async fn run(&self) -> Result<Dataset> {
        let base = Url::parse(&self.config.base_url)
            .map_err(|e| ScrapeError::InvalidUrl(self.config.base_url.clone(), e))?;

        let mut dataset = Dataset::new();
        let mut advertised_pages: Option<usize> = None;
        let mut page = 1usize;

        loop {
            if self.interrupted.load(Ordering::SeqCst) {
                warn!(
                    "Interrupted; stopping with {} pages collected",
                    dataset.pages_processed
                );
                break;
            }
            if page > self.config.max_pages {
                info!("Reached max_pages bound ({}), stopping", self.config.max_pages);
                break;
            }
            if let Some(total) = advertised_pages {
                if page > total {
                    debug!("Past the {} pages the site advertises, stopping", total);
                    break;
                }
            }

            // Politeness delay before every request, so the source server is
            // never hit back to back.
            tokio::time::sleep(Duration::from_millis(self.config.delay_ms)).await;

            let url = page_url(&base, page);
            let html = match self.fetcher.fetch(&url).await {
                Ok(html) => html,
                Err(ScrapeError::PageNotFound { .. }) => {
                    debug!("Page {} does not exist, pagination complete", page);
                    break;
                }
                Err(e) => match self.config.error_policy {
                    ErrorPolicy::Fatal => return Err(e),
                    ErrorPolicy::Conservative => {
                        warn!("Failed to fetch page {}: {}. Ending pagination.", page, e);
                        dataset.pages_failed += 1;
                        break;
                    }
                },
            };

            let result = self.extractor.extract_page(&html);
            if page == 1 {
                advertised_pages = result.total_pages;
                if let Some(total) = advertised_pages {
                    info!("Site advertises {} listing pages", total);
                }
            }
            if result.records.is_empty() {
                info!("Page {} has no company entries, pagination complete", page);
                break;
            }

            info!("Page {}: {} companies", page, result.records.len());
            dataset.records.extend(result.records);
            dataset.pages_processed += 1;
            page += 1;
        }

        Ok(dataset)
    }
}

/// Page 1 is the base URL itself; page N is `{base}page/{N}/`, matching the
/// site's pagination scheme.
fn page_url(base: &Url, page: usize) -> String {
    let mut url = base.to_string();
    if page == 1 {
        return url;
    }
    if !url.ends_with('/') {
        url.push('/');
    }
    format!("{}page/{}/", url, page)
}
