use clap::Parser;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod error;
mod export;
mod extractor;
mod fetcher;
mod models;
mod pagination;

use config::{load_config, Config};
use extractor::CompanyExtractor;
use fetcher::HttpFetcher;
use pagination::ScrapeRunner;
use tokio::signal;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = cli::Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("certified_scraper=info")),
        )
        .init();

    let mut config = match load_config(&args.config).await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load {}: {}. Using defaults.", args.config, e);
            Config::default()
        }
    };
    args.apply(&mut config);

    // Ctrl+C flips a flag the runner checks between pages, so a stopped run
    // still writes everything collected so far.
    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let flag = interrupted.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                warn!("Received Ctrl+C, finishing current page and writing partial results...");
                flag.store(true, Ordering::SeqCst);
            }
        });
    }

    let extractor = CompanyExtractor::new(&config.selectors)?;
    let fetcher = HttpFetcher::new(&config.scraping);
    let runner = ScrapeRunner::new(
        config.scraping.clone(),
        Box::new(fetcher),
        extractor,
        interrupted,
    );

    info!("🕷️  Scraping {}", config.scraping.base_url);
    let dataset = runner.run().await?;

    export::export_csv(&dataset, &config.output.path)?;

    info!(
        "✅ Done: {} companies from {} pages ({} pages failed) -> {}",
        dataset.records.len(),
        dataset.pages_processed,
        dataset.pages_failed,
        config.output.path
    );

    Ok(())
}
