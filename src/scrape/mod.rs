//! Scrape module for collecting reviewer usernames
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching of listing pages
//! - Username extraction from listing HTML
//! - Request pacing
//! - The page loop that ties them to storage

mod coordinator;
mod fetcher;
mod pacing;
mod parser;

pub use coordinator::{Coordinator, PageReport, RunSummary};
pub use fetcher::{build_http_client, fetch_page, page_url, FetchError, LISTING_PATH};
pub use pacing::{DelayPolicy, FixedDelay};
pub use parser::{extract_usernames, parse_listing, ParsedListing};

use crate::config::{Config, ScraperConfig};
use crate::storage::{SqliteStorage, Storage};
use crate::Result;
use std::path::Path;

/// Runs a complete scrape
///
/// This is the main entry point. It will:
/// 1. Open the database connection (fatal on failure; nothing to release)
/// 2. Initialize the schema (fatal on failure)
/// 3. Scrape every configured page in order
/// 4. Close the connection, on success and on failure alike
///
/// # Returns
///
/// * `Ok(RunSummary)` - Every page was attempted
/// * `Err(ScrapeError)` - Setup failed and no page was scraped
pub async fn run_scrape(config: &Config) -> Result<RunSummary> {
    let path = Path::new(&config.database.path);
    let mut storage = SqliteStorage::open(path)?;
    tracing::info!("Connected to database at {}", path.display());

    let result = scrape_into(config, &mut storage).await;

    match storage.close() {
        Ok(()) => tracing::info!("Database connection closed"),
        Err(e) => tracing::warn!("Error while closing database connection: {}", e),
    }

    result
}

/// Initializes the schema on an open store and scrapes into it
///
/// The caller keeps ownership of the store and is responsible for releasing it.
pub async fn scrape_into(
    config: &Config,
    storage: &mut dyn Storage,
) -> Result<RunSummary> {
    if let Err(e) = storage.initialize_schema() {
        tracing::error!("{}", e);
        return Err(e.into());
    }

    let mut coordinator = Coordinator::new(config, storage)?;
    coordinator.run().await
}

/// Lists the URLs a run with this configuration would fetch, in order
pub fn planned_urls(config: &ScraperConfig) -> Vec<String> {
    (config.start_page..=config.end_page)
        .map(|page| page_url(&config.base_url, page))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planned_urls_default_range() {
        let config = ScraperConfig::default();
        let urls = planned_urls(&config);
        assert_eq!(urls.len(), 20);
        assert_eq!(urls.len() as u64, config.page_count());
        assert_eq!(
            urls[0],
            "https://boardgamegeek.com/browse/user/numreviews/page/11"
        );
        assert_eq!(
            urls[19],
            "https://boardgamegeek.com/browse/user/numreviews/page/30"
        );
    }

    #[test]
    fn test_planned_urls_single_page() {
        let config = ScraperConfig {
            start_page: 5,
            end_page: 5,
            ..Default::default()
        };
        assert_eq!(
            planned_urls(&config),
            vec!["https://boardgamegeek.com/browse/user/numreviews/page/5".to_string()]
        );
    }
}
