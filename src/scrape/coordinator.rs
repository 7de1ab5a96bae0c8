//! Scrape coordinator - the page loop
//!
//! This module walks the configured page range in increasing order. For each
//! page it waits, fetches, extracts usernames and stores them. Per-page and
//! per-username failures are logged and counted. They never stop the loop.

use crate::config::{compute_config_hash, Config, ScraperConfig};
use crate::scrape::fetcher::{build_http_client, fetch_page, page_url, FetchError};
use crate::scrape::pacing::{DelayPolicy, FixedDelay};
use crate::scrape::parser::parse_listing;
use crate::storage::{RunCounters, RunStatus, Storage, UpsertOutcome};
use crate::ScrapeError;
use reqwest::Client;
use std::time::{Duration, Instant};

/// Outcome of one successfully fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageReport {
    pub page: u32,
    /// Usernames extracted from the page
    pub found: u32,
    /// Usernames that created a new row
    pub added: u32,
    /// Usernames that were already stored
    pub duplicates: u32,
    /// Usernames whose insert failed
    pub failed: u32,
    /// Containers without a usable link
    pub skipped: u32,
}

/// End-of-run report
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// ID of the `scrape_runs` row, if it could be recorded
    pub run_id: Option<i64>,
    pub pages_attempted: u32,
    pub counters: RunCounters,
    pub elapsed: Duration,
}

/// Main scrape coordinator structure
///
/// Borrows the storage for its whole lifetime; the caller owns the connection.
pub struct Coordinator<'s> {
    scraper: ScraperConfig,
    config_hash: String,
    client: Client,
    pacing: Box<dyn DelayPolicy>,
    storage: &'s mut dyn Storage,
}

impl<'s> Coordinator<'s> {
    /// Creates a new coordinator instance
    ///
    /// The storage must already have its schema initialized.
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(ScrapeError)` - The HTTP client could not be built or the
    ///   configuration could not be hashed
    pub fn new(config: &Config, storage: &'s mut dyn Storage) -> Result<Self, ScrapeError> {
        let client = build_http_client(&config.user_agent)?;
        let config_hash = compute_config_hash(config)?;

        Ok(Self {
            scraper: config.scraper.clone(),
            config_hash,
            client,
            pacing: Box::new(FixedDelay::from_config(&config.scraper)),
            storage,
        })
    }

    /// Replaces the delay policy built from the configuration
    pub fn with_delay_policy(mut self, pacing: Box<dyn DelayPolicy>) -> Self {
        self.pacing = pacing;
        self
    }

    /// Scrapes the configured inclusive page range
    pub async fn run(&mut self) -> Result<RunSummary, ScrapeError> {
        let pages = self.scraper.start_page..=self.scraper.end_page;
        self.run_pages(pages).await
    }

    /// Scrapes the given pages in the order supplied
    ///
    /// Fetch and insert failures are isolated to their page or username. Run
    /// bookkeeping is best effort: if the run row cannot be written the scrape
    /// still proceeds.
    pub async fn run_pages<I>(&mut self, pages: I) -> Result<RunSummary, ScrapeError>
    where
        I: IntoIterator<Item = u32>,
    {
        match self.storage.mark_interrupted_runs() {
            Ok(0) => {}
            Ok(n) => tracing::warn!("Marked {} unfinished previous run(s) as interrupted", n),
            Err(e) => tracing::warn!("Could not check for unfinished runs: {}", e),
        }

        let run_id = match self.storage.create_run(
            &self.config_hash,
            self.scraper.start_page,
            self.scraper.end_page,
        ) {
            Ok(id) => {
                tracing::info!("Starting scrape run {}", id);
                Some(id)
            }
            Err(e) => {
                tracing::warn!("Could not record scrape run: {}", e);
                None
            }
        };

        let start_time = Instant::now();
        let mut counters = RunCounters::default();
        let mut pages_attempted = 0;

        for page in pages {
            tracing::info!("Scraping page {}...", page);
            tokio::time::sleep(self.pacing.before_page(page)).await;
            pages_attempted += 1;

            match self.scrape_page(page).await {
                Ok(report) => {
                    tracing::debug!(
                        "Page {}: {} found, {} added, {} duplicates, {} failed",
                        page,
                        report.found,
                        report.added,
                        report.duplicates,
                        report.failed
                    );
                    record_page(&mut counters, &report);
                }
                Err(e) => {
                    tracing::error!("Error fetching page {}: {}", page, e);
                    counters.pages_failed += 1;
                }
            }
        }

        if let Some(id) = run_id {
            if let Err(e) = self.storage.finish_run(id, RunStatus::Completed, &counters) {
                tracing::warn!("Could not record results of run {}: {}", id, e);
            }
        }

        let summary = RunSummary {
            run_id,
            pages_attempted,
            counters,
            elapsed: start_time.elapsed(),
        };

        tracing::info!(
            "Scrape completed: {} pages fetched, {} failed, {} usernames found, {} new reviewers in {:?}",
            summary.counters.pages_fetched,
            summary.counters.pages_failed,
            summary.counters.usernames_found,
            summary.counters.reviewers_added,
            summary.elapsed
        );

        Ok(summary)
    }

    /// Fetches one page and stores every username on it
    ///
    /// # Returns
    ///
    /// * `Ok(PageReport)` - The page was fetched; insert failures are counted
    ///   in the report
    /// * `Err(FetchError)` - The page could not be fetched; nothing was stored
    pub async fn scrape_page(&mut self, page: u32) -> Result<PageReport, FetchError> {
        let url = page_url(&self.scraper.base_url, page);

        tokio::time::sleep(self.pacing.before_request(page)).await;
        let body = fetch_page(&self.client, &url).await?;

        let listing = parse_listing(&body);
        let mut report = PageReport {
            page,
            skipped: listing.skipped as u32,
            ..Default::default()
        };

        if listing.skipped > 0 {
            tracing::debug!(
                "Skipped {} username container(s) without a link on page {}",
                listing.skipped,
                page
            );
        }
        if listing.usernames.is_empty() {
            tracing::warn!("No usernames found on page {} ({})", page, url);
        }

        for username in &listing.usernames {
            report.found += 1;
            match self.storage.insert_reviewer(username) {
                Ok(UpsertOutcome::Inserted) => {
                    report.added += 1;
                    tracing::info!("Added username: {}", username);
                }
                Ok(UpsertOutcome::AlreadyPresent) => {
                    report.duplicates += 1;
                    tracing::info!("Username already stored: {}", username);
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!("{}", e);
                }
            }
        }

        Ok(report)
    }
}

fn record_page(counters: &mut RunCounters, report: &PageReport) {
    counters.pages_fetched += 1;
    counters.usernames_found += report.found;
    counters.reviewers_added += report.added;
    counters.duplicates += report.duplicates;
    counters.upsert_failures += report.failed;
}
