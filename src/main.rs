//! Reviewer-Scrape main entry point
//!
//! This is the command-line interface for the reviewer username scraper.

use anyhow::Context;
use clap::Parser;
use reviewer_scrape::config::{load_config_or_default, validate, Config};
use reviewer_scrape::output::{format_run_summary, load_statistics, print_statistics};
use reviewer_scrape::scrape::{planned_urls, run_scrape};
use reviewer_scrape::storage::SqliteStorage;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Reviewer-Scrape: collects board-game reviewer usernames
///
/// Walks the "users by number of reviews" listing page by page and stores
/// every username it has not seen before.
#[derive(Parser, Debug)]
#[command(name = "reviewer-scrape")]
#[command(version)]
#[command(about = "Collects board-game reviewer usernames", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG", env = "REVIEWER_SCRAPE_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file, overriding the configuration
    #[arg(long, value_name = "PATH", env = "REVIEWER_SCRAPE_DATABASE")]
    database: Option<String>,

    /// Listing site base URL, overriding the configuration
    #[arg(long, value_name = "URL", env = "REVIEWER_SCRAPE_BASE_URL")]
    base_url: Option<String>,

    /// First page to scrape, overriding the configuration
    #[arg(long, value_name = "N")]
    start_page: Option<u32>,

    /// Last page to scrape, overriding the configuration
    #[arg(long, value_name = "N")]
    end_page: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration and the pages that would be fetched
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_config_or_default(cli.config.as_deref()).with_context(|| {
        match &cli.config {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Failed to build default configuration".to_string(),
        }
    })?;
    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid configuration")?;

    if let Some(path) = &cli.config {
        tracing::info!("Configuration loaded from: {}", path.display());
    }

    if cli.dry_run {
        handle_dry_run(&config);
        Ok(())
    } else if cli.stats {
        handle_stats(&config)
    } else {
        handle_scrape(&config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("reviewer_scrape=info,warn"),
            1 => EnvFilter::new("reviewer_scrape=debug,info"),
            2 => EnvFilter::new("reviewer_scrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Command-line values take precedence over the configuration file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(database) = &cli.database {
        config.database.path = database.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.scraper.base_url = base_url.clone();
    }
    if let Some(start_page) = cli.start_page {
        config.scraper.start_page = start_page;
    }
    if let Some(end_page) = cli.end_page {
        config.scraper.end_page = end_page;
    }
}

/// Handles the --dry-run mode: shows what would be scraped
fn handle_dry_run(config: &Config) {
    println!("=== Reviewer-Scrape Dry Run ===\n");

    println!("Database: {}", config.database.path);
    println!("User agent: {}", config.user_agent.value);
    println!(
        "Delays: {}ms before each page, {}ms before each request",
        config.scraper.page_delay_ms, config.scraper.request_delay_ms
    );

    let urls = planned_urls(&config.scraper);
    println!(
        "\nPages {}..={} ({}):",
        config.scraper.start_page,
        config.scraper.end_page,
        config.scraper.page_count()
    );
    for url in &urls {
        println!("  - {}", url);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.database.path);

    let storage = SqliteStorage::open_read_only(Path::new(&config.database.path))?;
    let stats = load_statistics(&storage).context("Failed to read statistics")?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Scraping pages {}..={} of {}",
        config.scraper.start_page,
        config.scraper.end_page,
        config.scraper.base_url
    );

    match run_scrape(config).await {
        Ok(summary) => {
            if summary.counters.pages_failed > 0 || summary.counters.upsert_failures > 0 {
                tracing::warn!(
                    "{} page(s) and {} username(s) could not be processed",
                    summary.counters.pages_failed,
                    summary.counters.upsert_failures
                );
            }
            print!("{}", format_run_summary(&summary));
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape aborted: {}", e);
            Err(e.into())
        }
    }
}
