//! Reviewer-Scrape: a polite collector of board-game reviewer usernames
//!
//! This crate walks the paginated "users by number of reviews" listing, extracts
//! every reviewer username from each page and records the unique ones in a
//! SQLite `reviewers` table for downstream recommendation work.

pub mod config;
pub mod output;
pub mod scrape;
pub mod storage;

use thiserror::Error;

/// Main error type for Reviewer-Scrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] scrape::FetchError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Reviewer-Scrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

// Re-export commonly used types
pub use config::Config;
pub use scrape::{extract_usernames, run_scrape, RunSummary};
pub use storage::{Reviewer, SqliteStorage, Storage, StorageError, UpsertOutcome};
