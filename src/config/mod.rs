//! Configuration module for Reviewer-Scrape
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every setting has a default, so running without a file scrapes the usual
//! page range into the usual database.
//!
//! # Example
//!
//! ```no_run
//! use reviewer_scrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scrape.toml")).unwrap();
//! println!("Database: {}", config.database.path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, DatabaseConfig, ScraperConfig, UserAgentConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_or_default};
pub use validation::validate;
