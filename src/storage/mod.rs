//! Storage module for persisting scraped reviewers
//!
//! This module handles all database operations for the scraper, including:
//! - Opening the single SQLite connection used for a run
//! - Idempotent schema creation
//! - Insert-or-ignore of reviewer usernames
//! - Run bookkeeping for end-of-run summaries

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

/// Represents a reviewer row
#[derive(Debug, Clone, PartialEq)]
pub struct Reviewer {
    pub id: i64,
    pub username: String,
    pub created_at: Option<String>,
    pub total_plays: i64,
    pub total_log_score: Option<f64>,
}

/// Result of an insert-or-ignore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new row was created
    Inserted,
    /// The username was already stored; nothing changed
    AlreadyPresent,
}

/// Counters accumulated during a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub pages_fetched: u32,
    pub pages_failed: u32,
    pub usernames_found: u32,
    pub reviewers_added: u32,
    pub duplicates: u32,
    pub upsert_failures: u32,
}

/// Represents a scrape run
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub id: i64,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub config_hash: String,
    pub start_page: u32,
    pub end_page: u32,
    pub status: RunStatus,
    pub counters: RunCounters,
}

/// Status of a scrape run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Completed,
    Interrupted,
}

impl RunStatus {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Interrupted => "interrupted",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            "interrupted" => Some(Self::Interrupted),
            _ => None,
        }
    }
}
