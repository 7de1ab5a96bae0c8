//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::storage::{Reviewer, RunCounters, RunRecord, RunStatus, UpsertOutcome};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to connect to database at {path}: {source}")]
    Connection {
        path: String,
        source: rusqlite::Error,
    },

    #[error("Failed to initialize schema: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("Failed to insert reviewer '{username}': {source}")]
    Upsert {
        username: String,
        source: rusqlite::Error,
    },

    #[error("Run not found: {0}")]
    RunNotFound(i64),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// The scraper only ever writes through `insert_reviewer` and the run
/// bookkeeping methods; the read methods exist for reporting.
pub trait Storage {
    // ===== Schema =====

    /// Creates the tables if they do not exist yet
    ///
    /// Failures are reported as `StorageError::Schema` and are fatal to a run.
    fn initialize_schema(&mut self) -> StorageResult<()>;

    // ===== Reviewers =====

    /// Inserts a reviewer unless the username is already stored
    ///
    /// Runs in its own transaction; on failure only this insert is rolled back.
    ///
    /// # Returns
    ///
    /// * `Ok(UpsertOutcome::Inserted)` - A new row was created
    /// * `Ok(UpsertOutcome::AlreadyPresent)` - The username existed, nothing changed
    /// * `Err(StorageError::Upsert)` - Any other database failure
    fn insert_reviewer(&mut self, username: &str) -> StorageResult<UpsertOutcome>;

    /// Gets a reviewer by username
    fn get_reviewer(&self, username: &str) -> StorageResult<Option<Reviewer>>;

    /// Counts stored reviewers
    fn count_reviewers(&self) -> StorageResult<u64>;

    /// Lists all stored usernames in insertion order
    fn list_usernames(&self) -> StorageResult<Vec<String>>;

    // ===== Run Management =====

    /// Records the start of a scrape run and returns its ID
    fn create_run(&mut self, config_hash: &str, start_page: u32, end_page: u32)
        -> StorageResult<i64>;

    /// Stores the final counters and status of a run
    fn finish_run(
        &mut self,
        run_id: i64,
        status: RunStatus,
        counters: &RunCounters,
    ) -> StorageResult<()>;

    /// Marks runs still flagged as running as interrupted
    ///
    /// Returns the number of runs updated.
    fn mark_interrupted_runs(&mut self) -> StorageResult<u64>;

    /// Gets a run by ID
    fn get_run(&self, run_id: i64) -> StorageResult<RunRecord>;

    /// Gets the most recent run
    fn get_latest_run(&self) -> StorageResult<Option<RunRecord>>;
}
