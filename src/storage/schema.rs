//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the Reviewer-Scrape database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Reviewers observed on the listing; aggregates are filled in downstream
CREATE TABLE IF NOT EXISTS reviewers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username VARCHAR(255) NOT NULL UNIQUE,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    total_plays INTEGER DEFAULT 0,
    total_log_score DECIMAL
);

-- One row per scrape invocation
CREATE TABLE IF NOT EXISTS scrape_runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    started_at TEXT NOT NULL,
    finished_at TEXT,
    config_hash TEXT NOT NULL,
    start_page INTEGER NOT NULL,
    end_page INTEGER NOT NULL,
    status TEXT NOT NULL,
    pages_fetched INTEGER NOT NULL DEFAULT 0,
    pages_failed INTEGER NOT NULL DEFAULT 0,
    usernames_found INTEGER NOT NULL DEFAULT 0,
    reviewers_added INTEGER NOT NULL DEFAULT 0,
    duplicates INTEGER NOT NULL DEFAULT 0,
    upsert_failures INTEGER NOT NULL DEFAULT 0
);
"#;

/// Insert-or-ignore on the username key
pub const INSERT_REVIEWER_SQL: &str =
    "INSERT INTO reviewers (username) VALUES (?1) ON CONFLICT (username) DO NOTHING";

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
