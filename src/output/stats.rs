//! Statistics from the reviewer database
//!
//! This module provides functionality for extracting and displaying
//! scrape statistics from the storage layer.

use crate::storage::{RunRecord, Storage, StorageError};

/// Reviewer database summary
#[derive(Debug, Clone)]
pub struct ReviewerStatistics {
    /// Number of distinct reviewers stored
    pub total_reviewers: u64,

    /// The most recent scrape run, if any was recorded
    pub latest_run: Option<RunRecord>,
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `storage` - The storage backend to query
///
/// # Returns
///
/// * `Ok(ReviewerStatistics)` - Successfully loaded statistics
/// * `Err(StorageError)` - Failed to query statistics
pub fn load_statistics(storage: &dyn Storage) -> Result<ReviewerStatistics, StorageError> {
    Ok(ReviewerStatistics {
        total_reviewers: storage.count_reviewers()?,
        latest_run: storage.get_latest_run()?,
    })
}

/// Renders statistics as the text printed by `--stats`
pub fn format_statistics(stats: &ReviewerStatistics) -> String {
    let mut out = String::new();

    out.push_str("=== Reviewer Statistics ===\n\n");
    out.push_str(&format!("Total reviewers: {}\n", stats.total_reviewers));

    match &stats.latest_run {
        Some(run) => {
            let c = &run.counters;
            out.push_str(&format!("\nLatest Run (#{}):\n", run.id));
            out.push_str(&format!("  Status: {}\n", run.status.to_db_string()));
            out.push_str(&format!("  Pages: {}..={}\n", run.start_page, run.end_page));
            out.push_str(&format!("  Started: {}\n", run.started_at));
            out.push_str(&format!(
                "  Finished: {}\n",
                run.finished_at.as_deref().unwrap_or("-")
            ));
            out.push_str(&format!(
                "  Pages fetched: {} ({} failed)\n",
                c.pages_fetched, c.pages_failed
            ));
            out.push_str(&format!("  Usernames found: {}\n", c.usernames_found));
            out.push_str(&format!(
                "  New reviewers: {} ({} already stored, {} failed)\n",
                c.reviewers_added, c.duplicates, c.upsert_failures
            ));
        }
        None => out.push_str("\nNo scrape runs recorded\n"),
    }

    out
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &ReviewerStatistics) {
    print!("{}", format_statistics(stats));
}
