//! Output module for reporting scrape results
//!
//! This module handles:
//! - Rendering the end-of-run summary
//! - Loading and printing database statistics

pub mod stats;

pub use stats::{format_statistics, load_statistics, print_statistics, ReviewerStatistics};

use crate::scrape::RunSummary;

/// Renders the summary printed after a scrape
pub fn format_run_summary(summary: &RunSummary) -> String {
    let c = &summary.counters;
    let run = summary
        .run_id
        .map(|id| format!("#{}", id))
        .unwrap_or_else(|| "(unrecorded)".to_string());

    format!(
        "Scrape run {} finished in {:.1}s\n  Pages attempted: {}\n  Pages fetched: {}\n  Pages failed: {}\n  Usernames found: {}\n  New reviewers: {}\n  Already stored: {}\n  Failed inserts: {}\n",
        run,
        summary.elapsed.as_secs_f64(),
        summary.pages_attempted,
        c.pages_fetched,
        c.pages_failed,
        c.usernames_found,
        c.reviewers_added,
        c.duplicates,
        c.upsert_failures
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RunCounters;
    use std::time::Duration;

    #[test]
    fn test_format_run_summary() {
        let summary = RunSummary {
            run_id: Some(3),
            pages_attempted: 20,
            counters: RunCounters {
                pages_fetched: 19,
                pages_failed: 1,
                usernames_found: 475,
                reviewers_added: 470,
                duplicates: 5,
                upsert_failures: 0,
            },
            elapsed: Duration::from_millis(81_500),
        };

        let text = format_run_summary(&summary);
        assert!(text.starts_with("Scrape run #3 finished in 81.5s"));
        assert!(text.contains("Pages failed: 1"));
        assert!(text.contains("New reviewers: 470"));
    }

    #[test]
    fn test_format_unrecorded_run() {
        let summary = RunSummary {
            run_id: None,
            pages_attempted: 0,
            counters: RunCounters::default(),
            elapsed: Duration::ZERO,
        };
        assert!(format_run_summary(&summary).contains("(unrecorded)"));
    }
}
