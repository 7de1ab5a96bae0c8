//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::storage::schema::{initialize_schema, INSERT_REVIEWER_SQL};
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{Reviewer, RunCounters, RunRecord, RunStatus, UpsertOutcome};
use chrono::Utc;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use std::path::Path;

const RUN_COLUMNS: &str = "id, started_at, finished_at, config_hash, start_page, end_page, status,
     pages_fetched, pages_failed, usernames_found, reviewers_added, duplicates, upsert_failures";

/// SQLite storage backend
///
/// Owns the one connection used for the lifetime of a run. The connection is
/// released when the storage is closed or dropped.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (or creates) the database file
    ///
    /// The schema is left untouched; call `initialize_schema` before writing.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened database
    /// * `Err(StorageError::Connection)` - Failed to open database
    pub fn open(path: &Path) -> StorageResult<Self> {
        let connection_error = |source| StorageError::Connection {
            path: path.display().to_string(),
            source,
        };

        let conn = Connection::open(path).map_err(connection_error)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )
        .map_err(connection_error)?;

        Ok(Self { conn })
    }

    /// Opens an existing database without write access (for reporting)
    pub fn open_read_only(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
            |source| StorageError::Connection {
                path: path.display().to_string(),
                source,
            },
        )?;
        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::Connection {
            path: ":memory:".to_string(),
            source,
        })?;
        Ok(Self { conn })
    }

    /// Closes the connection, surfacing any error SQLite reports on close
    pub fn close(self) -> StorageResult<()> {
        self.conn.close().map_err(|(_, e)| StorageError::Sqlite(e))
    }

    fn try_insert_reviewer(&mut self, username: &str) -> rusqlite::Result<usize> {
        // Dropping an uncommitted transaction rolls it back
        let tx = self.conn.transaction()?;
        let changed = tx.execute(INSERT_REVIEWER_SQL, params![username])?;
        tx.commit()?;
        Ok(changed)
    }
}

fn run_from_row(row: &Row<'_>) -> rusqlite::Result<RunRecord> {
    Ok(RunRecord {
        id: row.get(0)?,
        started_at: row.get(1)?,
        finished_at: row.get(2)?,
        config_hash: row.get(3)?,
        start_page: row.get(4)?,
        end_page: row.get(5)?,
        status: RunStatus::from_db_string(&row.get::<_, String>(6)?)
            .unwrap_or(RunStatus::Interrupted),
        counters: RunCounters {
            pages_fetched: row.get(7)?,
            pages_failed: row.get(8)?,
            usernames_found: row.get(9)?,
            reviewers_added: row.get(10)?,
            duplicates: row.get(11)?,
            upsert_failures: row.get(12)?,
        },
    })
}

impl Storage for SqliteStorage {
    fn initialize_schema(&mut self) -> StorageResult<()> {
        initialize_schema(&self.conn).map_err(StorageError::Schema)
    }

    // ===== Reviewers =====

    fn insert_reviewer(&mut self, username: &str) -> StorageResult<UpsertOutcome> {
        let changed =
            self.try_insert_reviewer(username)
                .map_err(|source| StorageError::Upsert {
                    username: username.to_string(),
                    source,
                })?;

        Ok(if changed == 0 {
            UpsertOutcome::AlreadyPresent
        } else {
            UpsertOutcome::Inserted
        })
    }

    fn get_reviewer(&self, username: &str) -> StorageResult<Option<Reviewer>> {
        let reviewer = self
            .conn
            .query_row(
                "SELECT id, username, created_at, total_plays, total_log_score
                 FROM reviewers WHERE username = ?1",
                params![username],
                |row| {
                    Ok(Reviewer {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        created_at: row.get(2)?,
                        total_plays: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
                        total_log_score: row.get(4)?,
                    })
                },
            )
            .optional()?;

        Ok(reviewer)
    }

    fn count_reviewers(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM reviewers", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn list_usernames(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT username FROM reviewers ORDER BY id")?;

        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut usernames = Vec::new();
        for row in rows {
            usernames.push(row?);
        }

        Ok(usernames)
    }

    // ===== Run Management =====

    fn create_run(
        &mut self,
        config_hash: &str,
        start_page: u32,
        end_page: u32,
    ) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO scrape_runs (started_at, config_hash, start_page, end_page, status)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                now,
                config_hash,
                start_page,
                end_page,
                RunStatus::Running.to_db_string()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn finish_run(
        &mut self,
        run_id: i64,
        status: RunStatus,
        counters: &RunCounters,
    ) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let updated = self.conn.execute(
            "UPDATE scrape_runs SET status = ?1, finished_at = ?2, pages_fetched = ?3,
             pages_failed = ?4, usernames_found = ?5, reviewers_added = ?6, duplicates = ?7,
             upsert_failures = ?8 WHERE id = ?9",
            params![
                status.to_db_string(),
                now,
                counters.pages_fetched,
                counters.pages_failed,
                counters.usernames_found,
                counters.reviewers_added,
                counters.duplicates,
                counters.upsert_failures,
                run_id
            ],
        )?;

        if updated == 0 {
            return Err(StorageError::RunNotFound(run_id));
        }

        Ok(())
    }

    fn mark_interrupted_runs(&mut self) -> StorageResult<u64> {
        let updated = self.conn.execute(
            "UPDATE scrape_runs SET status = ?1 WHERE status = ?2",
            params![
                RunStatus::Interrupted.to_db_string(),
                RunStatus::Running.to_db_string()
            ],
        )?;
        Ok(updated as u64)
    }

    fn get_run(&self, run_id: i64) -> StorageResult<RunRecord> {
        let sql = format!("SELECT {} FROM scrape_runs WHERE id = ?1", RUN_COLUMNS);
        self.conn
            .query_row(&sql, params![run_id], run_from_row)
            .optional()?
            .ok_or(StorageError::RunNotFound(run_id))
    }

    fn get_latest_run(&self) -> StorageResult<Option<RunRecord>> {
        let sql = format!(
            "SELECT {} FROM scrape_runs ORDER BY id DESC LIMIT 1",
            RUN_COLUMNS
        );
        let run = self.conn.query_row(&sql, [], run_from_row).optional()?;
        Ok(run)
    }
}
