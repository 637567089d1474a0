//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `events` and `service_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{EventRow, OutputResult, ServiceSummaryRow};

/// Writes a run report to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS events (
                 clock    INTEGER NOT NULL,
                 event    TEXT    NOT NULL,
                 transact INTEGER NOT NULL,
                 service  INTEGER NOT NULL,
                 value    INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS service_summaries (
                 service          INTEGER PRIMARY KEY,
                 completed        INTEGER NOT NULL,
                 occupant         INTEGER NOT NULL,
                 has_queue        INTEGER NOT NULL,
                 max_queue_length INTEGER NOT NULL,
                 queue_enters     INTEGER NOT NULL,
                 queue_exits      INTEGER NOT NULL,
                 mean_wait        REAL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO events (clock, event, transact, service, value) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.clock as i64,
                    row.kind.as_str(),
                    row.transact,
                    row.service,
                    row.value as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_service_summary(&mut self, row: &ServiceSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO service_summaries \
             (service, completed, occupant, has_queue, max_queue_length, \
              queue_enters, queue_exits, mean_wait) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                row.service,
                row.completed as i64,
                row.occupant,
                row.has_queue as i64,
                row.max_queue_length as i64,
                row.queue_enters as i64,
                row.queue_exits as i64,
                row.mean_wait,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
