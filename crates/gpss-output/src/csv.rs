//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `events.csv`
//! - `service_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EventRow, OutputResult, ServiceSummaryRow};

/// Writes a run report to two CSV files.
pub struct CsvWriter {
    events:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(["clock", "event", "transact", "service", "value"])?;

        let mut summaries = Writer::from_path(dir.join("service_summaries.csv"))?;
        summaries.write_record([
            "service",
            "completed",
            "occupant",
            "has_queue",
            "max_queue_length",
            "queue_enters",
            "queue_exits",
            "mean_wait",
        ])?;

        Ok(Self { events, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.clock.to_string(),
                row.kind.as_str().to_owned(),
                row.transact.to_string(),
                row.service.to_string(),
                row.value.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_service_summary(&mut self, row: &ServiceSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.service.to_string(),
            row.completed.to_string(),
            row.occupant.to_string(),
            (row.has_queue as u8).to_string(),
            row.max_queue_length.to_string(),
            row.queue_enters.to_string(),
            row.queue_exits.to_string(),
            row.mean_wait.map(|w| w.to_string()).unwrap_or_default(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
