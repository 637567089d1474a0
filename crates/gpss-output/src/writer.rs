//! The `OutputWriter` trait implemented by all backend writers.

use crate::{EventRow, OutputResult, ServiceSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored and retrieved with [`ReportObserver::take_error`][crate::ReportObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of event rows.
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Write one service summary row.
    fn write_service_summary(&mut self, row: &ServiceSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
