//! `ReportObserver<W>`: bridges `ModelObserver` to an `OutputWriter`.

use gpss_core::{GeneratorId, Identified, ServiceId, Tick, Transact, TransactId, TransactKind};
use gpss_model::ModelObserver;
use gpss_service::{Seizure, Service};
use gpss_storage::Storage;

use crate::row::{EventKind, EventRow, ServiceSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`ModelObserver`] that logs every generate / seize / release / enqueue
/// as an [`EventRow`] and writes one [`ServiceSummaryRow`] per service when
/// the run ends.
///
/// Events are buffered for the duration of a tick and written as one batch.
/// Errors from the writer are stored because observer methods have no return
/// value; check them with [`take_error`][Self::take_error] after the run.
pub struct ReportObserver<W: OutputWriter> {
    writer:     W,
    clock:      Tick,
    pending:    Vec<EventRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> ReportObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            clock:      Tick::ZERO,
            pending:    Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn push(&mut self, kind: EventKind, transact: TransactId, service: ServiceId, value: u64) {
        self.pending.push(EventRow {
            clock: self.clock.0,
            kind,
            transact: transact.0,
            service: service.0,
            value,
        });
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let result = self.writer.write_events(&self.pending);
        self.pending.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

fn summary<K: TransactKind>(service: &Service<K>) -> ServiceSummaryRow {
    let stats = service.queue_statistics();
    ServiceSummaryRow {
        service:          service.id().0,
        completed:        service.history().len() as u64,
        occupant:         service.occupant().unwrap_or(TransactId::INVALID).0,
        has_queue:        stats.is_some(),
        max_queue_length: stats.map_or(0, |s| s.max_length() as u64),
        queue_enters:     stats.map_or(0, |s| s.enters().len() as u64),
        queue_exits:      stats.map_or(0, |s| s.exits().len() as u64),
        mean_wait:        stats.and_then(|s| s.mean_wait()),
    }
}

impl<K: TransactKind, W: OutputWriter> ModelObserver<K> for ReportObserver<W> {
    fn on_tick_start(&mut self, clock: Tick) {
        self.clock = clock;
    }

    fn on_generate(&mut self, _generator: GeneratorId, transact: &Transact<K>) {
        self.push(EventKind::Generate, transact.id, transact.handler, transact.time.0);
    }

    fn on_seize(&mut self, clock: Tick, service: ServiceId, seizure: Seizure) {
        self.clock = clock;
        self.push(EventKind::Seize, seizure.transact, service, seizure.completes_at.0);
    }

    fn on_release(&mut self, clock: Tick, service: ServiceId, transact: TransactId) {
        self.clock = clock;
        self.push(EventKind::Release, transact, service, 0);
    }

    fn on_enqueue(&mut self, clock: Tick, service: ServiceId, transact: TransactId, length: usize) {
        self.clock = clock;
        self.push(EventKind::Enqueue, transact, service, length as u64);
    }

    fn on_tick_end(&mut self, _clock: Tick, _dispatched: usize) {
        self.flush();
    }

    fn on_sim_end(&mut self, _clock: Tick, services: &[Service<K>], _storage: &Storage<K>) {
        // Generate events from a tick that found no future events.
        self.flush();
        for service in services {
            let result = self.writer.write_service_summary(&summary(service));
            self.store_err(result);
        }
        let result = self.writer.finish();
        self.store_err(result);
    }
}
