//! Append-only queue statistics.

use std::collections::HashMap;
use std::fmt;

use gpss_core::{Tick, TransactId};

/// One entry in an enter or exit log.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QueueEvent {
    pub transact: TransactId,
    pub time:     Tick,
}

/// Enter/exit logs and the longest line observed.
///
/// Nothing is ever evicted; [`clear`][Self::clear] is the only reset.
#[derive(Clone, Debug, Default)]
pub struct QueueStatistics {
    max_length: usize,
    enters:     Vec<QueueEvent>,
    exits:      Vec<QueueEvent>,
}

impl QueueStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log an entry; `length` is the queue length after the entry.
    pub fn record_enter(&mut self, transact: TransactId, time: Tick, length: usize) {
        self.enters.push(QueueEvent { transact, time });
        self.max_length = self.max_length.max(length);
    }

    pub fn record_exit(&mut self, transact: TransactId, time: Tick) {
        self.exits.push(QueueEvent { transact, time });
    }

    pub fn clear(&mut self) {
        self.max_length = 0;
        self.enters.clear();
        self.exits.clear();
    }

    /// Longest waiting line seen since creation or the last `clear`.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn enters(&self) -> &[QueueEvent] {
        &self.enters
    }

    pub fn exits(&self) -> &[QueueEvent] {
        &self.exits
    }

    /// Time each exited transact spent waiting, in exit order.
    pub fn waiting_times(&self) -> Vec<(TransactId, u64)> {
        let entered: HashMap<TransactId, Tick> =
            self.enters.iter().map(|e| (e.transact, e.time)).collect();
        self.exits
            .iter()
            .filter_map(|e| {
                let at = entered.get(&e.transact)?;
                Some((e.transact, e.time.0.saturating_sub(at.0)))
            })
            .collect()
    }

    /// Mean wait over exited transacts, or `None` if nobody has left yet.
    pub fn mean_wait(&self) -> Option<f64> {
        let waits = self.waiting_times();
        if waits.is_empty() {
            return None;
        }
        let total: u64 = waits.iter().map(|(_, w)| w).sum();
        Some(total as f64 / waits.len() as f64)
    }
}

impl fmt::Display for QueueStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Max queue length: {}", self.max_length)?;
        writeln!(f, "Enters:")?;
        for e in &self.enters {
            writeln!(f, "  [{}, {}]", e.transact.0, e.time.0)?;
        }
        writeln!(f, "Exits:")?;
        for e in &self.exits {
            writeln!(f, "  [{}, {}]", e.transact.0, e.time.0)?;
        }
        Ok(())
    }
}
