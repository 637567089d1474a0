//! `Queue`: FIFO admission.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use gpss_core::{Tick, TransactId};

use crate::QueueStatistics;

/// An ordered waiting line of transact IDs.
///
/// No ID ever appears twice: [`enter_if_absent`][Self::enter_if_absent] is
/// the only way in.
#[derive(Clone, Debug, Default)]
pub struct Queue {
    waiting:    VecDeque<TransactId>,
    /// Membership index of `waiting`.
    members:    HashSet<TransactId>,
    statistics: QueueStatistics,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `transact` to the tail unless it is already waiting.
    ///
    /// Returns `true` if it was admitted (and the entry logged).
    pub fn enter_if_absent(&mut self, transact: TransactId, now: Tick) -> bool {
        if !self.members.insert(transact) {
            return false;
        }
        self.waiting.push_back(transact);
        self.statistics.record_enter(transact, now, self.waiting.len());
        true
    }

    /// Remove `transact` wherever it stands in line.
    ///
    /// Returns `false` without logging if it was not waiting.
    pub fn depart(&mut self, transact: TransactId, now: Tick) -> bool {
        if !self.members.remove(&transact) {
            return false;
        }
        let Some(pos) = self.waiting.iter().position(|&t| t == transact) else {
            return false;
        };
        self.waiting.remove(pos);
        self.statistics.record_exit(transact, now);
        true
    }

    /// Head of the line, if any.
    #[inline]
    pub fn peek_front(&self) -> Option<TransactId> {
        self.waiting.front().copied()
    }

    /// Remove and return the head of the line, logging its exit.
    pub fn dequeue_front(&mut self, now: Tick) -> Option<TransactId> {
        let head = self.waiting.pop_front()?;
        self.members.remove(&head);
        self.statistics.record_exit(head, now);
        Some(head)
    }

    #[inline]
    pub fn contains(&self, transact: TransactId) -> bool {
        self.members.contains(&transact)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    /// Waiting IDs, head first.
    pub fn iter(&self) -> impl Iterator<Item = TransactId> + '_ {
        self.waiting.iter().copied()
    }

    pub fn statistics(&self) -> &QueueStatistics {
        &self.statistics
    }

    /// Empty the line and reset the statistics.  Not used by the normal
    /// seize/release flow.
    pub fn clear(&mut self) {
        self.waiting.clear();
        self.members.clear();
        self.statistics.clear();
    }
}

impl fmt::Display for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Transacts in queue:")?;
        for t in &self.waiting {
            writeln!(f, "  {}", t.0)?;
        }
        write!(f, "{}", self.statistics)
    }
}
