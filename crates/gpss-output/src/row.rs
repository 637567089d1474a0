//! Plain data row types written by output backends.

use std::fmt;

/// What happened in an [`EventRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Generate,
    Seize,
    Release,
    Enqueue,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Generate => "generate",
            EventKind::Seize    => "seize",
            EventKind::Release  => "release",
            EventKind::Enqueue  => "enqueue",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observable state change during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRow {
    pub clock:    u64,
    pub kind:     EventKind,
    pub transact: u32,
    pub service:  u32,
    /// Kind-specific payload: the scheduled arrival time for `Generate`, the
    /// completion time for `Seize`, the new queue length for `Enqueue`, and
    /// `0` for `Release`.
    pub value:    u64,
}

/// End-of-run figures for one service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceSummaryRow {
    pub service:          u32,
    pub completed:        u64,
    /// Occupant still in service when the run stopped; `u32::MAX` if free.
    pub occupant:         u32,
    pub has_queue:        bool,
    pub max_queue_length: u64,
    pub queue_enters:     u64,
    pub queue_exits:      u64,
    /// Mean time spent queued by transacts that left the queue.
    pub mean_wait:        Option<f64>,
}
