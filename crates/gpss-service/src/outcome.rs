//! What a `handle` call did.

use gpss_core::{Tick, TransactId};

/// Occupancy of a service.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ServiceState {
    Free,
    Busy(TransactId),
}

/// A transact taking the service, and when it will be done.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Seizure {
    pub transact:     TransactId,
    pub completes_at: Tick,
}

/// Result of one [`Service::handle`][crate::Service::handle] transition.
///
/// The model forwards these to its observer; they carry no behaviour.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Handled {
    /// The service was free and `seizure.transact` took it.
    Seized(Seizure),

    /// The occupant finished and was terminated.  `next` is the queue head
    /// that seized the service in the same step, if one was waiting.
    Released {
        transact: TransactId,
        next:     Option<Seizure>,
    },

    /// The occupant was dispatched before its completion time.
    InService(TransactId),

    /// A contender joined the queue; `length` is the queue length after.
    Queued { transact: TransactId, length: usize },

    /// A contender that was already waiting was dispatched again.
    StillQueued(TransactId),

    /// The service is busy and has no queue; the contender stays in the
    /// current set and retries on every dispatch.
    Blocked(TransactId),
}
