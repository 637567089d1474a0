//! Per-dispatch context handed to [`Service::handle`][crate::Service::handle].

use gpss_core::{Clocked, Tick, TransactKind};
use gpss_storage::Storage;

/// Everything a service may touch while handling one transact: the model
/// clock (read-only) and the event list (through its documented
/// transitions).
///
/// Built by the model for each dispatch; services never hold on to it.
pub struct ServiceContext<'a, K: TransactKind> {
    pub now:     Tick,
    pub storage: &'a mut Storage<K>,
}

impl<'a, K: TransactKind> ServiceContext<'a, K> {
    #[inline]
    pub fn new(now: Tick, storage: &'a mut Storage<K>) -> Self {
        Self { now, storage }
    }
}

impl<K: TransactKind> Clocked for ServiceContext<'_, K> {
    #[inline]
    fn now(&self) -> Tick {
        self.now
    }
}
