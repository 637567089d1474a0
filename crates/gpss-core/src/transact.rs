//! The `Transact` entity.

use std::fmt;
use std::hash::Hash;

use crate::{Identified, ServiceId, Tick, TransactId};

/// Application-defined tag naming the kind of entity a generator produces.
///
/// Implemented automatically for any small copyable enum, e.g.
///
/// ```rust,ignore
/// #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
/// enum Vehicle { Car, Truck }
/// ```
///
/// The model's routing table is keyed by this type, so every variant a
/// configured generator can emit must have a route.
pub trait TransactKind: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

impl<T> TransactKind for T where T: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

/// A simulated entity.
///
/// `Transact` is a small `Copy` value.  The owning copy always lives in
/// exactly one of `Storage`'s partitions; services and queues refer to it by
/// [`TransactId`], and history logs keep snapshots.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Transact<K: TransactKind> {
    /// Creation-order number.
    pub id: TransactId,

    /// What kind of entity this is; selects the route.
    pub kind: K,

    /// Instant of the next scheduled action.
    pub time: Tick,

    /// The service currently responsible for this transact.
    /// `ServiceId::INVALID` until the model routes it.
    pub handler: ServiceId,
}

impl<K: TransactKind> Transact<K> {
    pub fn new(id: TransactId, kind: K, time: Tick) -> Self {
        Self { id, kind, time, handler: ServiceId::INVALID }
    }

    /// Builder-style handler assignment.
    pub fn with_handler(mut self, handler: ServiceId) -> Self {
        self.handler = handler;
        self
    }

    /// `true` once the model has routed this transact to a service.
    #[inline]
    pub fn has_handler(&self) -> bool {
        self.handler.is_valid()
    }
}

impl<K: TransactKind> Identified for Transact<K> {
    type Id = TransactId;

    #[inline]
    fn id(&self) -> TransactId {
        self.id
    }
}

impl<K: TransactKind> fmt::Display for Transact<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.id.0, self.time.0)
    }
}
