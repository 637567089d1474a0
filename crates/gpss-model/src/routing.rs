//! Transact kind → service routing.

use gpss_core::{ServiceId, TransactKind};

#[cfg(feature = "fx-hash")]
type Map<K> = rustc_hash::FxHashMap<K, ServiceId>;
#[cfg(not(feature = "fx-hash"))]
type Map<K> = std::collections::HashMap<K, ServiceId>;

/// Which service handles each transact kind.
///
/// Filled by [`ModelBuilder::route`][crate::ModelBuilder::route] and
/// validated once at build time; lookups during the run are plain map hits.
pub struct RoutingTable<K: TransactKind> {
    routes: Map<K>,
}

impl<K: TransactKind> Default for RoutingTable<K> {
    fn default() -> Self {
        Self { routes: Map::default() }
    }
}

impl<K: TransactKind> RoutingTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route `kind` to `service`, returning the previous route if any.
    pub fn insert(&mut self, kind: K, service: ServiceId) -> Option<ServiceId> {
        self.routes.insert(kind, service)
    }

    #[inline]
    pub fn resolve(&self, kind: K) -> Option<ServiceId> {
        self.routes.get(&kind).copied()
    }

    pub fn contains(&self, kind: K) -> bool {
        self.routes.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, ServiceId)> + '_ {
        self.routes.iter().map(|(k, s)| (*k, *s))
    }
}
