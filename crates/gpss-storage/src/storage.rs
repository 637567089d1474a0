//! `Storage<K>`: future/current partitioning of live transacts.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use gpss_core::{Tick, Transact, TransactId, TransactKind};

/// Partitions all live transacts into the future and current event sets and
/// keeps the terminal history.
///
/// The future set is bucketed by action time, so the clock-correction value
/// and the transacts due at it are found in O(log n).  Within a bucket, and
/// across the current set, insertion order is the FIFO tie-break when
/// several transacts are due at the same clock value.
///
/// Every mutating operation is idempotent with respect to membership:
/// moving or removing a transact that is not where the operation expects it
/// is a no-op reported through the `bool` / `Option` return value.
pub struct Storage<K: TransactKind> {
    /// Every live transact, whichever set holds it.
    live:         HashMap<TransactId, Transact<K>>,
    /// Future set: action time → IDs in arrival order.
    future:       BTreeMap<Tick, Vec<TransactId>>,
    /// Current set: arrival slot → ID.
    current:      BTreeMap<u64, TransactId>,
    /// Reverse index of `current`.
    current_slot: HashMap<TransactId, u64>,
    next_slot:    u64,
    history:      Vec<Transact<K>>,
    /// IDs already in `history`; never re-admitted.
    retired:      HashSet<TransactId>,
}

impl<K: TransactKind> Default for Storage<K> {
    fn default() -> Self {
        Self {
            live:         HashMap::new(),
            future:       BTreeMap::new(),
            current:      BTreeMap::new(),
            current_slot: HashMap::new(),
            next_slot:    0,
            history:      Vec::new(),
            retired:      HashSet::new(),
        }
    }
}

impl<K: TransactKind> Storage<K> {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Insert a new transact into the future set.
    ///
    /// Returns `false` (and does nothing) if a transact with the same ID is
    /// already live or has already been terminated.
    pub fn admit(&mut self, transact: Transact<K>) -> bool {
        if self.is_live(transact.id) || self.retired.contains(&transact.id) {
            return false;
        }
        self.live.insert(transact.id, transact);
        self.future.entry(transact.time).or_default().push(transact.id);
        true
    }

    /// Move one transact from the future set to the tail of the current set.
    pub fn promote(&mut self, id: TransactId) -> bool {
        let Some(time) = self.live.get(&id).map(|t| t.time) else {
            return false;
        };
        if !self.unlink_future(id, time) {
            return false;
        }
        self.link_current(id);
        true
    }

    /// Move every future transact whose `time == clock` into the current
    /// set, keeping their relative future-set order.  Returns how many moved.
    pub fn promote_due(&mut self, clock: Tick) -> usize {
        let Some(due) = self.future.remove(&clock) else {
            return 0;
        };
        for &id in &due {
            self.link_current(id);
        }
        due.len()
    }

    /// Move one transact from the current set back to the future set.
    ///
    /// A transact already in the future set is left where it is.
    pub fn demote(&mut self, id: TransactId) -> bool {
        let Some(slot) = self.current_slot.remove(&id) else {
            return false;
        };
        self.current.remove(&slot);
        if let Some(t) = self.live.get(&id) {
            self.future.entry(t.time).or_default().push(id);
        }
        true
    }

    /// Stamp a new action time on a live transact and make sure it sits in
    /// the future set.  Returns `false` if `id` is not live.
    pub fn reschedule(&mut self, id: TransactId, time: Tick) -> bool {
        let Some(t) = self.live.get_mut(&id) else {
            return false;
        };
        let previous = std::mem::replace(&mut t.time, time);
        if self.current_slot.contains_key(&id) {
            self.demote(id);
        } else if self.unlink_future(id, previous) {
            self.future.entry(time).or_default().push(id);
        }
        true
    }

    /// Remove a transact from whichever set holds it and append it to the
    /// history.  Returns the retired value, or `None` if `id` was not live.
    pub fn terminate(&mut self, id: TransactId) -> Option<Transact<K>> {
        let t = self.live.remove(&id)?;
        match self.current_slot.remove(&id) {
            Some(slot) => {
                self.current.remove(&slot);
            }
            None => {
                self.unlink_future(id, t.time);
            }
        }
        self.retired.insert(id);
        self.history.push(t);
        Some(t)
    }

    fn link_current(&mut self, id: TransactId) {
        let slot = self.next_slot;
        self.next_slot += 1;
        self.current.insert(slot, id);
        self.current_slot.insert(id, slot);
    }

    /// Drop `id` from the future bucket at `time`.  Buckets hold the
    /// transacts due at one clock value, so the scan stays short.
    fn unlink_future(&mut self, id: TransactId, time: Tick) -> bool {
        let Some(bucket) = self.future.get_mut(&time) else {
            return false;
        };
        let Some(pos) = bucket.iter().position(|&other| other == id) else {
            return false;
        };
        bucket.remove(pos);
        if bucket.is_empty() {
            self.future.remove(&time);
        }
        true
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// The clock-correction value: earliest time in the future set, or
    /// `None` when there are no further events.
    pub fn minimum_future_time(&self) -> Option<Tick> {
        self.future.keys().next().copied()
    }

    pub fn get(&self, id: TransactId) -> Option<&Transact<K>> {
        self.live.get(&id)
    }

    #[inline]
    pub fn is_future(&self, id: TransactId) -> bool {
        self.is_live(id) && !self.is_current(id)
    }

    #[inline]
    pub fn is_current(&self, id: TransactId) -> bool {
        self.current_slot.contains_key(&id)
    }

    #[inline]
    pub fn is_live(&self, id: TransactId) -> bool {
        self.live.contains_key(&id)
    }

    #[inline]
    pub fn is_terminated(&self, id: TransactId) -> bool {
        self.retired.contains(&id)
    }

    /// Future event set ordered by time, ties in insertion order.
    pub fn future(&self) -> impl Iterator<Item = &Transact<K>> + '_ {
        self.future.values().flatten().filter_map(move |id| self.live.get(id))
    }

    /// Current event set in insertion order.
    pub fn current(&self) -> impl Iterator<Item = &Transact<K>> + '_ {
        self.current.values().filter_map(move |id| self.live.get(id))
    }

    pub fn future_len(&self) -> usize {
        self.live.len() - self.current_slot.len()
    }

    pub fn current_len(&self) -> usize {
        self.current_slot.len()
    }

    /// Terminated transacts in termination order.
    pub fn history(&self) -> &[Transact<K>] {
        &self.history
    }

    /// Snapshot of current-set IDs, used to drive one dispatch pass while
    /// the set itself is being mutated.
    pub fn current_ids(&self) -> Vec<TransactId> {
        self.current.values().copied().collect()
    }

    /// All live transacts ordered by time (stable: ties keep future-then-
    /// current order).
    pub fn all(&self) -> Vec<Transact<K>> {
        let mut all: Vec<Transact<K>> = self.future().chain(self.current()).copied().collect();
        all.sort_by_key(|t| t.time);
        all
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// First ID indexed twice across the two sets, or indexed without a
    /// live record, if any.
    ///
    /// Unreachable through the public transitions; exposed for the model's
    /// invariant check.
    pub fn duplicate_live_id(&self) -> Option<TransactId> {
        let mut seen = HashSet::with_capacity(self.live.len());
        self.future
            .values()
            .flatten()
            .chain(self.current.values())
            .copied()
            .find(|id| !seen.insert(*id) || !self.live.contains_key(id))
    }
}

impl<K: TransactKind> fmt::Display for Storage<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current events list:")?;
        for t in self.current() {
            writeln!(f, "  {t}")?;
        }
        writeln!(f, "Future events list:")?;
        for t in self.future() {
            writeln!(f, "  {t}")?;
        }
        Ok(())
    }
}
