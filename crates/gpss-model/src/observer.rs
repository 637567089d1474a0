//! Model observer trait for progress reporting and data collection.

use gpss_core::{GeneratorId, ServiceId, Tick, Transact, TransactId, TransactKind};
use gpss_service::{Seizure, Service};
use gpss_storage::Storage;

/// Callbacks invoked by [`Model::simulate_with`][crate::Model::simulate_with]
/// at key points of the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: release counter
///
/// ```rust,ignore
/// struct Throughput(usize);
///
/// impl<K: TransactKind> ModelObserver<K> for Throughput {
///     fn on_release(&mut self, _clock: Tick, _service: ServiceId, _t: TransactId) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait ModelObserver<K: TransactKind> {
    /// Called at the start of each tick with the clock before correction.
    fn on_tick_start(&mut self, _clock: Tick) {}

    /// A generator emitted `transact` (already routed, not yet admitted).
    fn on_generate(&mut self, _generator: GeneratorId, _transact: &Transact<K>) {}

    /// A transact took `service`.
    fn on_seize(&mut self, _clock: Tick, _service: ServiceId, _seizure: Seizure) {}

    /// `transact` finished at `service` and was terminated.
    fn on_release(&mut self, _clock: Tick, _service: ServiceId, _transact: TransactId) {}

    /// `transact` joined the queue of `service`; `length` is the new length.
    fn on_enqueue(
        &mut self,
        _clock:    Tick,
        _service:  ServiceId,
        _transact: TransactId,
        _length:   usize,
    ) {}

    /// Called at the end of each tick with the corrected clock and the
    /// number of transacts dispatched.
    fn on_tick_end(&mut self, _clock: Tick, _dispatched: usize) {}

    /// Called once after the loop stops, with read-only final state.
    fn on_sim_end(&mut self, _clock: Tick, _services: &[Service<K>], _storage: &Storage<K>) {}
}

/// A [`ModelObserver`] that does nothing.
pub struct NoopObserver;

impl<K: TransactKind> ModelObserver<K> for NoopObserver {}
