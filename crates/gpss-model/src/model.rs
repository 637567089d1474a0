//! The `Model` struct and its tick loop.

use std::collections::HashMap;

use tracing::{debug, info, trace};

use gpss_core::{GpssError, Identified, ServiceId, SimConfig, Tick, Transact, TransactId, TransactKind};
use gpss_generator::{Generator, TransactSequence};
use gpss_queue::QueueStatistics;
use gpss_service::{Handled, Service, ServiceContext};
use gpss_storage::Storage;

use crate::{ModelError, ModelObserver, ModelResult, NoopObserver, RoutingTable};

/// Back-to-back zero-delay emissions an unbounded generator may make before
/// the run is abandoned as stalled.
pub const MAX_ZERO_DELAY_STREAK: u64 = 1_000;

// ── Step / stop results ───────────────────────────────────────────────────────

/// What one call to [`Model::step`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// The clock was corrected to `clock` and the current set dispatched.
    Advanced {
        clock:      Tick,
        promoted:   usize,
        dispatched: usize,
    },
    /// The future set was empty after the generate phase; nothing can ever
    /// happen again.
    Exhausted,
}

/// Why [`Model::simulate`] returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// `clock >= end_time`.
    EndTime,
    /// The future event set ran dry.
    NoFutureEvents,
}

/// Read-only view of the model after a run, for reporting.
pub struct FinalState<'a, K: TransactKind> {
    pub clock:    Tick,
    pub reason:   StopReason,
    pub ticks:    u64,
    pub storage:  &'a Storage<K>,
    pub services: &'a [Service<K>],
}

impl<K: TransactKind> FinalState<'_, K> {
    /// Every terminated transact, in termination order.
    pub fn history(&self) -> &[Transact<K>] {
        self.storage.history()
    }

    pub fn queue_statistics(&self, service: ServiceId) -> Option<&QueueStatistics> {
        self.services.get(service.index())?.queue_statistics()
    }

    pub fn clock(&self) -> Tick {
        self.clock
    }
}

// ── Model ─────────────────────────────────────────────────────────────────────

/// The simulation kernel.
///
/// `Model<K>` owns all simulation state and drives the three-phase tick loop
/// (generate → correct time → dispatch).  Create via
/// [`ModelBuilder`][crate::ModelBuilder]; the configuration (generators,
/// services, routes) is fixed from then on.
pub struct Model<K: TransactKind> {
    /// Run configuration (start/end time, seed).
    pub config: SimConfig,

    /// Current simulated time.  Never decreases.
    pub clock: Tick,

    /// Transact kind → responsible service.
    pub routing: RoutingTable<K>,

    /// Arrival processes, in configuration order.
    pub generators: Vec<Generator<K>>,

    /// Resources, indexed by `ServiceId`.
    pub services: Vec<Service<K>>,

    /// Event list: future set, current set, history.
    pub storage: Storage<K>,

    /// Run-wide transact numbering.
    pub numbers: TransactSequence,
}

impl<K: TransactKind> Model<K> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until `clock >= end_time` or no events remain.
    pub fn simulate(&mut self, end_time: Tick) -> ModelResult<FinalState<'_, K>> {
        self.simulate_with(end_time, &mut NoopObserver)
    }

    /// Run until `config.end_time`, reporting to `observer`.
    pub fn run<O: ModelObserver<K>>(&mut self, observer: &mut O) -> ModelResult<FinalState<'_, K>> {
        let end = self.config.end_time;
        self.simulate_with(end, observer)
    }

    /// Run until `clock >= end_time` or no events remain, reporting to
    /// `observer`.
    ///
    /// A tick whose corrected clock lands past `end_time` is still
    /// dispatched; the loop stops before the next one.
    pub fn simulate_with<O: ModelObserver<K>>(
        &mut self,
        end_time: Tick,
        observer: &mut O,
    ) -> ModelResult<FinalState<'_, K>> {
        let mut ticks = 0u64;
        let reason = loop {
            if self.clock >= end_time {
                break StopReason::EndTime;
            }
            match self.step(observer)? {
                Step::Exhausted => break StopReason::NoFutureEvents,
                Step::Advanced { .. } => ticks += 1,
            }
        };

        info!(
            clock = self.clock.0,
            ticks,
            terminated = self.storage.history().len(),
            live = self.storage.live_count(),
            ?reason,
            "simulation finished"
        );
        observer.on_sim_end(self.clock, &self.services, &self.storage);

        Ok(FinalState {
            clock: self.clock,
            reason,
            ticks,
            storage: &self.storage,
            services: &self.services,
        })
    }

    /// Execute exactly one tick (all three phases), ignoring `end_time`.
    ///
    /// Useful for tests and incremental stepping.
    pub fn step<O: ModelObserver<K>>(&mut self, observer: &mut O) -> ModelResult<Step> {
        let now = self.clock;
        observer.on_tick_start(now);
        trace!(clock = now.0, "tick start");

        self.generate(now, observer)?;

        // ── Phase 2: correct time ─────────────────────────────────────────
        let Some(next) = self.storage.minimum_future_time() else {
            debug!(clock = now.0, "future event set is empty");
            return Ok(Step::Exhausted);
        };
        if next < self.clock {
            return Err(ModelError::InvariantViolation(format!(
                "clock would move backwards from {} to {next}",
                self.clock
            )));
        }
        self.clock = next;
        let promoted = self.storage.promote_due(next);
        trace!(clock = next.0, promoted, "clock corrected");

        let dispatched = self.dispatch(observer)?;
        observer.on_tick_end(self.clock, dispatched);

        #[cfg(debug_assertions)]
        self.check_invariants()?;

        Ok(Step::Advanced { clock: next, promoted, dispatched })
    }

    // ── Read-only accessors ───────────────────────────────────────────────

    pub fn clock(&self) -> Tick {
        self.clock
    }

    /// Every terminated transact, in termination order.
    pub fn history(&self) -> &[Transact<K>] {
        self.storage.history()
    }

    pub fn queue_statistics(&self, service: ServiceId) -> Option<&QueueStatistics> {
        self.services.get(service.index())?.queue_statistics()
    }

    pub fn service(&self, service: ServiceId) -> Option<&Service<K>> {
        self.services.get(service.index())
    }

    /// Verify the partition and mutual-exclusion invariants.
    ///
    /// Runs after every tick in debug builds.
    pub fn check_invariants(&self) -> ModelResult<()> {
        if let Some(id) = self.storage.duplicate_live_id() {
            return Err(ModelError::InvariantViolation(format!(
                "{id} is present twice in the future/current sets"
            )));
        }

        let mut occupied_by: HashMap<TransactId, ServiceId> = HashMap::new();
        for service in &self.services {
            let Some(occupant) = service.occupant() else { continue };
            if let Some(other) = occupied_by.insert(occupant, service.id()) {
                return Err(ModelError::InvariantViolation(format!(
                    "{occupant} occupies both {other} and {}",
                    service.id()
                )));
            }
            if !self.storage.is_live(occupant) {
                return Err(ModelError::InvariantViolation(format!(
                    "{occupant} occupies {} but is not live",
                    service.id()
                )));
            }
        }
        Ok(())
    }

    // ── Phases ────────────────────────────────────────────────────────────

    /// Phase 1: every due generator emits one routed transact into the
    /// future set.
    ///
    /// An unbounded generator whose delays keep coming out zero would be due
    /// at the same clock forever; past [`MAX_ZERO_DELAY_STREAK`] such
    /// emissions in a row the run fails with [`ModelError::Stalled`].
    fn generate<O: ModelObserver<K>>(&mut self, now: Tick, observer: &mut O) -> ModelResult<()> {
        for generator in &mut self.generators {
            if !generator.is_due(now) {
                continue;
            }
            let emitted = generator.emit(&now, &mut self.numbers)?;
            let stalled = generator.zero_delay_streak() > MAX_ZERO_DELAY_STREAK;
            if stalled && generator.limit().is_none() {
                return Err(ModelError::Stalled { generator: generator.id(), clock: now });
            }
            let Some(handler) = self.routing.resolve(emitted.kind) else {
                return Err(ModelError::UnroutedKind {
                    kind:     format!("{:?}", emitted.kind),
                    transact: Some(emitted.id),
                });
            };
            let transact = emitted.with_handler(handler);

            debug!(
                generator = generator.id().0,
                transact = transact.id.0,
                time = transact.time.0,
                handler = transact.handler.0,
                "generated"
            );
            observer.on_generate(generator.id(), &transact);
            self.storage.admit(transact);
        }
        Ok(())
    }

    /// Phase 3: hand each current transact to its service.  Returns the
    /// number of dispatches performed.
    ///
    /// A transact blocked on a queueless service is retried once at the end
    /// of the pass if some service was released after it was turned away.
    fn dispatch<O: ModelObserver<K>>(&mut self, observer: &mut O) -> ModelResult<usize> {
        let mut dispatched = 0;
        let mut blocked = Vec::new();
        let mut released = false;

        for id in self.storage.current_ids() {
            let Some((service, handled)) = self.dispatch_one(id)? else { continue };
            dispatched += 1;
            match handled {
                Handled::Blocked(t) => blocked.push(t),
                Handled::Released { .. } => released = true,
                _ => {}
            }
            report::<K, O>(self.clock, service, handled, observer);
        }

        if released {
            for id in blocked {
                let Some((service, handled)) = self.dispatch_one(id)? else { continue };
                dispatched += 1;
                report::<K, O>(self.clock, service, handled, observer);
            }
        }

        Ok(dispatched)
    }

    /// Hand `id` to its service.  Returns `None` if `id` left the current
    /// set earlier in this pass (seized from a queue, or terminated); its
    /// own completion time will bring it back.
    fn dispatch_one(&mut self, id: TransactId) -> ModelResult<Option<(ServiceId, Handled)>> {
        if !self.storage.is_current(id) {
            return Ok(None);
        }
        let handler = self
            .storage
            .get(id)
            .map(|t| t.handler)
            .ok_or(GpssError::TransactNotFound(id))?;
        let service = self
            .services
            .get_mut(handler.index())
            .ok_or(ModelError::UnresolvedHandler { transact: id, handler })?;

        let mut ctx = ServiceContext::new(self.clock, &mut self.storage);
        let handled = service.handle(id, &mut ctx)?;
        trace!(clock = self.clock.0, transact = id.0, service = handler.0, ?handled, "dispatched");
        Ok(Some((handler, handled)))
    }
}

/// Forward one service outcome to the observer.
fn report<K: TransactKind, O: ModelObserver<K>>(
    now:      Tick,
    service:  ServiceId,
    handled:  Handled,
    observer: &mut O,
) {
    match handled {
        Handled::Seized(seizure) => {
            debug!(
                clock = now.0,
                service = service.0,
                transact = seizure.transact.0,
                completes_at = seizure.completes_at.0,
                "seized"
            );
            observer.on_seize(now, service, seizure);
        }
        Handled::Released { transact, next } => {
            debug!(clock = now.0, service = service.0, transact = transact.0, "released");
            observer.on_release(now, service, transact);
            if let Some(seizure) = next {
                debug!(
                    clock = now.0,
                    service = service.0,
                    transact = seizure.transact.0,
                    completes_at = seizure.completes_at.0,
                    "seized from queue"
                );
                observer.on_seize(now, service, seizure);
            }
        }
        Handled::Queued { transact, length } => {
            debug!(clock = now.0, service = service.0, transact = transact.0, length, "queued");
            observer.on_enqueue(now, service, transact, length);
        }
        Handled::Blocked(transact) => {
            debug!(clock = now.0, service = service.0, transact = transact.0, "blocked");
        }
        Handled::InService(_) | Handled::StillQueued(_) => {}
    }
}
