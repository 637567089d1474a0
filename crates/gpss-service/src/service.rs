//! `Service<K>`: the resource-contention state machine.

use std::fmt;

use gpss_core::{
    DelayPolicy, GpssError, GpssResult, Identified, ServiceId, SimRng, Transact, TransactId,
    TransactKind,
};
use gpss_queue::{Queue, QueueStatistics};

use crate::{Handled, Seizure, ServiceContext, ServiceState};

/// A single-capacity resource, optionally fronted by a FIFO [`Queue`].
///
/// At most one transact occupies the service at a time; contenders wait in
/// the queue (or, without one, stay blocked in the current set) and leave
/// it strictly in arrival order.
pub struct Service<K: TransactKind> {
    id:       ServiceId,
    occupant: Option<TransactId>,
    history:  Vec<Transact<K>>,
    queue:    Option<Queue>,
    delay:    Box<dyn DelayPolicy>,
    rng:      SimRng,
}

impl<K: TransactKind> Service<K> {
    /// A free service with empty history.  `with_queue` attaches a fresh
    /// [`Queue`].
    pub fn new<D>(id: ServiceId, delay: D, with_queue: bool, rng: SimRng) -> Self
    where
        D: DelayPolicy + 'static,
    {
        Self {
            id,
            occupant: None,
            history:  Vec::new(),
            queue:    with_queue.then(Queue::new),
            delay:    Box::new(delay),
            rng,
        }
    }

    // ── Transition ────────────────────────────────────────────────────────

    /// Run one step of the state machine for `transact`.
    ///
    /// Fails only if a transact the service needs to move is not live in
    /// `ctx.storage`, which indicates the caller dispatched something it
    /// should not have.
    pub fn handle(
        &mut self,
        transact: TransactId,
        ctx:      &mut ServiceContext<'_, K>,
    ) -> GpssResult<Handled> {
        match self.occupant {
            None => self.seize(transact, ctx).map(Handled::Seized),

            Some(occupant) if occupant == transact => {
                let due = ctx
                    .storage
                    .get(transact)
                    .ok_or(GpssError::TransactNotFound(transact))?
                    .time;
                if due == ctx.now {
                    self.release(ctx)
                } else {
                    Ok(Handled::InService(transact))
                }
            }

            Some(_) => Ok(match self.queue.as_mut() {
                Some(queue) => {
                    if queue.enter_if_absent(transact, ctx.now) {
                        Handled::Queued { transact, length: queue.len() }
                    } else {
                        Handled::StillQueued(transact)
                    }
                }
                None => Handled::Blocked(transact),
            }),
        }
    }

    /// Take the service: sample the delay, stamp the completion time, and
    /// move the transact to the future set.
    fn seize(
        &mut self,
        transact: TransactId,
        ctx:      &mut ServiceContext<'_, K>,
    ) -> GpssResult<Seizure> {
        let completes_at = ctx.now + self.delay.delay(&mut self.rng);
        if !ctx.storage.reschedule(transact, completes_at) {
            return Err(GpssError::TransactNotFound(transact));
        }
        self.occupant = Some(transact);
        Ok(Seizure { transact, completes_at })
    }

    /// Vacate the service, hand it to the queue head, and terminate the
    /// outgoing occupant.
    ///
    /// Nothing is committed until the head has been seized, so an error
    /// leaves the service exactly as it was.
    fn release(&mut self, ctx: &mut ServiceContext<'_, K>) -> GpssResult<Handled> {
        let Some(outgoing) = self.occupant else {
            return Err(GpssError::Config(format!("{} released while free", self.id)));
        };
        let snapshot = *ctx
            .storage
            .get(outgoing)
            .ok_or(GpssError::TransactNotFound(outgoing))?;

        let next = match self.queue.as_ref().and_then(Queue::peek_front) {
            Some(head) => {
                let seizure = self.seize(head, ctx)?;
                if let Some(queue) = self.queue.as_mut() {
                    queue.dequeue_front(ctx.now);
                }
                Some(seizure)
            }
            None => {
                self.occupant = None;
                None
            }
        };

        self.history.push(snapshot);
        ctx.storage.terminate(outgoing);
        Ok(Handled::Released { transact: outgoing, next })
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn state(&self) -> ServiceState {
        match self.occupant {
            Some(t) => ServiceState::Busy(t),
            None => ServiceState::Free,
        }
    }

    #[inline]
    pub fn occupant(&self) -> Option<TransactId> {
        self.occupant
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.occupant.is_some()
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        !self.is_busy()
    }

    /// `true` if `transact` currently occupies this service.
    #[inline]
    pub fn is_processing(&self, transact: TransactId) -> bool {
        self.occupant == Some(transact)
    }

    /// Transacts that completed service, in release order.
    pub fn history(&self) -> &[Transact<K>] {
        &self.history
    }

    pub fn queue(&self) -> Option<&Queue> {
        self.queue.as_ref()
    }

    pub fn queue_statistics(&self) -> Option<&QueueStatistics> {
        self.queue.as_ref().map(Queue::statistics)
    }

    /// Forget completed transacts (occupant and queue are untouched).
    pub fn reset_history(&mut self) {
        self.history.clear();
    }
}

impl<K: TransactKind> Identified for Service<K> {
    type Id = ServiceId;

    #[inline]
    fn id(&self) -> ServiceId {
        self.id
    }
}

impl<K: TransactKind> fmt::Display for Service<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Service {}", self.id.0)?;
        match self.occupant {
            Some(t) => writeln!(f, "Current transact: {}", t.0)?,
            None => writeln!(f, "Current transact: none")?,
        }
        writeln!(f, "History:")?;
        for t in &self.history {
            writeln!(f, "  {t}")?;
        }
        if let Some(queue) = &self.queue {
            write!(f, "{queue}")?;
        }
        Ok(())
    }
}
