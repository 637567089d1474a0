//! `Generator<K>`: produces transacts of one kind at sampled intervals.

use gpss_core::{
    Clocked, DelayPolicy, GeneratorId, GpssResult, Identified, SimRng, Tick, Transact,
    TransactKind,
};

use crate::TransactSequence;

/// A source of transacts.
///
/// Invariant: `last_generation_time` equals the time stamped on the most
/// recently emitted transact (or the model start time before the first).
pub struct Generator<K: TransactKind> {
    id:                   GeneratorId,
    kind:                 K,
    last_generation_time: Tick,
    emitted:              u64,
    /// Stop after this many emissions; `None` means unbounded.
    limit:                Option<u64>,
    /// Consecutive emissions stamped with the clock they were made at.
    zero_delay_streak:    u64,
    delay:                Box<dyn DelayPolicy>,
    rng:                  SimRng,
}

impl<K: TransactKind> Generator<K> {
    /// A generator whose first emission happens when the clock reads
    /// `start_time`.
    pub fn new<D>(id: GeneratorId, kind: K, delay: D, start_time: Tick, rng: SimRng) -> Self
    where
        D: DelayPolicy + 'static,
    {
        Self {
            id,
            kind,
            last_generation_time: start_time,
            emitted: 0,
            limit: None,
            zero_delay_streak: 0,
            delay: Box::new(delay),
            rng,
        }
    }

    /// Cap the number of emissions.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The clock value at which this generator next emits.
    #[inline]
    pub fn emission_time(&self) -> Tick {
        self.last_generation_time
    }

    /// `true` once the emission limit has been reached.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.limit.is_some_and(|limit| self.emitted >= limit)
    }

    /// `true` if the generator should emit at `clock`.
    #[inline]
    pub fn is_due(&self, clock: Tick) -> bool {
        !self.is_exhausted() && self.last_generation_time == clock
    }

    /// Create the next transact, stamped `clock + delay()`, and remember
    /// that time as the next emission time.
    ///
    /// Fails without touching the generator if `numbers` is exhausted.
    pub fn emit(
        &mut self,
        clock: &impl Clocked,
        numbers: &mut TransactSequence,
    ) -> GpssResult<Transact<K>> {
        let id = numbers.next_id()?;
        let now = clock.now();
        let time = now + self.delay.delay(&mut self.rng);
        self.zero_delay_streak = if time == now { self.zero_delay_streak + 1 } else { 0 };
        self.last_generation_time = time;
        self.emitted += 1;
        Ok(Transact::new(id, self.kind, time))
    }

    /// How many emissions in a row were stamped with the clock they were
    /// made at.  Such a generator is due again without the clock moving.
    #[inline]
    pub fn zero_delay_streak(&self) -> u64 {
        self.zero_delay_streak
    }

    #[inline]
    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// The delay's constant value, if the policy is deterministic.
    pub fn fixed_delay(&self) -> Option<u64> {
        self.delay.fixed()
    }
}

impl<K: TransactKind> Identified for Generator<K> {
    type Id = GeneratorId;

    #[inline]
    fn id(&self) -> GeneratorId {
        self.id
    }
}
