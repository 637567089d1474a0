//! Incremental builder for a [`Model`].

use gpss_core::{
    DelayPolicy, GeneratorId, GpssError, Identified, ServiceId, SimConfig, SimRng, TransactKind,
};
use gpss_generator::{Generator, TransactSequence};
use gpss_service::Service;
use gpss_storage::Storage;

use crate::{Model, ModelError, ModelResult, RoutingTable};

/// Builds a [`Model<K>`] from its static configuration: services,
/// generators, and the routing table.
///
/// Services and generators receive sequential IDs in the order they are
/// added.  Each gets its own RNG stream derived from `config.seed`, so
/// adding entities never changes the delays sampled by existing ones.
/// Adding more entities than the ID type can number hands out the
/// `INVALID` ID and makes [`build`][Self::build] fail.
///
/// # Example
///
/// ```rust,ignore
/// let mut b = ModelBuilder::new(config);
/// let road = b.add_service(UniformSteps::new(2, 8, 10)?, true);
/// b.add_generator(Vehicle::Car, UniformSteps::new(5, 9, 10)?);
/// b.add_generator(Vehicle::Car, UniformSteps::new(5, 9, 10)?);
/// b.route(Vehicle::Car, road);
/// let mut model = b.build()?;
/// ```
pub struct ModelBuilder<K: TransactKind> {
    config:     SimConfig,
    routing:    RoutingTable<K>,
    services:   Vec<Service<K>>,
    generators: Vec<Generator<K>>,
    /// First error raised while adding entities; reported by `build`.
    deferred:   Option<ModelError>,
}

impl<K: TransactKind> ModelBuilder<K> {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            routing:    RoutingTable::new(),
            services:   Vec::new(),
            generators: Vec::new(),
            deferred:   None,
        }
    }

    /// Add a free service.  `with_queue` gives it a FIFO queue; without one,
    /// contenders stay blocked in the current set until it frees up.
    pub fn add_service<D>(&mut self, delay: D, with_queue: bool) -> ServiceId
    where
        D: DelayPolicy + 'static,
    {
        let id: ServiceId = match sequential_id(self.services.len(), "service") {
            Ok(id) => id,
            Err(e) => {
                self.deferred.get_or_insert(e);
                return ServiceId::INVALID;
            }
        };
        let rng = SimRng::for_stream(self.config.seed, 2 * u64::from(id.0));
        self.services.push(Service::new(id, delay, with_queue, rng));
        id
    }

    /// Add an unbounded generator of `kind` transacts.
    ///
    /// Its delay must move the clock: a constant zero is rejected by
    /// [`build`][Self::build], and a sampled policy that keeps returning
    /// zero stops the run with [`ModelError::Stalled`].
    pub fn add_generator<D>(&mut self, kind: K, delay: D) -> GeneratorId
    where
        D: DelayPolicy + 'static,
    {
        self.push_generator(kind, delay, None)
    }

    /// Add a generator that stops after `limit` emissions.
    pub fn add_generator_with_limit<D>(&mut self, kind: K, delay: D, limit: u64) -> GeneratorId
    where
        D: DelayPolicy + 'static,
    {
        self.push_generator(kind, delay, Some(limit))
    }

    fn push_generator<D>(&mut self, kind: K, delay: D, limit: Option<u64>) -> GeneratorId
    where
        D: DelayPolicy + 'static,
    {
        let id: GeneratorId = match sequential_id(self.generators.len(), "generator") {
            Ok(id) => id,
            Err(e) => {
                self.deferred.get_or_insert(e);
                return GeneratorId::INVALID;
            }
        };
        let rng = SimRng::for_stream(self.config.seed, 2 * u64::from(id.0) + 1);
        let generator = Generator::new(id, kind, delay, self.config.start_time, rng);
        self.generators.push(match limit {
            Some(n) => generator.with_limit(n),
            None => generator,
        });
        id
    }

    /// Route every transact of `kind` to `service`.  A later call for the
    /// same kind replaces the earlier route.
    pub fn route(&mut self, kind: K, service: ServiceId) -> &mut Self {
        self.routing.insert(kind, service);
        self
    }

    /// Validate the configuration and return a ready-to-run [`Model`].
    ///
    /// Fails if more entities were added than can be numbered, the time
    /// range is inverted, a route targets a service that
    /// was never added, a generator's kind has no route, or an unbounded
    /// generator has a constant zero delay (it would emit forever without
    /// the clock moving).
    pub fn build(self) -> ModelResult<Model<K>> {
        if let Some(e) = self.deferred {
            return Err(e);
        }
        self.config.validate()?;

        for (kind, service) in self.routing.iter() {
            if service.index() >= self.services.len() {
                return Err(ModelError::Config(format!(
                    "route for {kind:?} targets {service}, but only {} services exist",
                    self.services.len()
                )));
            }
        }

        for g in &self.generators {
            if !self.routing.contains(g.kind()) {
                return Err(ModelError::UnroutedKind {
                    kind:     format!("{:?}", g.kind()),
                    transact: None,
                });
            }
            if g.limit().is_none() && g.fixed_delay() == Some(0) {
                return Err(ModelError::Config(format!(
                    "generator {} has a zero delay and no emission limit",
                    g.id()
                )));
            }
        }

        Ok(Model {
            clock:      self.config.start_time,
            config:     self.config,
            routing:    self.routing,
            generators: self.generators,
            services:   self.services,
            storage:    Storage::new(),
            numbers:    TransactSequence::new(),
        })
    }
}

/// The ID for the entity stored at position `len`.
///
/// `len + 1` must convert as well, which keeps the all-ones `INVALID`
/// sentinel out of circulation.
pub(crate) fn sequential_id<I: TryFrom<usize>>(len: usize, what: &'static str) -> ModelResult<I> {
    len.checked_add(1)
        .and_then(|next| I::try_from(next).ok())
        .and_then(|_| I::try_from(len).ok())
        .ok_or(ModelError::Core(GpssError::IdsExhausted(what)))
}
