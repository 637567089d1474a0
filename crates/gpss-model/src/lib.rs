//! `gpss-model`: the simulation clock and its three-phase tick loop.
//!
//! # Tick loop
//!
//! ```text
//! while clock < end_time:
//!   ① Generate:   every generator due at `clock` emits one transact; the
//!                 routing table stamps its handler; Storage admits it to
//!                 the future set.
//!   ② Correct:    clock = min(time) over the future set (stop if empty);
//!                 every future transact with time == clock moves to the
//!                 current set.
//!   ③ Dispatch:   each current transact, in insertion order, is handed to
//!                 the service named by its handler:
//!                   free service        → seize (back to future set)
//!                   occupant, due now   → release (history) + seize queue head
//!                   occupant, not due   → nothing
//!                   other contender     → queue (idempotent)
//! ```
//!
//! The loop is strictly sequential.  A transact moved out of the current
//! set earlier in a dispatch pass (e.g. a queue head seized by a release)
//! is not dispatched again in that pass.  Transacts blocked on a queueless
//! service are retried once at the end of any pass that released a service.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                               |
//! |-----------|------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the routing table.     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gpss_core::{Fixed, SimConfig, Tick};
//! use gpss_model::ModelBuilder;
//!
//! let mut b = ModelBuilder::new(SimConfig::new(Tick(0), Tick(200), 42));
//! let road = b.add_service(Fixed(15), true);
//! b.add_generator(Vehicle::Car, Fixed(10));
//! b.route(Vehicle::Car, road);
//! let mut model = b.build()?;
//! let done = model.simulate(Tick(200))?;
//! println!("{} cars through", done.history().len());
//! ```

pub mod builder;
pub mod error;
pub mod model;
pub mod observer;
pub mod routing;


pub use builder::ModelBuilder;
pub use error::{ModelError, ModelResult};
pub use model::{FinalState, Model, Step, StopReason, MAX_ZERO_DELAY_STREAK};
pub use observer::{ModelObserver, NoopObserver};
pub use routing::RoutingTable;
