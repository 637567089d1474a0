//! `gpss-core`: foundational types for the `gpss` discrete-event kernel.
//!
//! This crate is a dependency of every other `gpss-*` crate.  It has no
//! `gpss-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`ids`]        | `TransactId`, `ServiceId`, `GeneratorId`                 |
//! | [`time`]       | `Tick`, `SimConfig`                                      |
//! | [`capability`] | `Identified`, `Clocked`                                  |
//! | [`transact`]   | `Transact<K>`, `TransactKind`                            |
//! | [`delay`]      | `DelayPolicy`, `Fixed`, `UniformSteps`                   |
//! | [`rng`]        | `SimRng` (one seeded stream per service or generator)    |
//! | [`error`]      | `GpssError`, `GpssResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to IDs, `Tick`, `SimConfig`. |

pub mod capability;
pub mod delay;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod transact;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use capability::{Clocked, Identified};
pub use delay::{DelayPolicy, Fixed, UniformSteps};
pub use error::{GpssError, GpssResult};
pub use ids::{GeneratorId, ServiceId, TransactId};
pub use rng::SimRng;
pub use time::{SimConfig, Tick};
pub use transact::{Transact, TransactKind};
