//! `gpss-service`: single-capacity resources.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`context`] | `ServiceContext<'a, K>`: clock + storage for one dispatch |
//! | [`outcome`] | `Handled`, `Seizure`, `ServiceState`                       |
//! | [`service`] | `Service<K>` and its `handle` transition                   |
//!
//! # Transition table
//!
//! ```text
//! Free            + any transact                 → seize           → Busy(t)
//! Busy(o) + o, clock == o.time                   → release; seize queue head, if any
//!                                                                  → Free | Busy(head)
//! Busy(o) + o, clock != o.time                   → no-op           → Busy(o)
//! Busy(o) + t != o                               → queue t (idempotent)
//!                                                                  → Busy(o)
//! ```
//!
//! A seize computes `completion = clock + delay()`, stamps it on the
//! transact, and moves it back to the future set.  A release appends the
//! occupant to the service history and terminates it in `Storage`.

pub mod context;
pub mod outcome;
pub mod service;

#[cfg(test)]
mod tests;

pub use context::ServiceContext;
pub use outcome::{Handled, Seizure, ServiceState};
pub use service::Service;
