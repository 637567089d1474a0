//! `gpss-storage`: the event list.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`storage`] | `Storage<K>`: future set, current set, terminal history    |
//!
//! # Partition model (summary)
//!
//! ```text
//!            admit                promote (time == clock)
//!  Generator ─────▶  future  ─────────────────────────────▶  current
//!                      ▲                                        │
//!                      └──────────── demote / reschedule ───────┤
//!                                                               │ terminate
//!                                                               ▼
//!                                                            history
//! ```
//!
//! `Storage` owns every live `Transact` value.  Because a value can only sit
//! in one `Vec` at a time, `future ∩ current = ∅` holds by construction;
//! services and queues only ever hold `TransactId`s.

pub mod storage;

#[cfg(test)]
mod tests;

pub use storage::Storage;
