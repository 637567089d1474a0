//! `gpss-generator`: arrival processes.
//!
//! | Module        | Contents                                             |
//! |---------------|------------------------------------------------------|
//! | [`generator`] | `Generator<K>`                                       |
//! | [`sequence`]  | `TransactSequence`: run-wide transact numbering      |
//!
//! A generator is due whenever the clock equals the time stamped on its
//! most recent transact (initially the model start time).  Emitting samples
//! the next inter-arrival delay, so each emission schedules the following
//! one: the transact it returns *is* the generator's next wake-up.

pub mod generator;
pub mod sequence;

#[cfg(test)]
mod tests;

pub use generator::Generator;
pub use sequence::TransactSequence;
