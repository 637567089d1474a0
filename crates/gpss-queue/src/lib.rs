//! `gpss-queue`: FIFO waiting areas attached to services.
//!
//! | Module        | Contents                                             |
//! |---------------|------------------------------------------------------|
//! | [`queue`]     | `Queue` (`VecDeque<TransactId>` + statistics)        |
//! | [`statistic`] | `QueueStatistics`, `QueueEvent`                      |
//!
//! A queue holds transact identities only; the transacts themselves stay
//! in the model's `Storage`.

pub mod queue;
pub mod statistic;


pub use queue::Queue;
pub use statistic::{QueueEvent, QueueStatistics};
