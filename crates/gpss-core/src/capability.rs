//! Small capability traits shared by unrelated kernel types.
//!
//! Transacts, services, and generators all carry a sequential number; the
//! model and the per-call contexts handed to services and generators all
//! expose the current clock.  Each concrete type implements the capability
//! it needs explicitly instead of inheriting it.

use crate::Tick;

/// Something with a stable, sequentially assigned identity.
pub trait Identified {
    type Id: Copy + Eq + std::fmt::Debug;

    fn id(&self) -> Self::Id;
}

/// Read access to the model clock.
pub trait Clocked {
    fn now(&self) -> Tick;
}

impl Clocked for Tick {
    #[inline]
    fn now(&self) -> Tick {
        *self
    }
}
