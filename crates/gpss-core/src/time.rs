//! Simulation time model.
//!
//! # Design
//!
//! Time is an integer `Tick`.  Unlike a fixed-step loop the kernel does not
//! advance the clock by one each iteration: it jumps straight to the earliest
//! pending event time (next-event time advance), so a `Tick` is simply "a
//! point on the model's time axis" and carries no wall-clock meaning.
//!
//! Integer time keeps all scheduling arithmetic exact and makes the
//! "release when `clock == completion time`" comparison well defined.

use std::fmt;

use crate::{GpssError, GpssResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation instant.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` units after `self`.
    ///
    /// Saturates at `u64::MAX` so a pathological delay can never wrap the
    /// clock backwards.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0.saturating_add(n))
    }

    /// Units elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        self.offset(rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically loaded from a JSON file by the application and handed to
/// `ModelBuilder::new`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Initial clock value.  Every generator's first emission is scheduled
    /// relative to this instant.
    pub start_time: Tick,

    /// The loop stops once the clock reaches or passes this instant.
    pub end_time: Tick,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl SimConfig {
    pub fn new(start_time: Tick, end_time: Tick, seed: u64) -> Self {
        Self { start_time, end_time, seed }
    }

    /// Reject configurations whose end precedes their start.
    pub fn validate(&self) -> GpssResult<()> {
        if self.end_time < self.start_time {
            return Err(GpssError::InvalidTimeRange {
                start: self.start_time,
                end:   self.end_time,
            });
        }
        Ok(())
    }

    /// Length of the configured run in ticks.
    #[inline]
    pub fn duration(&self) -> u64 {
        self.end_time.0.saturating_sub(self.start_time.0)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { start_time: Tick::ZERO, end_time: Tick(u64::MAX), seed: 0 }
    }
}
