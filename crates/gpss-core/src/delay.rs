//! Delay policies: how long a generator waits between emissions and how
//! long a service holds its occupant.
//!
//! A policy is sampled once per emission / seize.  Deterministic policies
//! ignore the RNG; sampled ones draw from the owning entity's own stream so
//! results are reproducible for a given seed.
//!
//! Any `Fn(&mut SimRng) -> u64` closure is also a policy:
//!
//! ```rust,ignore
//! let exp_ish = |rng: &mut SimRng| 5 + rng.gen_range(0..3) * rng.gen_range(0..3);
//! builder.service(exp_ish, true);
//! ```

use crate::{GpssError, GpssResult, SimRng};

/// Produces non-negative durations.
pub trait DelayPolicy: Send {
    /// Sample the next duration.
    fn delay(&mut self, rng: &mut SimRng) -> u64;

    /// The constant this policy always returns, if it is deterministic.
    ///
    /// Used by configuration validation; sampled policies return `None`.
    fn fixed(&self) -> Option<u64> {
        None
    }
}

// ── Fixed ─────────────────────────────────────────────────────────────────────

/// Always the same duration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Fixed(pub u64);

impl DelayPolicy for Fixed {
    #[inline]
    fn delay(&mut self, _rng: &mut SimRng) -> u64 {
        self.0
    }

    fn fixed(&self) -> Option<u64> {
        Some(self.0)
    }
}

// ── UniformSteps ──────────────────────────────────────────────────────────────

/// A uniform integer in `[min, max]` scaled by `step`.
///
/// `UniformSteps::new(5, 9, 10)` yields one of 50, 60, 70, 80, 90.
///
/// The bounds are only set through [`new`][Self::new], so `min <= max`
/// always holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UniformSteps {
    min:  u64,
    max:  u64,
    step: u64,
}

impl UniformSteps {
    pub fn new(min: u64, max: u64, step: u64) -> GpssResult<Self> {
        if min > max {
            return Err(GpssError::InvalidDelay(format!(
                "uniform range is empty: min {min} > max {max}"
            )));
        }
        Ok(Self { min, max, step })
    }

    #[inline]
    pub fn min(&self) -> u64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> u64 {
        self.max
    }

    #[inline]
    pub fn step(&self) -> u64 {
        self.step
    }
}

impl DelayPolicy for UniformSteps {
    fn delay(&mut self, rng: &mut SimRng) -> u64 {
        rng.gen_range(self.min..=self.max).saturating_mul(self.step)
    }

    fn fixed(&self) -> Option<u64> {
        (self.min == self.max || self.step == 0).then(|| self.min.saturating_mul(self.step))
    }
}

// ── Closures ──────────────────────────────────────────────────────────────────

impl<F> DelayPolicy for F
where
    F: FnMut(&mut SimRng) -> u64 + Send,
{
    #[inline]
    fn delay(&mut self, rng: &mut SimRng) -> u64 {
        self(rng)
    }
}
