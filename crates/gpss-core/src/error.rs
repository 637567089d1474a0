//! Kernel-level error type.
//!
//! `gpss-model` keeps its own `ModelError` for loop failures and wraps
//! `GpssError` as one variant; output backends do the same with I/O errors.

use thiserror::Error;

use crate::{Tick, TransactId};

/// Errors raised by the primitives in this crate.
#[derive(Debug, Error)]
pub enum GpssError {
    #[error("transact {0} not found")]
    TransactNotFound(TransactId),

    #[error("end time {end} precedes start time {start}")]
    InvalidTimeRange { start: Tick, end: Tick },

    #[error("invalid delay policy: {0}")]
    InvalidDelay(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0} IDs exhausted")]
    IdsExhausted(&'static str),
}

/// Shorthand result type for `gpss-core`.
pub type GpssResult<T> = Result<T, GpssError>;
