//! Monotonic transact numbering.

use gpss_core::{GpssError, GpssResult, TransactId};

/// Hands out `TransactId(0)`, `TransactId(1)`, … in creation order.
///
/// One sequence is shared by every generator of a model so numbers are
/// unique across the whole run.  `TransactId::INVALID` is never issued.
#[derive(Debug, Default)]
pub struct TransactSequence {
    next: u32,
}

impl TransactSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sequence whose first issued ID is `first`.
    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// The next unused ID, or `IdsExhausted` once every valid ID is taken.
    pub fn next_id(&mut self) -> GpssResult<TransactId> {
        let id = TransactId(self.next);
        if id == TransactId::INVALID {
            return Err(GpssError::IdsExhausted("transact"));
        }
        self.next += 1;
        Ok(id)
    }

    /// How many IDs have been issued.
    pub fn issued(&self) -> u32 {
        self.next
    }
}
