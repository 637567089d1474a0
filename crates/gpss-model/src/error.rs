use gpss_core::{GeneratorId, GpssError, ServiceId, Tick, TransactId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model configuration error: {0}")]
    Config(String),

    #[error("no route for transact kind {kind} (transact {transact:?})")]
    UnroutedKind {
        kind:     String,
        transact: Option<TransactId>,
    },

    #[error("{transact} has handler {handler}, which is not a configured service")]
    UnresolvedHandler {
        transact: TransactId,
        handler:  ServiceId,
    },

    #[error("{generator} keeps emitting at {clock} without the clock moving")]
    Stalled {
        generator: GeneratorId,
        clock:     Tick,
    },

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error(transparent)]
    Core(#[from] GpssError),
}

pub type ModelResult<T> = Result<T, ModelError>;
