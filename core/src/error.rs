use crate::types::{StateHash, Tick};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid tick: expected {expected}, got {actual}")]
    TickMismatch { expected: Tick, actual: Tick },

    #[error(
        "Determinism violation at tick {tick}: recorded {recorded:#018x}, recomputed {recomputed:#018x}"
    )]
    DeterminismViolation {
        tick:       Tick,
        recorded:   StateHash,
        recomputed: StateHash,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
