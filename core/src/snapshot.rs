//! Snapshot serialization — full orchestrator state to/from JSON.
//!
//! A snapshot captures everything needed to resume simulation
//! from its tick: the clock and every system's saved state,
//! in registration order. That order is the hash-combine order,
//! so a reloaded snapshot hashes identically.

use crate::{
    error::SimResult,
    hash::{hash_combine, HASH_SEED},
    system::SystemState,
    types::{StateHash, Tick},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick:   Tick,
    pub states: Vec<SystemState>,
}

impl WorldSnapshot {
    /// Aggregate hash, recomputed from the stored states alone.
    pub fn hash(&self) -> StateHash {
        self.states
            .iter()
            .fold(HASH_SEED, |acc, s| hash_combine(acc, s.hash()))
    }

    pub fn state(&self, index: usize) -> Option<&SystemState> {
        self.states.get(index)
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
