//! System trait and saved-state variants.
//!
//! RULE: Every simulated subsystem implements SimSystem.
//! The orchestrator calls step() on each registered system
//! in registration order, every tick.
//! A system owns its state; the orchestrator only ever holds
//! the deep copies returned by save_state().

use crate::{
    drone_system::DroneState,
    projectile_system::ProjectileState,
    types::{StateHash, Tick},
};
use serde::{Deserialize, Serialize};

/// The contract every system must fulfill.
pub trait SimSystem: Send {
    /// Unique stable name for this system.
    fn name(&self) -> &'static str;

    /// Advance one logical step. Must depend only on the current
    /// state and `tick`: no RNG, no clock reads, no blocking.
    fn step(&mut self, tick: Tick);

    /// Fingerprint of the current state.
    fn hash(&self) -> StateHash;

    /// Independent deep copy of the current state.
    fn save_state(&self) -> SystemState;

    /// Replace the current state wholesale.
    ///
    /// Panics if `state` belongs to a different kind of system.
    fn load_state(&mut self, state: &SystemState);
}

/// Saved state of one system.
/// Variants are appended per system kind — never reordered.
/// Fields serialize in hash-combine order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SystemState {
    Drone(DroneState),
    Projectile(ProjectileState),
}

impl SystemState {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Drone(_)      => "drone",
            Self::Projectile(_) => "projectile",
        }
    }

    /// The same value the owning system's hash() returns for this state.
    pub fn hash(&self) -> StateHash {
        match self {
            Self::Drone(s)      => s.hash(),
            Self::Projectile(s) => s.hash(),
        }
    }

    pub fn as_drone(&self) -> Option<&DroneState> {
        match self {
            Self::Drone(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_projectile(&self) -> Option<&ProjectileState> {
        match self {
            Self::Projectile(s) => Some(s),
            _ => None,
        }
    }
}
