use crate::{
    fixed::Fixed,
    hash::StateHasher,
    system::{SimSystem, SystemState},
    types::{StateHash, Tick},
};
use serde::{Deserialize, Serialize};

/// A drone drifting at constant velocity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroneState {
    pub x:  Fixed,
    pub y:  Fixed,
    pub vx: Fixed,
    pub vy: Fixed,
}

impl Default for DroneState {
    fn default() -> Self {
        Self {
            x:  Fixed::ZERO,
            y:  Fixed::ZERO,
            vx: Fixed::ONE,
            vy: Fixed::from_fraction(1, 2),
        }
    }
}

impl DroneState {
    pub fn hash(&self) -> StateHash {
        StateHasher::new()
            .fixed(self.x)
            .fixed(self.y)
            .fixed(self.vx)
            .fixed(self.vy)
            .finish()
    }
}

pub struct DroneSystem {
    pub state: DroneState,
}

impl DroneSystem {
    pub fn new() -> Self {
        Self { state: DroneState::default() }
    }

    pub fn with_state(state: DroneState) -> Self {
        Self { state }
    }
}

impl Default for DroneSystem {
    fn default() -> Self { Self::new() }
}

impl SimSystem for DroneSystem {
    fn name(&self) -> &'static str { "drone" }

    fn step(&mut self, _tick: Tick) {
        self.state.x += self.state.vx;
        self.state.y += self.state.vy;
    }

    fn hash(&self) -> StateHash {
        self.state.hash()
    }

    fn save_state(&self) -> SystemState {
        SystemState::Drone(self.state.clone())
    }

    fn load_state(&mut self, state: &SystemState) {
        match state {
            SystemState::Drone(s) => self.state = s.clone(),
            other => panic!("drone: cannot load {} state", other.kind()),
        }
    }
}
