use crate::{
    fixed::Fixed,
    hash::StateHasher,
    system::{SimSystem, SystemState},
    types::{StateHash, Tick},
};
use serde::{Deserialize, Serialize};

/// A ballistic projectile under constant gravity.
/// `tick` is the last tick this state was stepped at (0 before launch).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectileState {
    pub x:    Fixed,
    pub y:    Fixed,
    pub vx:   Fixed,
    pub vy:   Fixed,
    pub tick: Tick,
}

impl ProjectileState {
    pub fn launched(vx: Fixed, vy: Fixed) -> Self {
        Self { vx, vy, ..Self::default() }
    }

    pub fn hash(&self) -> StateHash {
        StateHasher::new()
            .fixed(self.x)
            .fixed(self.y)
            .fixed(self.vx)
            .fixed(self.vy)
            .u64(self.tick)
            .finish()
    }
}

pub struct ProjectileSystem {
    pub state: ProjectileState,
    /// Velocity lost per tick. Configuration, not state.
    gravity: Fixed,
}

impl ProjectileSystem {
    pub fn new(state: ProjectileState, gravity: Fixed) -> Self {
        Self { state, gravity }
    }

    pub fn gravity(&self) -> Fixed {
        self.gravity
    }
}

impl SimSystem for ProjectileSystem {
    fn name(&self) -> &'static str { "projectile" }

    /// Semi-implicit Euler: velocity first, then position.
    fn step(&mut self, tick: Tick) {
        self.state.vy -= self.gravity;
        self.state.x += self.state.vx;
        self.state.y += self.state.vy;
        self.state.tick = tick;
    }

    fn hash(&self) -> StateHash {
        self.state.hash()
    }

    fn save_state(&self) -> SystemState {
        SystemState::Projectile(self.state.clone())
    }

    fn load_state(&mut self, state: &SystemState) {
        match state {
            SystemState::Projectile(s) => self.state = s.clone(),
            other => panic!("projectile: cannot load {} state", other.kind()),
        }
    }
}
