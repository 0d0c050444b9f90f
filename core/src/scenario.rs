//! Scenario builders — fully wired orchestrators.
//!
//! Registration order is fixed per scenario and part of its hash.
//! Seeds only shape initial states; stepping never draws randomness.

use crate::{
    drone_system::{DroneState, DroneSystem},
    fixed::Fixed,
    orchestrator::Orchestrator,
    projectile_system::{ProjectileState, ProjectileSystem},
    rng::{RngBank, SystemSlot},
};

/// The reference scenario: one drone at the origin, vx = 1.0, vy = 0.5.
pub fn drone_demo() -> Orchestrator {
    let mut orchestrator = Orchestrator::new();
    orchestrator.register(SystemSlot::Drone, Box::new(DroneSystem::new()));
    orchestrator
}

/// One projectile launched from the origin with upward speed `v0`.
pub fn ballistic(vx: Fixed, v0: Fixed, gravity: Fixed) -> Orchestrator {
    let mut orchestrator = Orchestrator::new();
    orchestrator.register(
        SystemSlot::Projectile,
        Box::new(ProjectileSystem::new(ProjectileState::launched(vx, v0), gravity)),
    );
    orchestrator
}

/// A projectile followed by `drones` seeded drones.
///
/// Velocities are drawn on a 1/1000 grid in [-1, 1] from
/// per-instance streams, so the same seed always builds the same world.
pub fn seeded_swarm(seed: u64, drones: u32) -> Orchestrator {
    let bank = RngBank::new(seed);

    let mut launch = bank.for_instance(SystemSlot::Projectile, 0);
    let vx = launch.next_fixed_milli(500, 2_000);
    let v0 = launch.next_fixed_milli(5_000, 20_000);

    let mut orchestrator = ballistic(vx, v0, Fixed::from_fraction(1, 2));
    for instance in 0..drones {
        let mut rng = bank.for_instance(SystemSlot::Drone, instance);
        let state = DroneState {
            x:  rng.next_fixed_milli(-100_000, 100_000),
            y:  rng.next_fixed_milli(-100_000, 100_000),
            vx: rng.next_fixed_milli(-1_000, 1_000),
            vy: rng.next_fixed_milli(-1_000, 1_000),
        };
        orchestrator.register(SystemSlot::Drone, Box::new(DroneSystem::with_state(state)));
    }
    log::debug!("seeded swarm: seed={seed} drones={drones}");
    orchestrator
}
