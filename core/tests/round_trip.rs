//! Save/load round trips — every system, and the whole orchestrator.

use sentinel_core::{
    drone_system::DroneSystem,
    fixed::Fixed,
    projectile_system::{ProjectileState, ProjectileSystem},
    scenario,
    snapshot::WorldSnapshot,
    system::SimSystem,
};

fn assert_round_trip(system: &mut dyn SimSystem, ticks: u64) {
    for tick in 1..=ticks {
        system.step(tick);
        let before = system.hash();
        let saved = system.save_state();
        system.load_state(&saved);
        assert_eq!(system.hash(), before, "{} round trip changed hash at tick {tick}", system.name());
        assert_eq!(saved.hash(), before, "{} saved state hashes differently", system.name());
    }
}

#[test]
fn drone_round_trips_at_every_tick() {
    assert_round_trip(&mut DroneSystem::new(), 20);
}

#[test]
fn projectile_round_trips_at_every_tick() {
    let mut p = ProjectileSystem::new(
        ProjectileState::launched(Fixed::from_fraction(3, 4), Fixed::from_int(7)),
        Fixed::from_fraction(1, 3),
    );
    assert_round_trip(&mut p, 40);
}

#[test]
fn saved_state_is_independent_of_the_live_system() {
    let mut drone = DroneSystem::new();
    let saved = drone.save_state();
    let saved_hash = saved.hash();

    drone.step(1);
    drone.step(2);

    assert_ne!(drone.hash(), saved_hash);
    assert_eq!(saved.hash(), saved_hash, "saved copy changed with the live system");

    drone.load_state(&saved);
    assert_eq!(drone.hash(), saved_hash);
}

#[test]
fn orchestrator_round_trip_keeps_aggregate_hash_and_tick() {
    let mut orchestrator = scenario::seeded_swarm(31337, 12);
    orchestrator.run_ticks(17);
    let hash = orchestrator.hash();

    let snapshot = orchestrator.save_state();
    orchestrator.run_ticks(5);
    orchestrator.load_state(&snapshot);

    assert_eq!(orchestrator.hash(), hash);
    assert_eq!(orchestrator.tick(), 17);
    assert_eq!(snapshot.hash(), hash);
}

#[test]
fn json_snapshot_reload_is_bit_exact() {
    let mut orchestrator = scenario::seeded_swarm(5, 6);
    orchestrator.run_ticks(9);
    let snapshot = orchestrator.save_state();

    let json = snapshot.to_json().expect("serialize");
    let reloaded = WorldSnapshot::from_json(&json).expect("deserialize");
    assert_eq!(reloaded, snapshot);

    let mut fresh = scenario::seeded_swarm(6, 6);
    fresh.load_state(&reloaded);
    assert_eq!(fresh.hash(), orchestrator.hash());
    assert_eq!(fresh.run_ticks(10), orchestrator.run_ticks(10));
}

#[test]
#[should_panic(expected = "snapshot has 1 states for 2 registered systems")]
fn snapshot_layout_mismatch_fails_fast() {
    let snapshot = scenario::drone_demo().save_state();
    let mut other = scenario::seeded_swarm(1, 1);
    other.load_state(&snapshot);
}
