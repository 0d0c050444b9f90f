//! The orchestrator — steps every system once per tick and folds
//! their hashes into one aggregate fingerprint.
//!
//! RULES:
//!   - Systems execute in registration order, every tick.
//!   - The aggregate hash folds system hashes in the same order,
//!     so reordering registration changes the hash.
//!   - The tick counter starts at 0 and moves by exactly 1 per step.
//!   - No system calls another system's functions directly.

use crate::{
    clock::SimClock,
    hash::{hash_combine, HashRecord, HASH_SEED},
    rng::SystemSlot,
    snapshot::WorldSnapshot,
    system::SimSystem,
    types::{StateHash, Tick},
};

pub struct Orchestrator {
    pub clock:  SimClock,
    systems:    Vec<(SystemSlot, Box<dyn SimSystem>)>,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self {
            clock:   SimClock::new(),
            systems: Vec::new(),
        }
    }

    /// Register a system. Registration order is execution order.
    pub fn register(&mut self, slot: SystemSlot, system: Box<dyn SimSystem>) {
        log::debug!("register {} in slot {:?} at index {}", system.name(), slot, self.systems.len());
        self.systems.push((slot, system));
    }

    pub fn tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn system_names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|(_, s)| s.name()).collect()
    }

    pub fn slots(&self) -> Vec<SystemSlot> {
        self.systems.iter().map(|(slot, _)| *slot).collect()
    }

    /// Advance one tick. This is the core simulation step.
    pub fn step(&mut self) -> Tick {
        let current_tick = self.clock.advance();
        for (_, system) in &mut self.systems {
            system.step(current_tick);
        }
        current_tick
    }

    /// Aggregate hash: fold each system's hash in registration order.
    pub fn hash(&self) -> StateHash {
        self.systems
            .iter()
            .fold(HASH_SEED, |acc, (_, s)| hash_combine(acc, s.hash()))
    }

    pub fn record(&self) -> HashRecord {
        HashRecord { tick: self.tick(), hash: self.hash() }
    }

    /// Run n ticks, returning the hash record after each one.
    /// Used for testing, replay and fast-forward.
    pub fn run_ticks(&mut self, n: u64) -> Vec<HashRecord> {
        (0..n)
            .map(|_| {
                self.step();
                let rec = self.record();
                log::debug!("{rec}");
                rec
            })
            .collect()
    }

    pub fn save_state(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick:   self.tick(),
            states: self.systems.iter().map(|(_, s)| s.save_state()).collect(),
        }
    }

    /// Restore every system and the clock from a snapshot.
    ///
    /// Panics if the snapshot does not match the registered layout.
    pub fn load_state(&mut self, snapshot: &WorldSnapshot) {
        assert_eq!(
            snapshot.states.len(),
            self.systems.len(),
            "snapshot has {} states for {} registered systems",
            snapshot.states.len(),
            self.systems.len()
        );
        for ((_, system), state) in self.systems.iter_mut().zip(&snapshot.states) {
            system.load_state(state);
        }
        self.clock.restore(snapshot.tick);
        log::debug!("tick={} state restored from snapshot", snapshot.tick);
    }
}

impl Default for Orchestrator {
    fn default() -> Self { Self::new() }
}
