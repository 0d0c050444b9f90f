//! Sentinel — a deterministic, hash-verifiable simulation core.
//!
//! Fixed-timestep systems are stepped in registration order by an
//! orchestrator, fingerprinted every tick, and recorded into a history
//! that supports ghost trails, scrubbing and rewind.

pub mod clock;
pub mod command;
pub mod config;
pub mod driver;
pub mod drone_system;
pub mod error;
pub mod event;
pub mod fixed;
pub mod hash;
pub mod history;
pub mod markers;
pub mod orchestrator;
pub mod projectile_system;
pub mod rng;
pub mod scenario;
pub mod session;
pub mod snapshot;
pub mod system;
pub mod types;
pub mod verify;
