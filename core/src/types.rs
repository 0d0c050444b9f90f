//! Shared primitive types used across the entire simulation.

/// A simulation tick. One tick = one fixed logical step.
pub type Tick = u64;

/// A 64-bit state fingerprint produced by the hash combine.
pub type StateHash = u64;

/// Index into a history buffer. Index 0 is the oldest retained entry.
pub type HistoryIndex = usize;
