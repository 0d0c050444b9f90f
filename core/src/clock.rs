//! Simulation clock — owns the tick counter.

use crate::types::Tick;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimClock {
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self { current_tick: 0 }
    }

    /// Advance one tick. Returns the new tick number.
    /// Panics on overflow — a run never wraps.
    pub fn advance(&mut self) -> Tick {
        self.current_tick = self
            .current_tick
            .checked_add(1)
            .expect("tick counter overflow");
        self.current_tick
    }

    /// Jump to a recorded tick. Only snapshot restore may call this.
    pub(crate) fn restore(&mut self, tick: Tick) {
        self.current_tick = tick;
    }
}
