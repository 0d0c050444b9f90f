//! Tick driver — turns wall-clock frame time into fixed logical steps.
//!
//! RULES:
//!   - The simulation only ever advances in whole ticks of `tick_interval`.
//!   - At most `max_ticks_per_frame` ticks run per frame. Time beyond
//!     the cap is dropped, not carried, so a stall cannot snowball.
//!   - The driver never reads the clock itself; callers pass elapsed time.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct TickDriver {
    tick_interval:       Duration,
    max_ticks_per_frame: u32,
    accumulator:         Duration,
    dropped_ticks:       u64,
}

impl TickDriver {
    /// Panics if either value is zero; `SimConfig::validate` rejects both.
    pub fn new(tick_interval: Duration, max_ticks_per_frame: u32) -> Self {
        assert!(!tick_interval.is_zero(), "tick interval must be non-zero");
        assert!(max_ticks_per_frame > 0, "max_ticks_per_frame must be > 0");
        Self {
            tick_interval,
            max_ticks_per_frame,
            accumulator: Duration::ZERO,
            dropped_ticks: 0,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn max_ticks_per_frame(&self) -> u32 {
        self.max_ticks_per_frame
    }

    /// Whole ticks discarded by the cap since construction.
    pub fn dropped_ticks(&self) -> u64 {
        self.dropped_ticks
    }

    /// Add a frame's elapsed time; returns how many ticks to run now.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator = self.accumulator.saturating_add(elapsed);
        let interval = self.tick_interval.as_nanos();
        let due = self.accumulator.as_nanos() / interval;
        let remainder = self.accumulator.as_nanos() % interval;

        let cap = u128::from(self.max_ticks_per_frame);
        let run = due.min(cap);
        if due > cap {
            let dropped = due - cap;
            self.dropped_ticks = self
                .dropped_ticks
                .saturating_add(u64::try_from(dropped).unwrap_or(u64::MAX));
            log::warn!("tick driver behind by {due} ticks; running {run}, dropping {dropped}");
        }
        // remainder < interval, which is itself a Duration
        self.accumulator = Duration::from_nanos(remainder as u64);
        run as u32
    }

    /// Discard banked time, e.g. while paused.
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }

    /// Fraction of the next tick already elapsed, in [0, 1).
    /// Presentation only (interpolation); never feeds the simulation.
    pub fn alpha(&self) -> f64 {
        self.accumulator.as_secs_f64() / self.tick_interval.as_secs_f64()
    }
}
