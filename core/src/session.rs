//! The simulation session — orchestrator, history and run mode
//! threaded together as one value.
//!
//! RUN MODES:
//!   Running        — frames produce ticks; every tick is recorded.
//!   Paused         — no ticks; the cursor scrubs read-only through history.
//!   PausedRewound  — paused with the cursor off the latest entry.
//!
//! TRANSITIONS:
//!   Running       → Paused         pause; cursor = last index
//!   Paused        → PausedRewound  cursor moved off the last index
//!   PausedRewound → Paused         cursor moved back onto the last index
//!   Paused        → Running        resume; live state continues
//!   PausedRewound → Running        resume; live state := entry at cursor,
//!                                  every later entry discarded
//!
//! RULES:
//!   - The session is the only writer of its history.
//!   - Cursor input is clamped, never rejected.
//!   - Resuming from a rewound pause destroys the recorded future.
//!     There is no undo.

use crate::{
    command::ScrubCommand,
    config::SimConfig,
    driver::TickDriver,
    error::SimResult,
    event::SimEvent,
    history::{History, HistoryEntry},
    orchestrator::Orchestrator,
    types::HistoryIndex,
    verify::{verify_history, VerificationReport},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    Running,
    Paused,
    PausedRewound,
}

impl RunMode {
    pub fn is_paused(self) -> bool {
        !matches!(self, Self::Running)
    }
}

pub struct Session {
    orchestrator: Orchestrator,
    history:      History,
    driver:       TickDriver,
    mode:         RunMode,
    cursor:       HistoryIndex,
}

impl Session {
    /// Wrap an orchestrator and record its current state as the first entry.
    pub fn new(orchestrator: Orchestrator, config: &SimConfig) -> SimResult<Self> {
        config.validate()?;
        Self::with_parts(orchestrator, config.history(), config.driver())
    }

    pub fn with_parts(
        orchestrator: Orchestrator,
        mut history: History,
        driver: TickDriver,
    ) -> SimResult<Self> {
        history.push(HistoryEntry {
            tick:     orchestrator.tick(),
            snapshot: orchestrator.save_state(),
            hash:     orchestrator.hash(),
        })?;
        Ok(Self {
            orchestrator,
            history,
            driver,
            mode: RunMode::Running,
            cursor: 0,
        })
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn cursor(&self) -> HistoryIndex {
        self.cursor
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Read-only view of the live simulation.
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn driver(&self) -> &TickDriver {
        &self.driver
    }

    /// The entry presentation should draw: the cursor's entry while
    /// paused, the latest entry while running.
    pub fn displayed(&self) -> Option<&HistoryEntry> {
        match self.mode {
            RunMode::Running => self.history.latest(),
            RunMode::Paused | RunMode::PausedRewound => self.history.get(self.cursor),
        }
    }

    /// Advance one tick and record it. Panics if called while paused —
    /// callers must check, or go through `frame()`.
    pub fn tick(&mut self) -> SimResult<SimEvent> {
        assert!(!self.mode.is_paused(), "tick() called on paused session");

        let tick = self.orchestrator.step();
        let hash = self.orchestrator.hash();
        self.history.push(HistoryEntry {
            tick,
            snapshot: self.orchestrator.save_state(),
            hash,
        })?;
        log::debug!("tick={tick} hash={hash:#018x}");
        Ok(SimEvent::TickCompleted { tick, hash })
    }

    /// Run n ticks back to back, ignoring wall-clock time.
    pub fn run_ticks(&mut self, n: u64) -> SimResult<Vec<SimEvent>> {
        (0..n).map(|_| self.tick()).collect()
    }

    /// One presentation frame. While paused no ticks run and
    /// elapsed time is discarded.
    pub fn frame(&mut self, elapsed: Duration) -> SimResult<Vec<SimEvent>> {
        if self.mode.is_paused() {
            self.driver.reset();
            return Ok(Vec::new());
        }
        let due = self.driver.advance(elapsed);
        (0..due).map(|_| self.tick()).collect()
    }

    pub fn apply(&mut self, command: ScrubCommand) -> Option<SimEvent> {
        match command {
            ScrubCommand::TogglePause => Some(self.toggle_pause()),
            ScrubCommand::Resume => self.resume(),
            ScrubCommand::StepCursor { delta } => self.step_cursor(delta),
            ScrubCommand::Seek { index } => self.seek(index),
        }
    }

    pub fn toggle_pause(&mut self) -> SimEvent {
        if self.mode.is_paused() {
            self.leave_pause()
        } else {
            self.enter_pause()
        }
    }

    /// Running → Paused with the cursor on the latest entry.
    pub fn pause(&mut self) -> Option<SimEvent> {
        (!self.mode.is_paused()).then(|| self.enter_pause())
    }

    /// Leave either paused mode. From `PausedRewound` the live state is
    /// replaced by the cursor's entry and the history after it is dropped.
    pub fn resume(&mut self) -> Option<SimEvent> {
        self.mode.is_paused().then(|| self.leave_pause())
    }

    /// Move the cursor by `delta` entries, saturating at both ends.
    pub fn step_cursor(&mut self, delta: i64) -> Option<SimEvent> {
        let current = i64::try_from(self.cursor).unwrap_or(i64::MAX);
        let target = current.saturating_add(delta).max(0);
        self.seek(usize::try_from(target).unwrap_or(usize::MAX))
    }

    /// Put the cursor on `index`, clamped to `[0, len - 1]`.
    /// Ignored while running.
    pub fn seek(&mut self, index: HistoryIndex) -> Option<SimEvent> {
        if !self.mode.is_paused() {
            log::debug!("cursor input ignored while running");
            return None;
        }
        let last = self.last_index();
        let clamped = index.min(last);
        if clamped == self.cursor {
            return None;
        }
        self.cursor = clamped;
        self.mode = if clamped == last { RunMode::Paused } else { RunMode::PausedRewound };

        let tick = self.history.get(clamped).map_or(0, |e| e.tick);
        log::debug!("cursor={clamped} tick={tick} mode={:?}", self.mode);
        Some(SimEvent::CursorMoved { cursor: clamped, tick })
    }

    /// Recompute every recorded hash. Never interrupts the run.
    pub fn verify(&self) -> VerificationReport {
        verify_history(&self.history)
    }

    fn last_index(&self) -> HistoryIndex {
        self.history.last_index().unwrap_or(0)
    }

    fn enter_pause(&mut self) -> SimEvent {
        self.mode = RunMode::Paused;
        self.cursor = self.last_index();
        let tick = self.orchestrator.tick();
        log::info!("tick={tick} paused, cursor={}", self.cursor);
        SimEvent::Paused { tick, cursor: self.cursor }
    }

    fn leave_pause(&mut self) -> SimEvent {
        let event = if self.mode == RunMode::PausedRewound {
            self.rewind_to_cursor()
        } else {
            let tick = self.orchestrator.tick();
            log::info!("tick={tick} resumed");
            SimEvent::Resumed { tick }
        };
        self.mode = RunMode::Running;
        self.driver.reset();
        event
    }

    fn rewind_to_cursor(&mut self) -> SimEvent {
        let snapshot = match self.history.get(self.cursor) {
            Some(entry) => entry.snapshot.clone(),
            None => unreachable!("cursor {} outside history", self.cursor),
        };
        self.orchestrator.load_state(&snapshot);
        let discarded = self.history.truncate_after(self.cursor);
        log::info!(
            "tick={} rewound, discarded {discarded} future entries",
            snapshot.tick
        );
        SimEvent::Rewound { tick: snapshot.tick, discarded }
    }
}
