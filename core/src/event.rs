//! Session events — what the tick loop and the scrub workflow report.
//!
//! RULE: Events describe transitions that already happened.
//! They are returned to the caller and logged; nothing in the
//! simulation reads them back.

use crate::types::{HistoryIndex, StateHash, Tick};
use serde::{Deserialize, Serialize};

/// Variants are appended — never removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Tick loop ──────────────────────────────────
    TickCompleted {
        tick: Tick,
        hash: StateHash,
    },

    // ── Scrub workflow ─────────────────────────────
    Paused {
        tick:   Tick,
        cursor: HistoryIndex,
    },
    CursorMoved {
        cursor: HistoryIndex,
        tick:   Tick,
    },
    Resumed {
        tick: Tick,
    },
    /// Live state replaced by the entry at `tick`; the recorded
    /// future after it is gone.
    Rewound {
        tick:      Tick,
        discarded: usize,
    },

    // ── Verification ───────────────────────────────
    DeterminismViolation {
        tick:       Tick,
        recorded:   StateHash,
        recomputed: StateHash,
    },
}
