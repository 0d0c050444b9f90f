//! Tick history — the recorded past that backs ghost trails and scrubbing.
//!
//! RULES:
//!   - Entries are stored in ascending, gap-free tick order.
//!   - Entries are never mutated after push. The tail may be
//!     truncated (rewind) and, in bounded mode, the head evicted.
//!   - Index 0 is always the oldest retained entry.

use crate::{
    error::{SimError, SimResult},
    fixed::Fixed,
    hash::HashRecord,
    markers::{extract_markers, EventMarkers},
    snapshot::WorldSnapshot,
    types::{HistoryIndex, StateHash, Tick},
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub tick:     Tick,
    pub snapshot: WorldSnapshot,
    pub hash:     StateHash,
}

impl HistoryEntry {
    pub fn record(&self) -> HashRecord {
        HashRecord { tick: self.tick, hash: self.hash }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HistoryMode {
    /// Fixed-capacity ring; the oldest entry is evicted on overflow.
    Bounded { capacity: usize },
    /// Grows without limit; random access and tail truncation.
    Unbounded,
}

impl Default for HistoryMode {
    fn default() -> Self { Self::Unbounded }
}

#[derive(Debug, Clone)]
pub struct History {
    mode:    HistoryMode,
    entries: VecDeque<HistoryEntry>,
}

impl History {
    pub fn new(mode: HistoryMode) -> Self {
        if let HistoryMode::Bounded { capacity } = mode {
            assert!(capacity > 0, "bounded history needs capacity > 0");
        }
        let entries = match mode {
            HistoryMode::Bounded { capacity } => VecDeque::with_capacity(capacity),
            HistoryMode::Unbounded => VecDeque::new(),
        };
        Self { mode, entries }
    }

    pub fn bounded(capacity: usize) -> Self {
        Self::new(HistoryMode::Bounded { capacity })
    }

    pub fn unbounded() -> Self {
        Self::new(HistoryMode::Unbounded)
    }

    pub fn mode(&self) -> HistoryMode {
        self.mode
    }

    pub fn capacity(&self) -> Option<usize> {
        match self.mode {
            HistoryMode::Bounded { capacity } => Some(capacity),
            HistoryMode::Unbounded => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry. Its tick must directly follow the latest entry.
    /// In bounded mode a full ring evicts its oldest entry first.
    pub fn push(&mut self, entry: HistoryEntry) -> SimResult<()> {
        if let Some(last) = self.entries.back() {
            let expected = last.tick + 1;
            if entry.tick != expected {
                return Err(SimError::TickMismatch { expected, actual: entry.tick });
            }
        }
        if let HistoryMode::Bounded { capacity } = self.mode {
            if self.entries.len() == capacity {
                self.entries.pop_front();
            }
        }
        self.entries.push_back(entry);
        Ok(())
    }

    pub fn get(&self, index: HistoryIndex) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn last_index(&self) -> Option<HistoryIndex> {
        self.entries.len().checked_sub(1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Ticks are contiguous, so the lookup is arithmetic.
    pub fn index_of_tick(&self, tick: Tick) -> Option<HistoryIndex> {
        let first = self.entries.front()?.tick;
        let offset = tick.checked_sub(first)?;
        let index = usize::try_from(offset).ok()?;
        (index < self.entries.len()).then_some(index)
    }

    /// Keep entries `[0, index]` and drop the rest.
    /// Returns the number of entries discarded.
    pub fn truncate_after(&mut self, index: HistoryIndex) -> usize {
        let keep = index.saturating_add(1).min(self.entries.len());
        let discarded = self.entries.len() - keep;
        self.entries.truncate(keep);
        discarded
    }

    pub fn records(&self) -> Vec<HashRecord> {
        self.entries.iter().map(HistoryEntry::record).collect()
    }

    /// Apex/impact markers over a scalar field of each entry.
    pub fn markers<F>(&self, field: F) -> EventMarkers
    where
        F: Fn(&HistoryEntry) -> Fixed,
    {
        extract_markers(self.entries.iter().map(field))
    }
}
