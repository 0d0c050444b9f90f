//! Determinism verification.
//!
//! A recorded hash must equal the hash recomputed from the recorded
//! state. A mismatch means corruption, a platform-dependent arithmetic
//! leak, or a field that is stored but not hashed.
//!
//! RULE: Violations are reported, never swallowed and never fatal.
//! The live simulation stays authoritative; callers decide what to do.

use crate::{
    error::{SimError, SimResult},
    event::SimEvent,
    hash::HashRecord,
    history::{History, HistoryEntry},
    orchestrator::Orchestrator,
    types::{HistoryIndex, StateHash, Tick},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub index:      HistoryIndex,
    pub tick:       Tick,
    pub recorded:   StateHash,
    pub recomputed: StateHash,
}

impl Violation {
    pub fn to_event(&self) -> SimEvent {
        SimEvent::DeterminismViolation {
            tick:       self.tick,
            recorded:   self.recorded,
            recomputed: self.recomputed,
        }
    }

    pub fn to_error(&self) -> SimError {
        SimError::DeterminismViolation {
            tick:       self.tick,
            recorded:   self.recorded,
            recomputed: self.recomputed,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    pub checked:    usize,
    pub violations: Vec<Violation>,
}

impl VerificationReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// First violation as an error, for callers that want `?`.
    pub fn into_result(self) -> SimResult<usize> {
        match self.violations.first() {
            Some(v) => Err(v.to_error()),
            None => Ok(self.checked),
        }
    }

    fn note(&mut self, v: Violation) {
        log::warn!(
            "tick={} determinism violation at index {}: recorded {:#018x}, recomputed {:#018x}",
            v.tick, v.index, v.recorded, v.recomputed
        );
        self.violations.push(v);
    }
}

/// Recompute one entry's hash from its stored snapshot.
pub fn verify_entry(index: HistoryIndex, entry: &HistoryEntry) -> Result<(), Violation> {
    let recomputed = entry.snapshot.hash();
    if recomputed == entry.hash {
        Ok(())
    } else {
        Err(Violation { index, tick: entry.tick, recorded: entry.hash, recomputed })
    }
}

/// Recompute every entry's hash from its stored snapshot.
pub fn verify_history(history: &History) -> VerificationReport {
    let mut report = VerificationReport::default();
    for (index, entry) in history.iter().enumerate() {
        report.checked += 1;
        if let Err(v) = verify_entry(index, entry) {
            report.note(v);
        }
    }
    log::debug!("verified {} history entries, {} violations", report.checked, report.violations.len());
    report
}

/// Replay every recorded transition on a scratch orchestrator:
/// load entry i, step once, and compare against entry i + 1.
///
/// `scratch` must have the same system layout as the run that
/// produced `history`. Its prior state is overwritten.
pub fn verify_replay(history: &History, scratch: &mut Orchestrator) -> VerificationReport {
    let mut report = VerificationReport::default();
    let mut entries = history.iter().enumerate().peekable();
    while let Some((_, entry)) = entries.next() {
        let Some(&(next_index, next)) = entries.peek() else { break };
        scratch.load_state(&entry.snapshot);
        let tick = scratch.step();
        let recomputed = scratch.hash();
        report.checked += 1;
        if tick != next.tick || recomputed != next.hash {
            report.note(Violation {
                index: next_index,
                tick:  next.tick,
                recorded: next.hash,
                recomputed,
            });
        }
    }
    report
}

/// Where two hash logs first disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Divergence {
    pub index: usize,
    pub left:  Option<HashRecord>,
    pub right: Option<HashRecord>,
}

/// Compare two hash logs element by element. A log that ends early
/// diverges at its length.
pub fn compare_hash_logs(left: &[HashRecord], right: &[HashRecord]) -> Option<Divergence> {
    let len = left.len().max(right.len());
    (0..len).find_map(|index| {
        let (l, r) = (left.get(index).copied(), right.get(index).copied());
        (l != r).then_some(Divergence { index, left: l, right: r })
    })
}
