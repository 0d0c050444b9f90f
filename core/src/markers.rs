//! Event markers over a recorded trajectory.
//!
//! One forward pass finds:
//!   - impact: the first index where the field crosses from
//!     positive to non-positive;
//!   - apex: the argmax of the field up to and including that
//!     crossing (first occurrence wins ties).
//! The pass stops at the first crossing. No crossing, no impact.

use crate::{fixed::Fixed, types::HistoryIndex};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMarkers {
    pub apex:   Option<HistoryIndex>,
    pub impact: Option<HistoryIndex>,
}

pub fn extract_markers<I>(values: I) -> EventMarkers
where
    I: IntoIterator<Item = Fixed>,
{
    let mut markers = EventMarkers::default();
    let mut best: Option<Fixed> = None;
    let mut prev: Option<Fixed> = None;

    for (index, value) in values.into_iter().enumerate() {
        if best.map_or(true, |b| value > b) {
            best = Some(value);
            markers.apex = Some(index);
        }
        if prev.is_some_and(Fixed::is_positive) && !value.is_positive() {
            markers.impact = Some(index);
            break;
        }
        prev = Some(value);
    }
    markers
}
