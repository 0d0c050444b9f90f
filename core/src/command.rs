use crate::types::HistoryIndex;
use serde::{Deserialize, Serialize};

/// All user-issued scrub commands.
/// Variants added over time — never removed or reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ScrubCommand {
    /// Running ↔ paused. From a rewound pause this resumes with rewind.
    TogglePause,
    Resume,
    /// Move the cursor by `delta` entries; clamped to the history.
    StepCursor { delta: i64 },
    /// Put the cursor on `index`; clamped to the history.
    Seek { index: HistoryIndex },
}
