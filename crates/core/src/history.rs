//! Per-exercise rolling progression state.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::id::ExerciseId;
use crate::Pain;

/// Streak state of one exercise.
///
/// A missing entry is equivalent to `HistoryEntry::default()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Qualifying completions in a row; 0 after any non-qualifying outcome
    pub consecutive_completions: u32,

    /// Max pain of the last recorded session
    pub last_pain: Pain,
}

/// The whole history bucket, keyed by exercise id.
pub type ExerciseHistory = BTreeMap<ExerciseId, HistoryEntry>;
