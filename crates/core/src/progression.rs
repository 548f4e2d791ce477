//! Progression event - log record of an applied load increase.

use serde::{Deserialize, Serialize};
use crate::exercise::{Exercise, ExerciseKind};
use crate::id::{ExerciseId, ProgressionId};
use crate::Time;

/// An applied progression. Appended to the log, never edited.
///
/// Exercise id and name are snapshots, so renaming or deleting the exercise
/// later leaves the log intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionEvent {
    /// Unique identifier
    pub id: ProgressionId,

    /// When it was applied
    pub date: Time,

    /// Exercise progressed
    pub exercise_id: ExerciseId,

    /// Exercise name at the time
    pub exercise_name: String,

    /// Target before
    pub old_reps: u32,

    /// Target after
    pub new_reps: u32,

    /// Dynamic or static
    #[serde(alias = "type")]
    pub kind: ExerciseKind,
}

impl ProgressionEvent {
    /// Create an event for `exercise` moving to `new_reps`, stamped now.
    pub fn new(exercise: &Exercise, new_reps: u32) -> Self {
        Self::at(exercise, new_reps, chrono::Utc::now())
    }

    /// Create an event stamped with `date`.
    pub fn at(exercise: &Exercise, new_reps: u32, date: Time) -> Self {
        Self {
            id: ProgressionId::new(),
            date,
            exercise_id: exercise.id.clone(),
            exercise_name: exercise.name.clone(),
            old_reps: exercise.reps,
            new_reps,
            kind: exercise.kind,
        }
    }

    /// Size of the increase.
    pub fn delta(&self) -> u32 {
        self.new_reps.saturating_sub(self.old_reps)
    }

    /// Human readable summary, e.g. `Plank: 30s -> 40s (+10 s)`.
    pub fn message(&self, sets: Option<u32>) -> String {
        match (self.kind, sets) {
            (ExerciseKind::Static, _) => format!(
                "{}: {}s -> {}s (+{} s)",
                self.exercise_name, self.old_reps, self.new_reps, self.delta()
            ),
            (ExerciseKind::Dynamic, Some(sets)) => format!(
                "{}: {}x{} -> {}x{} (+{} reps)",
                self.exercise_name, sets, self.old_reps, sets, self.new_reps, self.delta()
            ),
            (ExerciseKind::Dynamic, None) => format!(
                "{}: {} -> {} (+{} reps)",
                self.exercise_name, self.old_reps, self.new_reps, self.delta()
            ),
        }
    }
}
