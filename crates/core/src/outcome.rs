//! Exercise outcome - what happened to one exercise in one session.

use serde::{Deserialize, Serialize};
use crate::exercise::{Exercise, ExerciseKind};
use crate::id::ExerciseId;

/// How an exercise went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseStatus {
    /// Done as prescribed
    Complete,
    /// Done with reduced load or reps
    Adapted,
    /// Not done
    Skipped,
}

impl ExerciseStatus {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseStatus::Complete => "complete",
            ExerciseStatus::Adapted => "adapted",
            ExerciseStatus::Skipped => "skipped",
        }
    }

    /// Short marker for text output.
    pub fn icon(&self) -> &'static str {
        match self {
            ExerciseStatus::Complete => "✓",
            ExerciseStatus::Adapted => "⚠",
            ExerciseStatus::Skipped => "✗",
        }
    }
}

impl std::fmt::Display for ExerciseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExerciseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "complete" => Ok(ExerciseStatus::Complete),
            "adapted" => Ok(ExerciseStatus::Adapted),
            "skipped" => Ok(ExerciseStatus::Skipped),
            other => Err(format!("unknown exercise status: {}", other)),
        }
    }
}

/// The result of performing one exercise in one session.
///
/// Snapshots name, target and resistance so the record stays readable after
/// the plan is edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseOutcome {
    /// Exercise performed
    pub exercise_id: ExerciseId,

    /// Exercise name at session time
    pub name: String,

    /// How it went
    pub status: ExerciseStatus,

    /// Target at session time
    pub target_reps: u32,

    /// Reps or seconds actually achieved
    pub actual_reps: u32,

    /// Resistance descriptor at session time
    #[serde(default)]
    pub weight: String,

    /// Free-text note
    #[serde(default)]
    pub notes: String,

    /// Dynamic or static
    #[serde(alias = "type")]
    pub kind: ExerciseKind,
}

impl ExerciseOutcome {
    /// Record an outcome for `exercise`, snapshotting its current definition.
    pub fn for_exercise(exercise: &Exercise, status: ExerciseStatus, actual_reps: u32) -> Self {
        Self {
            exercise_id: exercise.id.clone(),
            name: exercise.name.clone(),
            status,
            target_reps: exercise.reps,
            actual_reps,
            weight: exercise.weight.clone(),
            notes: String::new(),
            kind: exercise.kind,
        }
    }

    /// Outcome where the exercise was done exactly as prescribed.
    pub fn complete(exercise: &Exercise) -> Self {
        Self::for_exercise(exercise, ExerciseStatus::Complete, exercise.reps)
    }

    /// Attach a note.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Whether the status is `complete`.
    pub fn is_complete(&self) -> bool {
        self.status == ExerciseStatus::Complete
    }
}
