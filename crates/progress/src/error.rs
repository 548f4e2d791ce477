//! Error type for progression and session operations.

use reptrack_core::{ExerciseId, PlanId, WorkoutId};
use reptrack_storage::StorageError;

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, ProgressError>;

/// Errors raised by the tracker, engine and session aggregator.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// The store failed; passed through unchanged
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The exercise was already evaluated for this session
    #[error("exercise {exercise_id} already evaluated for session {session_id}")]
    AlreadyEvaluated {
        /// Exercise evaluated twice
        exercise_id: ExerciseId,
        /// Session it was evaluated in
        session_id: WorkoutId,
    },

    /// No plan with this id
    #[error("plan not found: {0}")]
    PlanNotFound(PlanId),
}
