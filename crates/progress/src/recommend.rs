//! "One more to go" hints for exercises close to a progression.

use reptrack_core::{Exercise, ExerciseHistory, ProgressionRules};
use serde::Serialize;

/// An exercise one qualifying completion away from progressing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// The exercise, as currently planned
    pub exercise: Exercise,
    /// Short hint for the user
    pub message: String,
    /// Share of the required streak already reached, in whole percent
    pub progress: u32,
}

/// Exercises whose streak sits exactly one short of `rules.required_streak`.
///
/// Exercises without history, or with a rule that needs a single completion,
/// never produce a hint.
pub fn recommendations<'a>(
    history: &ExerciseHistory,
    exercises: impl IntoIterator<Item = &'a Exercise>,
    rules: &ProgressionRules,
) -> Vec<Recommendation> {
    let Some(target) = rules.required_streak.checked_sub(1).filter(|t| *t > 0) else {
        return Vec::new();
    };

    exercises
        .into_iter()
        .filter(|exercise| {
            history
                .get(&exercise.id)
                .is_some_and(|entry| entry.consecutive_completions == target)
        })
        .map(|exercise| Recommendation {
            message: format!("{}: one more full completion to progress", exercise.name),
            progress: target * 100 / rules.required_streak,
            exercise: exercise.clone(),
        })
        .collect()
}
