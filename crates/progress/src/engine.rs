//! Progression engine - decides when an exercise's target goes up.
//!
//! ```text
//! max pain > threshold      -> hold (pain_too_high), history untouched
//! status != complete        -> reset streak, hold (not_completed)
//! record qualifying outcome -> streak >= required ? reset + progress
//!                                                 : hold (need_more_completions)
//! ```
//!
//! The engine never edits the exercise or its plan. Applying `new_reps` and
//! logging a [`ProgressionEvent`] is up to the caller.
//!
//! [`ProgressionEngine::evaluate`] must be called once per exercise per
//! finished session: a second call with the same input counts a second
//! qualifying completion. [`ProgressionEngine::evaluate_in_session`] rejects
//! such repeats.

use std::collections::HashSet;
use reptrack_core::{
    Exercise, ExerciseId, ExerciseKind, ExerciseOutcome, ExerciseStatus, Pain, ProgressionEvent,
    ProgressionRules, Time, WorkoutId,
};
use reptrack_storage::Storage;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use crate::error::{ProgressError, Result};
use crate::tracker::ExerciseHistoryTracker;

/// Why an exercise was not progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldReason {
    /// Session pain above the threshold
    PainTooHigh,
    /// Outcome was adapted or skipped
    NotCompleted,
    /// Streak not long enough yet
    NeedMoreCompletions,
}

impl HoldReason {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            HoldReason::PainTooHigh => "pain_too_high",
            HoldReason::NotCompleted => "not_completed",
            HoldReason::NeedMoreCompletions => "need_more_completions",
        }
    }
}

impl std::fmt::Display for HoldReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An issued load increase.
#[derive(Debug, Clone, PartialEq)]
pub struct Progression {
    /// The exercise as it was before the increase
    pub exercise: Exercise,
    /// Target before
    pub current_reps: u32,
    /// Target after
    pub new_reps: u32,
    /// Dynamic or static
    pub kind: ExerciseKind,
}

impl Progression {
    /// Log record for this progression, stamped with the session date.
    pub fn to_event(&self, date: Time) -> ProgressionEvent {
        ProgressionEvent::at(&self.exercise, self.new_reps, date)
    }
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "DecisionRecord")]
pub enum ProgressionDecision {
    /// Increase the target
    Progress(Progression),
    /// Session max pain above the threshold
    PainTooHigh {
        /// The greater of the two pain readings
        max_pain: Pain,
    },
    /// The exercise was not completed as prescribed
    NotCompleted {
        /// What the outcome was instead
        status: ExerciseStatus,
    },
    /// Qualifying session recorded, streak still short
    NeedMoreCompletions {
        /// Streak after this session
        completions: u32,
        /// Streak needed to progress
        required: u32,
    },
}

impl ProgressionDecision {
    /// Whether the target should go up.
    pub fn should_progress(&self) -> bool {
        matches!(self, ProgressionDecision::Progress(_))
    }

    /// Why not, if not.
    pub fn reason(&self) -> Option<HoldReason> {
        match self {
            ProgressionDecision::Progress(_) => None,
            ProgressionDecision::PainTooHigh { .. } => Some(HoldReason::PainTooHigh),
            ProgressionDecision::NotCompleted { .. } => Some(HoldReason::NotCompleted),
            ProgressionDecision::NeedMoreCompletions { .. } => Some(HoldReason::NeedMoreCompletions),
        }
    }

    /// The issued progression, if any.
    pub fn progression(&self) -> Option<&Progression> {
        match self {
            ProgressionDecision::Progress(p) => Some(p),
            _ => None,
        }
    }

    /// Current streak, reported for `need_more_completions`.
    pub fn completions(&self) -> Option<u32> {
        match self {
            ProgressionDecision::NeedMoreCompletions { completions, .. } => Some(*completions),
            _ => None,
        }
    }
}

/// Flat wire shape of a decision:
/// `{ shouldProgress, reason?, completions?, exercise?, currentReps?, newReps?, kind? }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRecord {
    /// Whether the target should go up
    pub should_progress: bool,
    /// Hold reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<HoldReason>,
    /// Streak, for `need_more_completions`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completions: Option<u32>,
    /// Exercise progressed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise: Option<Exercise>,
    /// Target before
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_reps: Option<u32>,
    /// Target after
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_reps: Option<u32>,
    /// Dynamic or static
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ExerciseKind>,
}

impl From<ProgressionDecision> for DecisionRecord {
    fn from(decision: ProgressionDecision) -> Self {
        let reason = decision.reason();
        let completions = decision.completions();
        match decision {
            ProgressionDecision::Progress(p) => Self {
                should_progress: true,
                reason: None,
                completions: None,
                current_reps: Some(p.current_reps),
                new_reps: Some(p.new_reps),
                kind: Some(p.kind),
                exercise: Some(p.exercise),
            },
            _ => Self {
                should_progress: false,
                reason,
                completions,
                exercise: None,
                current_reps: None,
                new_reps: None,
                kind: None,
            },
        }
    }
}

/// The progression engine.
pub struct ProgressionEngine<S: Storage> {
    tracker: ExerciseHistoryTracker<S>,
    rules: ProgressionRules,
    evaluated: HashSet<(WorkoutId, ExerciseId)>,
}

impl<S: Storage> ProgressionEngine<S> {
    /// Create an engine over `storage` with the default rules.
    pub fn new(storage: S) -> Self {
        Self::from_tracker(ExerciseHistoryTracker::new(storage))
    }

    /// Create an engine around an existing tracker.
    pub fn from_tracker(tracker: ExerciseHistoryTracker<S>) -> Self {
        Self {
            tracker,
            rules: ProgressionRules::default(),
            evaluated: HashSet::new(),
        }
    }

    /// Set the rules.
    pub fn with_rules(mut self, rules: ProgressionRules) -> Self {
        self.rules = rules;
        self
    }

    /// Active rules.
    pub fn rules(&self) -> &ProgressionRules {
        &self.rules
    }

    /// The history tracker.
    pub fn tracker(&self) -> &ExerciseHistoryTracker<S> {
        &self.tracker
    }

    /// The history tracker, mutably.
    pub fn tracker_mut(&mut self) -> &mut ExerciseHistoryTracker<S> {
        &mut self.tracker
    }

    /// The underlying store.
    pub fn storage(&self) -> &S {
        self.tracker.storage()
    }

    /// The underlying store, mutably.
    pub fn storage_mut(&mut self) -> &mut S {
        self.tracker.storage_mut()
    }

    /// Give the store back.
    pub fn into_inner(self) -> S {
        self.tracker.into_inner()
    }

    /// Evaluate one exercise's outcome for a finished session.
    ///
    /// Returns only after any history change is persisted; a store failure is
    /// returned as an error, never as a decision.
    pub async fn evaluate(
        &mut self,
        exercise: &Exercise,
        outcome: &ExerciseOutcome,
        back_pain: Pain,
        knee_pain: Pain,
    ) -> Result<ProgressionDecision> {
        let max_pain = back_pain.max(knee_pain);
        if max_pain > self.rules.pain_threshold {
            debug!("{}: hold, pain {} too high", exercise.id, max_pain);
            return Ok(ProgressionDecision::PainTooHigh { max_pain });
        }

        if outcome.status != ExerciseStatus::Complete {
            self.tracker.reset(&exercise.id).await?;
            debug!("{}: hold, status {}", exercise.id, outcome.status);
            return Ok(ProgressionDecision::NotCompleted { status: outcome.status });
        }

        let entry = self.tracker.record_outcome(&exercise.id, true, max_pain).await?;

        if entry.consecutive_completions >= self.rules.required_streak {
            self.tracker.reset(&exercise.id).await?;
            let new_reps = exercise.reps.saturating_add(self.rules.increment(exercise.kind));
            info!("{}: progress {} -> {}", exercise.id, exercise.reps, new_reps);
            return Ok(ProgressionDecision::Progress(Progression {
                exercise: exercise.clone(),
                current_reps: exercise.reps,
                new_reps,
                kind: exercise.kind,
            }));
        }

        debug!(
            "{}: hold, streak {}/{}",
            exercise.id, entry.consecutive_completions, self.rules.required_streak
        );
        Ok(ProgressionDecision::NeedMoreCompletions {
            completions: entry.consecutive_completions,
            required: self.rules.required_streak,
        })
    }

    /// Like [`evaluate`](Self::evaluate), but refuses a second evaluation of
    /// the same exercise in the same session.
    ///
    /// The pair is remembered only after a successful evaluation, so a call
    /// that failed on the store may be retried.
    pub async fn evaluate_in_session(
        &mut self,
        session_id: &WorkoutId,
        exercise: &Exercise,
        outcome: &ExerciseOutcome,
        back_pain: Pain,
        knee_pain: Pain,
    ) -> Result<ProgressionDecision> {
        let key = (session_id.clone(), exercise.id.clone());
        if self.evaluated.contains(&key) {
            return Err(ProgressError::AlreadyEvaluated {
                exercise_id: exercise.id.clone(),
                session_id: session_id.clone(),
            });
        }

        let decision = self.evaluate(exercise, outcome, back_pain, knee_pain).await?;
        self.evaluated.insert(key);
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reptrack_core::HistoryEntry;
    use reptrack_storage::{MemoryStorage, StorageError};

    fn dynamic(reps: u32) -> Exercise {
        Exercise::new("d1e3", "Push-ups", 3, reps, ExerciseKind::Dynamic)
    }

    fn plank(reps: u32) -> Exercise {
        Exercise::new("d2e4", "Plank", 3, reps, ExerciseKind::Static)
    }

    fn with_status(exercise: &Exercise, status: ExerciseStatus) -> ExerciseOutcome {
        ExerciseOutcome::for_exercise(exercise, status, exercise.reps)
    }

    async fn engine_with_streak(exercise: &Exercise, streak: u32) -> ProgressionEngine<MemoryStorage> {
        let mut storage = MemoryStorage::new();
        storage
            .save_history_entry(&exercise.id, &HistoryEntry { consecutive_completions: streak, last_pain: 1 })
            .await
            .unwrap();
        ProgressionEngine::new(storage)
    }

    async fn streak(engine: &ProgressionEngine<MemoryStorage>, id: &ExerciseId) -> Option<u32> {
        engine.tracker().get(id).await.unwrap().map(|e| e.consecutive_completions)
    }

    #[tokio::test]
    async fn test_two_qualifying_sessions_progress() {
        let exercise = dynamic(10);
        let outcome = ExerciseOutcome::complete(&exercise);
        let mut engine = ProgressionEngine::new(MemoryStorage::new());

        let first = engine.evaluate(&exercise, &outcome, 0, 0).await.unwrap();
        assert!(!first.should_progress());
        assert_eq!(first.reason(), Some(HoldReason::NeedMoreCompletions));
        assert_eq!(first.completions(), Some(1));

        let second = engine.evaluate(&exercise, &outcome, 0, 0).await.unwrap();
        assert!(second.should_progress());
        let progression = second.progression().unwrap();
        assert_eq!(progression.current_reps, 10);
        assert_eq!(progression.new_reps, 12);
        assert_eq!(progression.kind, ExerciseKind::Dynamic);

        assert_eq!(streak(&engine, &exercise.id).await, Some(0));
    }

    #[tokio::test]
    async fn test_qualifying_completion_increments_streak() {
        let exercise = dynamic(10);
        let mut engine = engine_with_streak(&exercise, 0).await;

        let decision = engine.evaluate(&exercise, &ExerciseOutcome::complete(&exercise), 3, 2).await.unwrap();
        assert_eq!(
            decision,
            ProgressionDecision::NeedMoreCompletions { completions: 1, required: 2 }
        );
        let entry = engine.tracker().get(&exercise.id).await.unwrap().unwrap();
        assert_eq!(entry, HistoryEntry { consecutive_completions: 1, last_pain: 3 });
    }

    #[tokio::test]
    async fn test_long_streak_still_progresses_and_resets() {
        // a streak imported from elsewhere may already exceed the requirement
        let exercise = dynamic(10);
        let mut engine = engine_with_streak(&exercise, 5).await;

        let decision = engine.evaluate(&exercise, &ExerciseOutcome::complete(&exercise), 0, 0).await.unwrap();
        assert!(decision.should_progress());
        assert_eq!(streak(&engine, &exercise.id).await, Some(0));
    }

    #[tokio::test]
    async fn test_progression_math() {
        let exercise = dynamic(10);
        let mut engine = engine_with_streak(&exercise, 1).await;
        let decision = engine.evaluate(&exercise, &ExerciseOutcome::complete(&exercise), 0, 0).await.unwrap();
        assert_eq!(decision.progression().unwrap().new_reps, 12);

        let exercise = plank(30);
        let mut engine = engine_with_streak(&exercise, 1).await;
        let decision = engine.evaluate(&exercise, &ExerciseOutcome::complete(&exercise), 0, 0).await.unwrap();
        let progression = decision.progression().unwrap();
        assert_eq!(progression.new_reps, 40);
        assert_eq!(progression.kind, ExerciseKind::Static);
    }

    #[tokio::test]
    async fn test_disqualification_resets_streak() {
        for status in [ExerciseStatus::Adapted, ExerciseStatus::Skipped] {
            let exercise = dynamic(10);
            let mut engine = engine_with_streak(&exercise, 1).await;

            let decision = engine.evaluate(&exercise, &with_status(&exercise, status), 0, 0).await.unwrap();
            assert!(!decision.should_progress());
            assert_eq!(decision.reason(), Some(HoldReason::NotCompleted));
            assert_eq!(streak(&engine, &exercise.id).await, Some(0));
        }
    }

    #[tokio::test]
    async fn test_disqualification_without_history_creates_nothing() {
        let exercise = dynamic(10);
        let mut engine = ProgressionEngine::new(MemoryStorage::new());

        let decision = engine
            .evaluate(&exercise, &with_status(&exercise, ExerciseStatus::Skipped), 0, 0)
            .await
            .unwrap();
        assert_eq!(decision.reason(), Some(HoldReason::NotCompleted));
        assert_eq!(streak(&engine, &exercise.id).await, None);
    }

    #[tokio::test]
    async fn test_high_pain_leaves_history_untouched() {
        let exercise = dynamic(10);
        let mut engine = engine_with_streak(&exercise, 1).await;
        let writes_before = engine.storage().write_count();

        for (back, knee) in [(4, 0), (0, 4), (10, 10)] {
            for status in [ExerciseStatus::Complete, ExerciseStatus::Skipped] {
                let decision = engine.evaluate(&exercise, &with_status(&exercise, status), back, knee).await.unwrap();
                assert!(!decision.should_progress());
                assert_eq!(decision.reason(), Some(HoldReason::PainTooHigh));
            }
        }

        assert_eq!(engine.storage().write_count(), writes_before);
        let entry = engine.tracker().get(&exercise.id).await.unwrap().unwrap();
        assert_eq!(entry, HistoryEntry { consecutive_completions: 1, last_pain: 1 });
    }

    #[tokio::test]
    async fn test_pain_at_threshold_still_qualifies() {
        let exercise = dynamic(10);
        let mut engine = engine_with_streak(&exercise, 1).await;
        let decision = engine.evaluate(&exercise, &ExerciseOutcome::complete(&exercise), 3, 3).await.unwrap();
        assert!(decision.should_progress());
    }

    #[tokio::test]
    async fn test_progression_needs_two_fresh_completions() {
        let exercise = dynamic(10);
        let outcome = ExerciseOutcome::complete(&exercise);
        let mut engine = ProgressionEngine::new(MemoryStorage::new());

        let fired: Vec<bool> = {
            let mut fired = Vec::new();
            for _ in 0..6 {
                fired.push(engine.evaluate(&exercise, &outcome, 1, 0).await.unwrap().should_progress());
            }
            fired
        };
        assert_eq!(fired, vec![false, true, false, true, false, true]);
    }

    #[tokio::test]
    async fn test_repeated_evaluate_double_counts() {
        // once-per-session is the caller's job with plain evaluate
        let exercise = dynamic(10);
        let outcome = ExerciseOutcome::complete(&exercise);
        let mut engine = ProgressionEngine::new(MemoryStorage::new());

        engine.evaluate(&exercise, &outcome, 0, 0).await.unwrap();
        let again = engine.evaluate(&exercise, &outcome, 0, 0).await.unwrap();
        assert!(again.should_progress());
    }

    #[tokio::test]
    async fn test_session_guard_rejects_repeat() {
        let exercise = dynamic(10);
        let outcome = ExerciseOutcome::complete(&exercise);
        let mut engine = ProgressionEngine::new(MemoryStorage::new());
        let session = WorkoutId::new();

        let first = engine.evaluate_in_session(&session, &exercise, &outcome, 0, 0).await.unwrap();
        assert_eq!(first.completions(), Some(1));

        let err = engine.evaluate_in_session(&session, &exercise, &outcome, 0, 0).await.unwrap_err();
        assert!(matches!(err, ProgressError::AlreadyEvaluated { .. }));
        assert_eq!(streak(&engine, &exercise.id).await, Some(1));

        let next = engine.evaluate_in_session(&WorkoutId::new(), &exercise, &outcome, 0, 0).await.unwrap();
        assert!(next.should_progress());
    }

    #[tokio::test]
    async fn test_store_failure_is_not_a_decision() {
        let exercise = dynamic(10);
        let mut engine = engine_with_streak(&exercise, 1).await;
        engine.storage_mut().set_fail_writes(true);
        let session = WorkoutId::new();

        let err = engine
            .evaluate_in_session(&session, &exercise, &ExerciseOutcome::complete(&exercise), 0, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::Storage(StorageError::Unavailable(_))));

        // failed call is not remembered by the guard
        engine.storage_mut().set_fail_writes(false);
        let decision = engine
            .evaluate_in_session(&session, &exercise, &ExerciseOutcome::complete(&exercise), 0, 0)
            .await
            .unwrap();
        assert!(decision.should_progress());
    }

    #[tokio::test]
    async fn test_custom_rules() {
        let exercise = plank(30);
        let rules = ProgressionRules {
            pain_threshold: 5,
            required_streak: 3,
            dynamic_increment: 1,
            static_increment: 5,
        };
        let mut engine = ProgressionEngine::new(MemoryStorage::new()).with_rules(rules);
        let outcome = ExerciseOutcome::complete(&exercise);

        assert!(!engine.evaluate(&exercise, &outcome, 5, 0).await.unwrap().should_progress());
        assert!(!engine.evaluate(&exercise, &outcome, 5, 0).await.unwrap().should_progress());
        let third = engine.evaluate(&exercise, &outcome, 5, 0).await.unwrap();
        assert_eq!(third.progression().unwrap().new_reps, 35);
    }

    #[tokio::test]
    async fn test_increment_saturates() {
        let exercise = dynamic(u32::MAX - 1);
        let mut engine = engine_with_streak(&exercise, 1).await;

        let decision = engine
            .evaluate(&exercise, &ExerciseOutcome::complete(&exercise), 0, 0)
            .await
            .unwrap();
        assert_eq!(decision.progression().unwrap().new_reps, u32::MAX);
    }

    #[test]
    fn test_decision_wire_shape() {
        let hold = ProgressionDecision::NeedMoreCompletions { completions: 1, required: 2 };
        assert_eq!(
            serde_json::to_value(&hold).unwrap(),
            serde_json::json!({"shouldProgress": false, "reason": "need_more_completions", "completions": 1})
        );

        let pain = ProgressionDecision::PainTooHigh { max_pain: 6 };
        assert_eq!(
            serde_json::to_value(&pain).unwrap(),
            serde_json::json!({"shouldProgress": false, "reason": "pain_too_high"})
        );

        let progress = ProgressionDecision::Progress(Progression {
            exercise: plank(30),
            current_reps: 30,
            new_reps: 40,
            kind: ExerciseKind::Static,
        });
        let value = serde_json::to_value(&progress).unwrap();
        assert_eq!(value["shouldProgress"], true);
        assert_eq!(value["currentReps"], 30);
        assert_eq!(value["newReps"], 40);
        assert_eq!(value["kind"], "static");
        assert_eq!(value["exercise"]["id"], "d2e4");
        assert!(value.get("reason").is_none());
    }
}
