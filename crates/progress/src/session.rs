//! Session aggregator - turns a finished session into stored records.
//!
//! ```text
//! outcomes -> overall status -> evaluate each plan exercise once
//!          -> save workout -> append events + update plan
//! ```

use std::collections::{HashMap, HashSet};
use reptrack_core::{
    ExerciseId, ExerciseOutcome, ExerciseStatus, Pain, Plan, PlanId, ProgressionEvent,
    ProgressionRules, Time, Workout, WorkoutId, WorkoutStatus,
};
use reptrack_storage::Storage;
use tracing::{info, warn};
use crate::engine::{ProgressionDecision, ProgressionEngine};
use crate::error::{ProgressError, Result};

/// Everything collected during one session.
#[derive(Debug, Clone)]
pub struct SessionInput {
    /// Plan followed (base or lite variant)
    pub plan: Plan,
    /// Per-exercise outcomes; a later outcome for the same exercise replaces
    /// an earlier one
    pub outcomes: Vec<ExerciseOutcome>,
    /// Back pain, 0-10
    pub back_pain: Pain,
    /// Knee pain, 0-10
    pub knee_pain: Pain,
    /// Length in minutes
    pub duration: u32,
    /// Free-text notes
    pub notes: String,
}

impl SessionInput {
    /// Start a session on `plan` with no outcomes yet.
    pub fn new(plan: Plan) -> Self {
        Self {
            plan,
            outcomes: Vec::new(),
            back_pain: 0,
            knee_pain: 0,
            duration: 0,
            notes: String::new(),
        }
    }

    /// Add an outcome.
    pub fn outcome(mut self, outcome: ExerciseOutcome) -> Self {
        self.outcomes.push(outcome);
        self
    }

    /// Set both pain readings.
    pub fn pain(mut self, back_pain: Pain, knee_pain: Pain) -> Self {
        self.back_pain = back_pain;
        self.knee_pain = knee_pain;
        self
    }
}

/// What finishing a session produced.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    /// The stored workout
    pub workout: Workout,
    /// One decision per evaluated exercise, in plan order
    pub decisions: Vec<(ExerciseId, ProgressionDecision)>,
    /// Progression events appended to the log
    pub progressions: Vec<ProgressionEvent>,
    /// The plan with progressions applied
    pub plan: Plan,
}

/// Overall status of a session.
///
/// No outcomes is `skipped`; all complete with both pains within the
/// threshold is `complete`; anything else is `adapted`.
pub fn overall_status(
    outcomes: &[ExerciseOutcome],
    back_pain: Pain,
    knee_pain: Pain,
    rules: &ProgressionRules,
) -> WorkoutStatus {
    if outcomes.is_empty() {
        return WorkoutStatus::Skipped;
    }

    let all_complete = outcomes.iter().all(|o| o.status == ExerciseStatus::Complete);
    if all_complete && back_pain <= rules.pain_threshold && knee_pain <= rules.pain_threshold {
        WorkoutStatus::Complete
    } else {
        WorkoutStatus::Adapted
    }
}

/// Keep the last outcome per exercise, in first-seen order.
fn dedupe_outcomes(outcomes: Vec<ExerciseOutcome>) -> Vec<ExerciseOutcome> {
    let mut index: HashMap<ExerciseId, usize> = HashMap::new();
    let mut kept: Vec<ExerciseOutcome> = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match index.get(&outcome.exercise_id) {
            Some(&i) => kept[i] = outcome,
            None => {
                index.insert(outcome.exercise_id.clone(), kept.len());
                kept.push(outcome);
            }
        }
    }
    kept
}

/// Finishes sessions against a store.
pub struct SessionAggregator<S: Storage> {
    engine: ProgressionEngine<S>,
}

impl<S: Storage> SessionAggregator<S> {
    /// Create an aggregator over `storage` with the default rules.
    pub fn new(storage: S) -> Self {
        Self {
            engine: ProgressionEngine::new(storage),
        }
    }

    /// Create an aggregator around an existing engine.
    pub fn with_engine(engine: ProgressionEngine<S>) -> Self {
        Self { engine }
    }

    /// The progression engine.
    pub fn engine(&self) -> &ProgressionEngine<S> {
        &self.engine
    }

    /// The underlying store.
    pub fn storage(&self) -> &S {
        self.engine.storage()
    }

    /// The underlying store, mutably.
    pub fn storage_mut(&mut self) -> &mut S {
        self.engine.storage_mut()
    }

    /// Give the store back.
    pub fn into_inner(self) -> S {
        self.engine.into_inner()
    }

    /// Finish a session: evaluate progressions, store the workout, log the
    /// progressions and save the updated plan.
    ///
    /// Any store failure aborts the call. Writes already made stay made; the
    /// history is the source of truth even if the event log or plan write
    /// failed afterwards.
    pub async fn finish(&mut self, input: SessionInput) -> Result<SessionSummary> {
        self.finish_at(input, chrono::Utc::now()).await
    }

    /// [`finish`](Self::finish) with an explicit timestamp.
    pub async fn finish_at(&mut self, input: SessionInput, date: Time) -> Result<SessionSummary> {
        let SessionInput { mut plan, outcomes, back_pain, knee_pain, duration, notes } = input;
        let outcomes = dedupe_outcomes(outcomes);
        let status = overall_status(&outcomes, back_pain, knee_pain, self.engine.rules());

        let workout = Workout {
            id: WorkoutId::new(),
            date,
            plan_id: Some(plan.id.clone()),
            plan_name: plan.name.clone(),
            is_lite: plan.is_lite,
            status,
            duration,
            exercise_results: outcomes,
            back_pain,
            knee_pain,
            notes,
        };

        // a plan may list the same id more than once; it is evaluated once
        let mut seen: HashSet<&ExerciseId> = HashSet::new();
        let mut decisions = Vec::new();
        for exercise in &plan.exercises {
            if !seen.insert(&exercise.id) {
                continue;
            }
            let Some(outcome) = workout.exercise_results.iter().find(|o| o.exercise_id == exercise.id) else {
                continue;
            };
            let decision = self
                .engine
                .evaluate_in_session(&workout.id, exercise, outcome, back_pain, knee_pain)
                .await?;
            decisions.push((exercise.id.clone(), decision));
        }

        self.storage_mut().save_workout(&workout).await?;
        info!("Saved workout {} ({}, {})", workout.id, workout.plan_name, workout.status);

        let mut progressions = Vec::new();
        for (_, decision) in &decisions {
            let Some(progression) = decision.progression() else {
                continue;
            };
            let event = progression.to_event(date);
            if let Err(e) = self.storage_mut().append_progression(&event).await {
                warn!("Progression for {} issued but not logged: {}", event.exercise_id, e);
                return Err(e.into());
            }
            plan.apply_progression(&event.exercise_id, event.new_reps);
            progressions.push(event);
        }

        if !progressions.is_empty() {
            self.storage_mut().save_plan(&plan).await?;
            info!("Applied {} progressions to plan {}", progressions.len(), plan.id);
        }

        Ok(SessionSummary { workout, decisions, progressions, plan })
    }

    /// Finish a session on a stored plan.
    pub async fn finish_stored(
        &mut self,
        plan_id: &PlanId,
        outcomes: Vec<ExerciseOutcome>,
        back_pain: Pain,
        knee_pain: Pain,
    ) -> Result<SessionSummary> {
        let plan = self
            .storage()
            .load_plan(plan_id)
            .await?
            .ok_or_else(|| ProgressError::PlanNotFound(plan_id.clone()))?;
        let input = SessionInput { outcomes, ..SessionInput::new(plan) }.pain(back_pain, knee_pain);
        self.finish(input).await
    }

    /// Record a day without training. No progression is evaluated.
    pub async fn record_marker(&mut self, status: WorkoutStatus, date: Time) -> Result<Workout> {
        let workout = Workout::marker(status, date);
        self.storage_mut().save_workout(&workout).await?;
        info!("Marked {} as {}", workout.date.date_naive(), status);
        Ok(workout)
    }
}
