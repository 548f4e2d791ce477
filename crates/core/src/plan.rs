//! Plan model - a reusable list of exercises for one training day.

use serde::{Deserialize, Serialize};
use crate::exercise::{Exercise, ExerciseKind};
use crate::id::{ExerciseId, PlanId};

/// Suffix appended to plan and exercise ids of a lite variant.
pub const LITE_SUFFIX: &str = "_lite";

/// A warm-up movement. Warm-ups never progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarmupItem {
    /// Display name
    pub name: String,

    /// Repetitions
    pub reps: u32,

    /// Dynamic or static
    #[serde(alias = "type")]
    pub kind: ExerciseKind,
}

impl WarmupItem {
    /// Create a warm-up item.
    pub fn new(name: impl Into<String>, reps: u32, kind: ExerciseKind) -> Self {
        Self {
            name: name.into(),
            reps,
            kind,
        }
    }
}

/// A workout plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Unique identifier
    pub id: PlanId,

    /// Display name
    pub name: String,

    /// Estimated duration, free text ("30-40 min")
    #[serde(default)]
    pub duration: String,

    /// Warm-up before the main exercises
    #[serde(default)]
    pub warmup: Vec<WarmupItem>,

    /// Main exercises in order
    pub exercises: Vec<Exercise>,

    /// Reduced-difficulty variant of another plan
    #[serde(default)]
    pub is_lite: bool,
}

impl Plan {
    /// Create an empty plan.
    pub fn new(id: impl Into<PlanId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration: String::new(),
            warmup: Vec::new(),
            exercises: Vec::new(),
            is_lite: false,
        }
    }

    /// Find an exercise by id.
    pub fn exercise(&self, id: &ExerciseId) -> Option<&Exercise> {
        self.exercises.iter().find(|e| &e.id == id)
    }

    /// Derive the lite variant of this plan.
    ///
    /// Ids get [`LITE_SUFFIX`], so a lite exercise keeps its own progression
    /// streak separate from the base exercise. Each exercise loses one set
    /// (minimum 1); dynamic exercises lose 4 reps (minimum 6), static holds
    /// lose 10 seconds (minimum 15).
    pub fn lite_variant(&self) -> Plan {
        Plan {
            id: self.id.with_suffix(LITE_SUFFIX),
            name: format!("{} (LITE)", self.name),
            duration: self.duration.clone(),
            warmup: self.warmup.clone(),
            exercises: self
                .exercises
                .iter()
                .map(|ex| Exercise {
                    id: ex.id.with_suffix(LITE_SUFFIX),
                    sets: ex.sets.saturating_sub(1).max(1),
                    reps: match ex.kind {
                        ExerciseKind::Static => ex.reps.saturating_sub(10).max(15),
                        ExerciseKind::Dynamic => ex.reps.saturating_sub(4).max(6),
                    },
                    ..ex.clone()
                })
                .collect(),
            is_lite: true,
        }
    }

    /// Copy this plan with freshly generated plan and exercise ids.
    ///
    /// The copy starts with no progression history of its own.
    pub fn duplicate(&self) -> Plan {
        Plan {
            id: PlanId::generate(),
            name: format!("{} (copy)", self.name),
            exercises: self
                .exercises
                .iter()
                .map(|ex| Exercise {
                    id: ExerciseId::generate(),
                    ..ex.clone()
                })
                .collect(),
            ..self.clone()
        }
    }

    /// Set the target reps of an exercise. Returns false if the plan does not
    /// contain it.
    pub fn apply_progression(&mut self, exercise_id: &ExerciseId, new_reps: u32) -> bool {
        let mut applied = false;
        for ex in self.exercises.iter_mut().filter(|e| &e.id == exercise_id) {
            ex.reps = new_reps;
            applied = true;
        }
        applied
    }

    /// Total number of sets across the main exercises.
    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.sets).sum()
    }
}

/// Set the target reps of every exercise with `exercise_id` across `plans`.
/// Returns the number of exercises changed.
pub fn apply_progression(plans: &mut [Plan], exercise_id: &ExerciseId, new_reps: u32) -> usize {
    let mut changed = 0;
    for ex in plans
        .iter_mut()
        .flat_map(|p| p.exercises.iter_mut())
        .filter(|e| &e.id == exercise_id)
    {
        ex.reps = new_reps;
        changed += 1;
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> Plan {
        let mut plan = Plan::new("day2", "Back + Biceps");
        plan.exercises = vec![
            Exercise::new("d2e1", "One-arm row", 3, 10, ExerciseKind::Dynamic),
            Exercise::new("d2e4", "Plank", 3, 30, ExerciseKind::Static),
            Exercise::new("d2e9", "Short hold", 1, 20, ExerciseKind::Static),
            Exercise::new("d2e8", "Short set", 2, 8, ExerciseKind::Dynamic),
        ];
        plan
    }

    #[test]
    fn test_lite_variant_ids_and_loads() {
        let lite = sample_plan().lite_variant();
        assert_eq!(lite.id.as_str(), "day2_lite");
        assert!(lite.is_lite);
        assert!(lite.name.ends_with("(LITE)"));

        assert_eq!(lite.exercises[0].id.as_str(), "d2e1_lite");
        assert_eq!(lite.exercises[0].sets, 2);
        assert_eq!(lite.exercises[0].reps, 6);

        assert_eq!(lite.exercises[1].reps, 20);
        // floors
        assert_eq!(lite.exercises[2].sets, 1);
        assert_eq!(lite.exercises[2].reps, 15);
        assert_eq!(lite.exercises[3].reps, 6);
    }

    #[test]
    fn test_duplicate_gets_fresh_ids() {
        let plan = sample_plan();
        let copy = plan.duplicate();
        assert_ne!(copy.id, plan.id);
        for (a, b) in plan.exercises.iter().zip(&copy.exercises) {
            assert_ne!(a.id, b.id);
            assert_eq!(a.reps, b.reps);
        }
    }

    #[test]
    fn test_apply_progression_single_plan() {
        let mut plan = sample_plan();
        assert!(plan.apply_progression(&ExerciseId::new("d2e4"), 40));
        assert_eq!(plan.exercises[1].reps, 40);
        assert!(!plan.apply_progression(&ExerciseId::new("missing"), 99));
    }

    #[test]
    fn test_apply_progression_across_plans() {
        let mut plans = vec![sample_plan(), sample_plan(), sample_plan().lite_variant()];
        let changed = apply_progression(&mut plans, &ExerciseId::new("d2e1"), 12);
        assert_eq!(changed, 2);
        assert_eq!(plans[0].exercises[0].reps, 12);
        assert_eq!(plans[1].exercises[0].reps, 12);
        // lite variant has its own id and is untouched
        assert_eq!(plans[2].exercises[0].reps, 6);
    }
}
