//! Workout model - one recorded training day.

use serde::{Deserialize, Serialize};
use crate::id::{PlanId, WorkoutId};
use crate::outcome::{ExerciseOutcome, ExerciseStatus};
use crate::{Pain, Time};

/// Overall status of a recorded day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutStatus {
    /// Every exercise complete and pain stayed low
    Complete,
    /// Trained, but not everything as prescribed
    Adapted,
    /// Nothing recorded
    Skipped,
    /// Planned rest day
    Rest,
    /// Missed through illness
    Sick,
}

impl WorkoutStatus {
    /// All variants, in display order.
    pub const ALL: [WorkoutStatus; 5] = [
        WorkoutStatus::Complete,
        WorkoutStatus::Adapted,
        WorkoutStatus::Skipped,
        WorkoutStatus::Rest,
        WorkoutStatus::Sick,
    ];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutStatus::Complete => "complete",
            WorkoutStatus::Adapted => "adapted",
            WorkoutStatus::Skipped => "skipped",
            WorkoutStatus::Rest => "rest",
            WorkoutStatus::Sick => "sick",
        }
    }

    /// Whether any training happened.
    pub fn is_training(&self) -> bool {
        matches!(self, WorkoutStatus::Complete | WorkoutStatus::Adapted)
    }
}

impl std::fmt::Display for WorkoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WorkoutStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkoutStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("unknown workout status: {}", s))
    }
}

/// A recorded day: a finished session, or a rest/sick marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    /// Unique identifier
    pub id: WorkoutId,

    /// When the session ended
    pub date: Time,

    /// Plan followed, if any
    pub plan_id: Option<PlanId>,

    /// Plan name at session time
    #[serde(default)]
    pub plan_name: String,

    /// Whether the lite variant was used
    #[serde(default)]
    pub is_lite: bool,

    /// Overall status
    pub status: WorkoutStatus,

    /// Length in minutes
    #[serde(default)]
    pub duration: u32,

    /// Per-exercise results
    #[serde(default)]
    pub exercise_results: Vec<ExerciseOutcome>,

    /// Back pain, 0-10
    #[serde(default)]
    pub back_pain: Pain,

    /// Knee pain, 0-10
    #[serde(default)]
    pub knee_pain: Pain,

    /// Free-text notes
    #[serde(default)]
    pub notes: String,
}

impl Workout {
    /// A day recorded without training (rest or sick).
    pub fn marker(status: WorkoutStatus, date: Time) -> Self {
        Self {
            id: WorkoutId::new(),
            date,
            plan_id: None,
            plan_name: String::new(),
            is_lite: false,
            status,
            duration: 0,
            exercise_results: Vec::new(),
            back_pain: 0,
            knee_pain: 0,
            notes: String::new(),
        }
    }

    /// The greater of the two pain readings.
    pub fn max_pain(&self) -> Pain {
        self.back_pain.max(self.knee_pain)
    }

    /// Number of results with the given status.
    pub fn count_status(&self, status: ExerciseStatus) -> usize {
        self.exercise_results.iter().filter(|r| r.status == status).count()
    }
}
