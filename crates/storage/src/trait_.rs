//! Storage trait abstraction.

use async_trait::async_trait;
use reptrack_core::{
    ExerciseHistory, ExerciseId, Goals, HistoryEntry, Plan, PlanId, ProgressionEvent, Settings,
    Workout, WorkoutId,
};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error (corrupt bucket data)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend refused the operation (quota, read-only medium)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// The named buckets a store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Recorded workouts
    Workouts,
    /// Workout plans
    Plans,
    /// User settings
    Settings,
    /// Progression log
    Progressions,
    /// Per-exercise streak state
    ExerciseHistory,
    /// Monthly goals
    Goals,
}

impl Bucket {
    /// Every bucket.
    pub const ALL: [Bucket; 6] = [
        Bucket::Workouts,
        Bucket::Plans,
        Bucket::Settings,
        Bucket::Progressions,
        Bucket::ExerciseHistory,
        Bucket::Goals,
    ];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Workouts => "workouts",
            Bucket::Plans => "plans",
            Bucket::Settings => "settings",
            Bucket::Progressions => "progressions",
            Bucket::ExerciseHistory => "exercise_history",
            Bucket::Goals => "goals",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage abstraction for reptrack data.
///
/// Every bucket supports get-all, upsert or append, delete and bulk replace.
/// A bucket that was never written reads as empty. Mutating methods take
/// `&mut self`: there is exactly one writer.
#[async_trait]
pub trait Storage: Send + Sync {
    // === Workout operations ===

    /// List workouts, newest first.
    async fn list_workouts(&self) -> Result<Vec<Workout>>;

    /// Save a workout. A new workout goes to the front, an existing one is
    /// replaced in place.
    async fn save_workout(&mut self, workout: &Workout) -> Result<()>;

    /// Delete a workout. Missing ids are ignored.
    async fn delete_workout(&mut self, id: &WorkoutId) -> Result<()>;

    /// Replace the whole workout bucket.
    async fn replace_workouts(&mut self, workouts: &[Workout]) -> Result<()>;

    /// Load a workout by ID.
    async fn load_workout(&self, id: &WorkoutId) -> Result<Option<Workout>> {
        Ok(self.list_workouts().await?.into_iter().find(|w| &w.id == id))
    }

    // === Plan operations ===

    /// List plans in stored order.
    async fn list_plans(&self) -> Result<Vec<Plan>>;

    /// Save a plan (create or update).
    async fn save_plan(&mut self, plan: &Plan) -> Result<()>;

    /// Delete a plan. Missing ids are ignored.
    async fn delete_plan(&mut self, id: &PlanId) -> Result<()>;

    /// Replace the whole plan bucket.
    async fn replace_plans(&mut self, plans: &[Plan]) -> Result<()>;

    /// Load a plan by ID.
    async fn load_plan(&self, id: &PlanId) -> Result<Option<Plan>> {
        Ok(self.list_plans().await?.into_iter().find(|p| &p.id == id))
    }

    // === Settings and goals ===

    /// Load settings, `None` if never saved.
    async fn load_settings(&self) -> Result<Option<Settings>>;

    /// Save settings.
    async fn save_settings(&mut self, settings: &Settings) -> Result<()>;

    /// Load goals, `None` if never saved.
    async fn load_goals(&self) -> Result<Option<Goals>>;

    /// Save goals.
    async fn save_goals(&mut self, goals: &Goals) -> Result<()>;

    // === Progression log ===

    /// List progression events in the order they were appended.
    async fn list_progressions(&self) -> Result<Vec<ProgressionEvent>>;

    /// Append a progression event.
    async fn append_progression(&mut self, event: &ProgressionEvent) -> Result<()>;

    /// Replace the whole progression log.
    async fn replace_progressions(&mut self, events: &[ProgressionEvent]) -> Result<()>;

    // === Exercise history ===

    /// Load the whole history bucket.
    async fn load_history(&self) -> Result<ExerciseHistory>;

    /// Save one history entry (create or update).
    async fn save_history_entry(&mut self, id: &ExerciseId, entry: &HistoryEntry) -> Result<()>;

    /// Delete one history entry. Missing ids are ignored.
    async fn delete_history_entry(&mut self, id: &ExerciseId) -> Result<()>;

    /// Replace the whole history bucket.
    async fn replace_history(&mut self, history: &ExerciseHistory) -> Result<()>;

    /// Load one history entry.
    async fn load_history_entry(&self, id: &ExerciseId) -> Result<Option<HistoryEntry>> {
        Ok(self.load_history().await?.get(id).copied())
    }

    // === Bulk ===

    /// Remove every bucket.
    async fn clear_all(&mut self) -> Result<()>;
}
