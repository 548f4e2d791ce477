//! Whole-state export and import.

use reptrack_core::{ExerciseHistory, Goals, Plan, ProgressionEvent, Settings, Time, Workout};
use serde::{Deserialize, Serialize};
use super::{Result, Storage};
use tracing::info;

/// Snapshot of every bucket.
///
/// On import, a bucket that is absent from the bundle is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateBundle {
    /// Workouts, newest first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workouts: Option<Vec<Workout>>,
    /// Plans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plans: Option<Vec<Plan>>,
    /// Settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    /// Progression log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progressions: Option<Vec<ProgressionEvent>>,
    /// Per-exercise streaks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_history: Option<ExerciseHistory>,
    /// Monthly goals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Goals>,
    /// When the bundle was produced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<Time>,
}

impl StateBundle {
    /// Read every bucket of `storage`. Settings and goals fall back to their
    /// defaults when never saved.
    pub async fn export<S: Storage + ?Sized>(storage: &S) -> Result<Self> {
        Ok(Self {
            workouts: Some(storage.list_workouts().await?),
            plans: Some(storage.list_plans().await?),
            settings: Some(storage.load_settings().await?.unwrap_or_default()),
            progressions: Some(storage.list_progressions().await?),
            exercise_history: Some(storage.load_history().await?),
            goals: Some(storage.load_goals().await?.unwrap_or_default()),
            export_date: Some(chrono::Utc::now()),
        })
    }

    /// Parse a bundle.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace each bucket present in the bundle. Stops at the first failing
    /// write; buckets written before it keep their new contents.
    pub async fn import_into<S: Storage + ?Sized>(&self, storage: &mut S) -> Result<()> {
        let mut replaced = 0;
        if let Some(workouts) = &self.workouts {
            storage.replace_workouts(workouts).await?;
            replaced += 1;
        }
        if let Some(plans) = &self.plans {
            storage.replace_plans(plans).await?;
            replaced += 1;
        }
        if let Some(settings) = &self.settings {
            storage.save_settings(settings).await?;
            replaced += 1;
        }
        if let Some(progressions) = &self.progressions {
            storage.replace_progressions(progressions).await?;
            replaced += 1;
        }
        if let Some(history) = &self.exercise_history {
            storage.replace_history(history).await?;
            replaced += 1;
        }
        if let Some(goals) = &self.goals {
            storage.save_goals(goals).await?;
            replaced += 1;
        }
        info!("Imported {} buckets", replaced);
        Ok(())
    }
}
