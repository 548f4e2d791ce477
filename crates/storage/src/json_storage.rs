//! JSON file storage implementation.
//!
//! Stores each bucket as one pretty-printed JSON file in a data directory
//! (`workouts.json`, `plans.json`, ...). Writes go to a temporary file that is
//! renamed over the bucket file, so a reader sees either the old or the new
//! bucket, never a torn one.

use std::path::{Path, PathBuf};
use async_trait::async_trait;
use reptrack_core::{
    ExerciseHistory, ExerciseId, Goals, HistoryEntry, Plan, PlanId, ProgressionEvent, Settings,
    Workout, WorkoutId,
};
use serde::{de::DeserializeOwned, Serialize};
use super::{Bucket, Result, Storage};
use tokio::fs;
use tracing::debug;

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Open storage rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn bucket_path(&self, bucket: Bucket) -> PathBuf {
        self.root.join(format!("{}.json", bucket.as_str()))
    }

    async fn read_bucket<T: DeserializeOwned>(&self, bucket: Bucket) -> Result<Option<T>> {
        read_json(&self.bucket_path(bucket)).await
    }

    async fn read_list<T: DeserializeOwned>(&self, bucket: Bucket) -> Result<Vec<T>> {
        Ok(self.read_bucket(bucket).await?.unwrap_or_default())
    }

    async fn write_bucket<T: Serialize + ?Sized>(&self, bucket: Bucket, value: &T) -> Result<()> {
        let path = self.bucket_path(bucket);
        let tmp = self.root.join(format!(".{}.json.tmp", bucket.as_str()));
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&tmp, json.as_bytes()).await?;
        fs::rename(&tmp, &path).await?;
        debug!("Wrote bucket {} ({} bytes)", bucket, json.len());
        Ok(())
    }

    async fn remove_bucket(&self, bucket: Bucket) -> Result<()> {
        fs::remove_file(self.bucket_path(bucket)).await.or_else(|e| {
            if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) }
        })?;
        Ok(())
    }
}

#[async_trait]
impl Storage for JsonStorage {
    async fn list_workouts(&self) -> Result<Vec<Workout>> {
        self.read_list(Bucket::Workouts).await
    }

    async fn save_workout(&mut self, workout: &Workout) -> Result<()> {
        let mut workouts: Vec<Workout> = self.read_list(Bucket::Workouts).await?;
        match workouts.iter_mut().find(|w| w.id == workout.id) {
            Some(existing) => *existing = workout.clone(),
            None => workouts.insert(0, workout.clone()),
        }
        self.write_bucket(Bucket::Workouts, &workouts).await
    }

    async fn delete_workout(&mut self, id: &WorkoutId) -> Result<()> {
        let mut workouts: Vec<Workout> = self.read_list(Bucket::Workouts).await?;
        workouts.retain(|w| &w.id != id);
        self.write_bucket(Bucket::Workouts, &workouts).await
    }

    async fn replace_workouts(&mut self, workouts: &[Workout]) -> Result<()> {
        self.write_bucket(Bucket::Workouts, workouts).await
    }

    async fn list_plans(&self) -> Result<Vec<Plan>> {
        self.read_list(Bucket::Plans).await
    }

    async fn save_plan(&mut self, plan: &Plan) -> Result<()> {
        let mut plans: Vec<Plan> = self.read_list(Bucket::Plans).await?;
        match plans.iter_mut().find(|p| p.id == plan.id) {
            Some(existing) => *existing = plan.clone(),
            None => plans.push(plan.clone()),
        }
        self.write_bucket(Bucket::Plans, &plans).await
    }

    async fn delete_plan(&mut self, id: &PlanId) -> Result<()> {
        let mut plans: Vec<Plan> = self.read_list(Bucket::Plans).await?;
        plans.retain(|p| &p.id != id);
        self.write_bucket(Bucket::Plans, &plans).await
    }

    async fn replace_plans(&mut self, plans: &[Plan]) -> Result<()> {
        self.write_bucket(Bucket::Plans, plans).await
    }

    async fn load_settings(&self) -> Result<Option<Settings>> {
        self.read_bucket(Bucket::Settings).await
    }

    async fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        self.write_bucket(Bucket::Settings, settings).await
    }

    async fn load_goals(&self) -> Result<Option<Goals>> {
        self.read_bucket(Bucket::Goals).await
    }

    async fn save_goals(&mut self, goals: &Goals) -> Result<()> {
        self.write_bucket(Bucket::Goals, goals).await
    }

    async fn list_progressions(&self) -> Result<Vec<ProgressionEvent>> {
        self.read_list(Bucket::Progressions).await
    }

    async fn append_progression(&mut self, event: &ProgressionEvent) -> Result<()> {
        let mut events: Vec<ProgressionEvent> = self.read_list(Bucket::Progressions).await?;
        events.push(event.clone());
        self.write_bucket(Bucket::Progressions, &events).await
    }

    async fn replace_progressions(&mut self, events: &[ProgressionEvent]) -> Result<()> {
        self.write_bucket(Bucket::Progressions, events).await
    }

    async fn load_history(&self) -> Result<ExerciseHistory> {
        Ok(self.read_bucket(Bucket::ExerciseHistory).await?.unwrap_or_default())
    }

    async fn save_history_entry(&mut self, id: &ExerciseId, entry: &HistoryEntry) -> Result<()> {
        let mut history = self.load_history().await?;
        history.insert(id.clone(), *entry);
        self.write_bucket(Bucket::ExerciseHistory, &history).await
    }

    async fn delete_history_entry(&mut self, id: &ExerciseId) -> Result<()> {
        let mut history = self.load_history().await?;
        if history.remove(id).is_some() {
            self.write_bucket(Bucket::ExerciseHistory, &history).await?;
        }
        Ok(())
    }

    async fn replace_history(&mut self, history: &ExerciseHistory) -> Result<()> {
        self.write_bucket(Bucket::ExerciseHistory, history).await
    }

    async fn clear_all(&mut self) -> Result<()> {
        for bucket in Bucket::ALL {
            self.remove_bucket(bucket).await?;
        }
        Ok(())
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageError;
    use reptrack_core::{default_plans_with_lite, ExerciseKind, Exercise, WorkoutStatus};

    #[tokio::test]
    async fn test_empty_directory_reads_as_empty_buckets() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();

        assert!(storage.list_workouts().await.unwrap().is_empty());
        assert!(storage.list_plans().await.unwrap().is_empty());
        assert!(storage.load_settings().await.unwrap().is_none());
        assert!(storage.load_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut storage = JsonStorage::new(dir.path()).await.unwrap();
            storage.replace_plans(&default_plans_with_lite()).await.unwrap();
            storage
                .save_history_entry(
                    &ExerciseId::new("d1e1"),
                    &HistoryEntry { consecutive_completions: 1, last_pain: 2 },
                )
                .await
                .unwrap();
            let exercise = Exercise::new("d1e1", "Floor press", 3, 12, ExerciseKind::Dynamic);
            storage.append_progression(&ProgressionEvent::new(&exercise, 14)).await.unwrap();
        }

        let storage = JsonStorage::new(dir.path()).await.unwrap();
        assert_eq!(storage.list_plans().await.unwrap().len(), 8);
        let entry = storage.load_history_entry(&ExerciseId::new("d1e1")).await.unwrap().unwrap();
        assert_eq!(entry.consecutive_completions, 1);
        assert_eq!(storage.list_progressions().await.unwrap()[0].new_reps, 14);
    }

    #[tokio::test]
    async fn test_bucket_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();
        storage
            .save_workout(&Workout::marker(WorkoutStatus::Rest, chrono::Utc::now()))
            .await
            .unwrap();

        assert!(dir.path().join("workouts.json").exists());
        assert!(!dir.path().join(".workouts.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_bucket_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("exercise_history.json"), "{not json").unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();

        let err = storage.load_history().await.unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }

    #[tokio::test]
    async fn test_clear_all_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();
        storage.save_settings(&Settings::default()).await.unwrap();
        storage.clear_all().await.unwrap();
        assert!(!dir.path().join("settings.json").exists());
        // second clear on an empty directory is fine
        storage.clear_all().await.unwrap();
    }
}
