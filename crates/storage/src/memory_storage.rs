//! In-memory storage backend.
//!
//! Holds every bucket in plain collections. Used as the store fake in tests;
//! it can be told to reject reads or writes to exercise error propagation.

use async_trait::async_trait;
use reptrack_core::{
    ExerciseHistory, ExerciseId, Goals, HistoryEntry, Plan, PlanId, ProgressionEvent, Settings,
    Workout, WorkoutId,
};
use super::{Bucket, Result, Storage, StorageError};

/// In-memory storage backend.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    workouts: Vec<Workout>,
    plans: Vec<Plan>,
    settings: Option<Settings>,
    goals: Option<Goals>,
    progressions: Vec<ProgressionEvent>,
    history: ExerciseHistory,

    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail with [`StorageError::Unavailable`].
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make every subsequent write fail with [`StorageError::Unavailable`].
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn check_read(&self, bucket: Bucket) -> Result<()> {
        if self.fail_reads {
            return Err(StorageError::Unavailable(format!("read of {} rejected", bucket)));
        }
        Ok(())
    }

    fn begin_write(&mut self, bucket: Bucket) -> Result<()> {
        if self.fail_writes {
            return Err(StorageError::Unavailable(format!("write to {} rejected", bucket)));
        }
        self.writes += 1;
        Ok(())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn list_workouts(&self) -> Result<Vec<Workout>> {
        self.check_read(Bucket::Workouts)?;
        Ok(self.workouts.clone())
    }

    async fn save_workout(&mut self, workout: &Workout) -> Result<()> {
        self.begin_write(Bucket::Workouts)?;
        match self.workouts.iter_mut().find(|w| w.id == workout.id) {
            Some(existing) => *existing = workout.clone(),
            None => self.workouts.insert(0, workout.clone()),
        }
        Ok(())
    }

    async fn delete_workout(&mut self, id: &WorkoutId) -> Result<()> {
        self.begin_write(Bucket::Workouts)?;
        self.workouts.retain(|w| &w.id != id);
        Ok(())
    }

    async fn replace_workouts(&mut self, workouts: &[Workout]) -> Result<()> {
        self.begin_write(Bucket::Workouts)?;
        self.workouts = workouts.to_vec();
        Ok(())
    }

    async fn list_plans(&self) -> Result<Vec<Plan>> {
        self.check_read(Bucket::Plans)?;
        Ok(self.plans.clone())
    }

    async fn save_plan(&mut self, plan: &Plan) -> Result<()> {
        self.begin_write(Bucket::Plans)?;
        match self.plans.iter_mut().find(|p| p.id == plan.id) {
            Some(existing) => *existing = plan.clone(),
            None => self.plans.push(plan.clone()),
        }
        Ok(())
    }

    async fn delete_plan(&mut self, id: &PlanId) -> Result<()> {
        self.begin_write(Bucket::Plans)?;
        self.plans.retain(|p| &p.id != id);
        Ok(())
    }

    async fn replace_plans(&mut self, plans: &[Plan]) -> Result<()> {
        self.begin_write(Bucket::Plans)?;
        self.plans = plans.to_vec();
        Ok(())
    }

    async fn load_settings(&self) -> Result<Option<Settings>> {
        self.check_read(Bucket::Settings)?;
        Ok(self.settings.clone())
    }

    async fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        self.begin_write(Bucket::Settings)?;
        self.settings = Some(settings.clone());
        Ok(())
    }

    async fn load_goals(&self) -> Result<Option<Goals>> {
        self.check_read(Bucket::Goals)?;
        Ok(self.goals)
    }

    async fn save_goals(&mut self, goals: &Goals) -> Result<()> {
        self.begin_write(Bucket::Goals)?;
        self.goals = Some(*goals);
        Ok(())
    }

    async fn list_progressions(&self) -> Result<Vec<ProgressionEvent>> {
        self.check_read(Bucket::Progressions)?;
        Ok(self.progressions.clone())
    }

    async fn append_progression(&mut self, event: &ProgressionEvent) -> Result<()> {
        self.begin_write(Bucket::Progressions)?;
        self.progressions.push(event.clone());
        Ok(())
    }

    async fn replace_progressions(&mut self, events: &[ProgressionEvent]) -> Result<()> {
        self.begin_write(Bucket::Progressions)?;
        self.progressions = events.to_vec();
        Ok(())
    }

    async fn load_history(&self) -> Result<ExerciseHistory> {
        self.check_read(Bucket::ExerciseHistory)?;
        Ok(self.history.clone())
    }

    async fn save_history_entry(&mut self, id: &ExerciseId, entry: &HistoryEntry) -> Result<()> {
        self.begin_write(Bucket::ExerciseHistory)?;
        self.history.insert(id.clone(), *entry);
        Ok(())
    }

    async fn delete_history_entry(&mut self, id: &ExerciseId) -> Result<()> {
        self.begin_write(Bucket::ExerciseHistory)?;
        self.history.remove(id);
        Ok(())
    }

    async fn replace_history(&mut self, history: &ExerciseHistory) -> Result<()> {
        self.begin_write(Bucket::ExerciseHistory)?;
        self.history = history.clone();
        Ok(())
    }

    async fn clear_all(&mut self) -> Result<()> {
        for bucket in Bucket::ALL {
            self.begin_write(bucket)?;
        }
        self.workouts.clear();
        self.plans.clear();
        self.settings = None;
        self.goals = None;
        self.progressions.clear();
        self.history.clear();
        Ok(())
    }
}
