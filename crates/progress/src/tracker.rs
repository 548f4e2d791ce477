//! Exercise history tracker.
//!
//! Keeps, per exercise id, the number of qualifying completions in a row and
//! the last session pain. Every mutation is written to the store before the
//! call returns.

use reptrack_core::{ExerciseHistory, ExerciseId, HistoryEntry, Pain};
use reptrack_storage::{Result, Storage};
use tracing::debug;

/// Streak bookkeeping over the history bucket of a [`Storage`].
pub struct ExerciseHistoryTracker<S: Storage> {
    storage: S,
}

impl<S: Storage> ExerciseHistoryTracker<S> {
    /// Create a tracker over `storage`.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The underlying store.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The underlying store, mutably.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Give the store back.
    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Record one session outcome for an exercise.
    ///
    /// Creates the entry at zero if missing, then increments the streak when
    /// `qualifies` and resets it otherwise. `last_pain` is always updated.
    /// Each call is a separate session event: calling twice with the same
    /// input increments twice.
    pub async fn record_outcome(
        &mut self,
        exercise_id: &ExerciseId,
        qualifies: bool,
        pain: Pain,
    ) -> Result<HistoryEntry> {
        let mut entry = self.storage.load_history_entry(exercise_id).await?.unwrap_or_default();

        if qualifies {
            entry.consecutive_completions += 1;
        } else {
            entry.consecutive_completions = 0;
        }
        entry.last_pain = pain;

        self.storage.save_history_entry(exercise_id, &entry).await?;
        debug!(
            "History {}: streak {} (pain {})",
            exercise_id, entry.consecutive_completions, pain
        );
        Ok(entry)
    }

    /// Set the streak of an exercise to zero. Does nothing if the exercise has
    /// no entry.
    pub async fn reset(&mut self, exercise_id: &ExerciseId) -> Result<()> {
        let Some(mut entry) = self.storage.load_history_entry(exercise_id).await? else {
            return Ok(());
        };

        entry.consecutive_completions = 0;
        self.storage.save_history_entry(exercise_id, &entry).await?;
        debug!("History {}: streak reset", exercise_id);
        Ok(())
    }

    /// Look up an entry.
    pub async fn get(&self, exercise_id: &ExerciseId) -> Result<Option<HistoryEntry>> {
        self.storage.load_history_entry(exercise_id).await
    }

    /// Look up an entry, treating a missing one as a fresh `{0, 0}` entry.
    pub async fn entry_or_default(&self, exercise_id: &ExerciseId) -> Result<HistoryEntry> {
        Ok(self.get(exercise_id).await?.unwrap_or_default())
    }

    /// The whole history bucket.
    pub async fn all(&self) -> Result<ExerciseHistory> {
        self.storage.load_history().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reptrack_storage::{MemoryStorage, StorageError};

    fn id(s: &str) -> ExerciseId {
        ExerciseId::new(s)
    }

    #[tokio::test]
    async fn test_record_creates_and_increments() {
        let mut tracker = ExerciseHistoryTracker::new(MemoryStorage::new());

        let entry = tracker.record_outcome(&id("d1e1"), true, 2).await.unwrap();
        assert_eq!(entry, HistoryEntry { consecutive_completions: 1, last_pain: 2 });

        let entry = tracker.record_outcome(&id("d1e1"), true, 0).await.unwrap();
        assert_eq!(entry.consecutive_completions, 2);
        assert_eq!(entry.last_pain, 0);

        assert_eq!(tracker.get(&id("d1e1")).await.unwrap(), Some(entry));
    }

    #[tokio::test]
    async fn test_record_non_qualifying_resets_and_keeps_pain() {
        let mut tracker = ExerciseHistoryTracker::new(MemoryStorage::new());
        tracker.record_outcome(&id("d1e1"), true, 1).await.unwrap();

        let entry = tracker.record_outcome(&id("d1e1"), false, 6).await.unwrap();
        assert_eq!(entry, HistoryEntry { consecutive_completions: 0, last_pain: 6 });
    }

    #[tokio::test]
    async fn test_first_non_qualifying_outcome_creates_zero_entry() {
        let mut tracker = ExerciseHistoryTracker::new(MemoryStorage::new());
        let entry = tracker.record_outcome(&id("d3e3"), false, 4).await.unwrap();
        assert_eq!(entry.consecutive_completions, 0);
        assert!(tracker.get(&id("d3e3")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_reset_keeps_last_pain() {
        let mut tracker = ExerciseHistoryTracker::new(MemoryStorage::new());
        tracker.record_outcome(&id("d2e4"), true, 3).await.unwrap();
        tracker.reset(&id("d2e4")).await.unwrap();

        let entry = tracker.get(&id("d2e4")).await.unwrap().unwrap();
        assert_eq!(entry, HistoryEntry { consecutive_completions: 0, last_pain: 3 });
    }

    #[tokio::test]
    async fn test_absent_entries() {
        let mut tracker = ExerciseHistoryTracker::new(MemoryStorage::new());

        assert!(tracker.get(&id("nonexistent-id")).await.unwrap().is_none());
        tracker.reset(&id("nonexistent-id")).await.unwrap();
        assert!(tracker.get(&id("nonexistent-id")).await.unwrap().is_none());
        assert_eq!(tracker.storage().write_count(), 0);

        let entry = tracker.entry_or_default(&id("nonexistent-id")).await.unwrap();
        assert_eq!(entry, HistoryEntry { consecutive_completions: 0, last_pain: 0 });
    }

    #[tokio::test]
    async fn test_streaks_are_per_identifier() {
        let mut tracker = ExerciseHistoryTracker::new(MemoryStorage::new());
        tracker.record_outcome(&id("d1e1"), true, 0).await.unwrap();
        tracker.record_outcome(&id("d1e1_lite"), true, 0).await.unwrap();
        tracker.record_outcome(&id("d1e1_lite"), true, 0).await.unwrap();

        let all = tracker.all().await.unwrap();
        assert_eq!(all[&id("d1e1")].consecutive_completions, 1);
        assert_eq!(all[&id("d1e1_lite")].consecutive_completions, 2);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut storage = MemoryStorage::new();
        storage.set_fail_writes(true);
        let mut tracker = ExerciseHistoryTracker::new(storage);

        let err = tracker.record_outcome(&id("d1e1"), true, 0).await.unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));

        tracker.storage_mut().set_fail_writes(false);
        tracker.storage_mut().set_fail_reads(true);
        assert!(tracker.get(&id("d1e1")).await.is_err());
        assert!(tracker.reset(&id("d1e1")).await.is_err());
    }
}
