//! Identifiers for reptrack entities.
//!
//! Plan and exercise ids are stable strings chosen by whoever authored the
//! plan (`day1`, `d1e3`, `d1e3_lite`). Workout and progression ids are
//! generated.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Stable identifier of an exercise inside a plan.
///
/// Progression history is keyed by this string, so two exercises share a
/// streak only if their ids are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseId(String);

impl ExerciseId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh, unique identifier.
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Derive the id of a variant by appending a suffix.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}{}", self.0, suffix))
    }

    /// Borrow as `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExerciseId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ExerciseId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Stable identifier of a plan.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(String);

impl PlanId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh, unique identifier.
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Derive the id of a variant by appending a suffix.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}{}", self.0, suffix))
    }

    /// Borrow as `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlanId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Unique identifier for a Workout.
///
/// New workouts get a ULID string; any other string id loads as is, so
/// records exported from older versions keep their ids.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    /// Generate a new WorkoutId
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Borrow as `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for WorkoutId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkoutId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for a ProgressionEvent
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressionId(String);

impl ProgressionId {
    /// Generate a new ProgressionId
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Borrow as `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ProgressionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProgressionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
