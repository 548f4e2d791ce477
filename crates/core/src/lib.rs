//! reptrack core data models.
//!
//! This crate defines the data structures shared by the storage backends,
//! the progression engine and the command-line front end.

#![warn(missing_docs)]

// Core identities
mod id;

// Plans and their exercises
mod exercise;
mod plan;
mod defaults;

// Sessions
mod outcome;
mod workout;

// Progression state
mod history;
mod progression;

// User preferences
mod settings;

// Re-exports
pub use id::*;

pub use exercise::{Exercise, ExerciseKind};
pub use plan::{apply_progression, Plan, WarmupItem, LITE_SUFFIX};
pub use defaults::{default_plans, default_plans_with_lite};

pub use outcome::{ExerciseOutcome, ExerciseStatus};
pub use workout::{Workout, WorkoutStatus};

pub use history::{ExerciseHistory, HistoryEntry};
pub use progression::ProgressionEvent;

pub use settings::{Goals, ProgressionRules, Settings};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;

/// Pain reading on a 0-10 scale.
pub type Pain = u8;
