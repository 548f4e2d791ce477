//! User settings, progression rules and monthly goals.

use serde::{Deserialize, Serialize};
use crate::exercise::ExerciseKind;
use crate::Pain;

/// Parameters of the progression rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressionRules {
    /// Highest session pain that still counts as low
    pub pain_threshold: Pain,
    /// Qualifying completions in a row needed to progress
    pub required_streak: u32,
    /// Reps added to a dynamic exercise
    pub dynamic_increment: u32,
    /// Seconds added to a static hold
    pub static_increment: u32,
}

impl ProgressionRules {
    /// Increment for an exercise kind.
    pub fn increment(&self, kind: ExerciseKind) -> u32 {
        match kind {
            ExerciseKind::Dynamic => self.dynamic_increment,
            ExerciseKind::Static => self.static_increment,
        }
    }
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            pain_threshold: 3,
            required_streak: 2,
            dynamic_increment: 2,
            static_increment: 10,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// UI theme name
    pub theme: String,
    /// Whether reminders are enabled
    pub notifications: bool,
    /// Reminder time of day, `HH:MM`
    pub reminder_time: String,
    /// Target training days per month
    pub monthly_goal: u32,
    /// UI language
    pub language: String,
    /// Progression parameters
    pub progression: ProgressionRules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            notifications: true,
            reminder_time: "18:00".to_string(),
            monthly_goal: 12,
            language: "en".to_string(),
            progression: ProgressionRules::default(),
        }
    }
}

/// Monthly training goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goals {
    /// Target training days this month
    pub monthly_target: u32,
    /// Month the target applies to, 0-based
    pub current_month: u32,
}

impl Default for Goals {
    fn default() -> Self {
        use chrono::Datelike;
        Self {
            monthly_target: 12,
            current_month: chrono::Utc::now().month0(),
        }
    }
}
