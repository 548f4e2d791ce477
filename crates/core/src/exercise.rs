//! Exercise model - one prescribed movement inside a plan.

use serde::{Deserialize, Serialize};
use crate::id::ExerciseId;

/// How the `reps` of an exercise are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    /// Counted repetitions
    Dynamic,
    /// Held position, `reps` is a duration in seconds
    Static,
}

impl ExerciseKind {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseKind::Dynamic => "dynamic",
            ExerciseKind::Static => "static",
        }
    }

    /// Unit label for a `reps` value of this kind.
    pub fn unit(&self) -> &'static str {
        match self {
            ExerciseKind::Dynamic => "reps",
            ExerciseKind::Static => "s",
        }
    }
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A prescribed movement. Owned by a [`Plan`](crate::Plan); `reps` grows
/// when a progression is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Stable identifier, also the key of the progression history
    pub id: ExerciseId,

    /// Display name
    pub name: String,

    /// Number of sets
    pub sets: u32,

    /// Target repetitions, or seconds for static holds
    pub reps: u32,

    /// Resistance descriptor ("2x6 kg", "BW")
    #[serde(default)]
    pub weight: String,

    /// Numeric resistance in kg, 0 for bodyweight
    #[serde(default)]
    pub weight_value: f32,

    /// Dynamic or static
    #[serde(alias = "type")]
    pub kind: ExerciseKind,

    /// Free-text hints
    #[serde(default)]
    pub notes: String,

    /// May be left out of a session without consequence
    #[serde(default)]
    pub optional: bool,
}

impl Exercise {
    /// Create a bodyweight exercise with no notes.
    pub fn new(
        id: impl Into<ExerciseId>,
        name: impl Into<String>,
        sets: u32,
        reps: u32,
        kind: ExerciseKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sets,
            reps,
            weight: "BW".to_string(),
            weight_value: 0.0,
            kind,
            notes: String::new(),
            optional: false,
        }
    }

    /// Set the resistance.
    pub fn with_weight(mut self, weight: impl Into<String>, weight_value: f32) -> Self {
        self.weight = weight.into();
        self.weight_value = weight_value;
        self
    }

    /// Set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Mark as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Whether the resistance is bodyweight only.
    pub fn is_bodyweight(&self) -> bool {
        self.weight.is_empty() || self.weight == "BW"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ExerciseKind::Static).unwrap(), "\"static\"");
        assert_eq!(serde_json::to_string(&ExerciseKind::Dynamic).unwrap(), "\"dynamic\"");
    }

    #[test]
    fn test_accepts_legacy_type_field() {
        let json = r#"{"id":"d2e4","name":"Plank","sets":3,"reps":30,"weight":"BW","weightValue":0,"type":"static","notes":"seconds"}"#;
        let exercise: Exercise = serde_json::from_str(json).unwrap();
        assert_eq!(exercise.kind, ExerciseKind::Static);
        assert_eq!(exercise.reps, 30);
        assert!(!exercise.optional);
    }

    #[test]
    fn test_builder() {
        let exercise = Exercise::new("d1e1", "Floor press", 3, 12, ExerciseKind::Dynamic)
            .with_weight("2x6 kg", 6.0);
        assert!(!exercise.is_bodyweight());
        assert_eq!(exercise.weight_value, 6.0);
    }
}
