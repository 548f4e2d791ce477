//! Personal records: best completed reps per exercise.

use std::collections::BTreeMap;
use reptrack_core::{ExerciseId, ExerciseKind, Time, Workout};
use serde::Serialize;

/// Best result seen for one exercise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
    /// Exercise name at the time of the record
    pub name: String,
    /// Most reps (or seconds) completed in one session
    pub max_reps: u32,
    /// Load at the time
    pub weight: String,
    /// Exercise kind, for the unit
    pub kind: ExerciseKind,
    /// Date of the record
    pub date: Time,
}

/// Records from every complete exercise result, keyed by exercise id.
///
/// A record only moves when a later result beats it strictly, so ties keep
/// the earliest date.
pub fn personal_records(workouts: &[Workout]) -> BTreeMap<ExerciseId, PersonalRecord> {
    let mut ordered: Vec<&Workout> = workouts.iter().collect();
    ordered.sort_by_key(|w| w.date);

    let mut records: BTreeMap<ExerciseId, PersonalRecord> = BTreeMap::new();
    for workout in ordered {
        for result in workout.exercise_results.iter().filter(|r| r.is_complete()) {
            let beats = records
                .get(&result.exercise_id)
                .map_or(true, |record| result.actual_reps > record.max_reps);
            if beats {
                records.insert(
                    result.exercise_id.clone(),
                    PersonalRecord {
                        name: result.name.clone(),
                        max_reps: result.actual_reps,
                        weight: result.weight.clone(),
                        kind: result.kind,
                        date: workout.date,
                    },
                );
            }
        }
    }
    records
}
