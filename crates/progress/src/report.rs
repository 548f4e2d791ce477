//! Plain-text workout report.

use reptrack_core::{ExerciseStatus, Plan, Workout};
use crate::stats::WorkoutStats;

const RULE: &str = "--------------------";

/// Human readable duration: `45 min`, `1 h`, `1 h 20 min`.
pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{} min", minutes);
    }
    let (hours, mins) = (minutes / 60, minutes % 60);
    if mins > 0 {
        format!("{} h {} min", hours, mins)
    } else {
        format!("{} h", hours)
    }
}

/// Render a workout as a shareable text report.
///
/// The plan name is taken from `plan` when given, otherwise from the name
/// snapshotted on the workout.
pub fn report_text(workout: &Workout, plan: Option<&Plan>) -> String {
    let stats = WorkoutStats::of(workout);
    let plan_name = plan.map_or(workout.plan_name.as_str(), |p| p.name.as_str());
    let mode = if workout.is_lite { "LITE" } else { "CANON" };

    let mut out = String::from("WORKOUT REPORT\n");
    out.push_str(RULE);
    out.push_str("\n\n");
    out.push_str(&format!("Date: {}\n", workout.date.format("%-d %B %Y")));
    out.push_str(&format!("Plan: {}\n", plan_name));
    out.push_str(&format!("Duration: {}\n", format_duration(workout.duration)));
    out.push_str(&format!("Mode: {}\n\n", mode));

    out.push_str("EXERCISES:\n");
    out.push_str(RULE);
    out.push('\n');
    for (i, result) in workout.exercise_results.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, result.name));
        out.push_str(&format!(
            "   {} {}/{} {}",
            result.status.icon(),
            result.actual_reps,
            result.target_reps,
            result.kind.unit()
        ));
        if !result.weight.is_empty() && result.weight != "BW" {
            out.push_str(&format!(" | {}", result.weight));
        }
        out.push('\n');
        if !result.notes.is_empty() {
            out.push_str(&format!("   note: {}\n", result.notes));
        }
    }

    out.push_str("\nRESULT:\n");
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("{} Complete: {}\n", ExerciseStatus::Complete.icon(), stats.complete));
    out.push_str(&format!("{} Adapted: {}\n", ExerciseStatus::Adapted.icon(), stats.adapted));
    out.push_str(&format!("{} Skipped: {}\n\n", ExerciseStatus::Skipped.icon(), stats.skipped));

    out.push_str("PAIN:\n");
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("Back: {}/10\n", workout.back_pain));
    out.push_str(&format!("Knees: {}/10\n", workout.knee_pain));

    if !workout.notes.is_empty() {
        out.push_str("\nNOTES:\n");
        out.push_str(RULE);
        out.push('\n');
        out.push_str(&workout.notes);
        out.push('\n');
    }

    out
}
