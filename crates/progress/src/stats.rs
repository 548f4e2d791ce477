//! Workout and monthly statistics.

use std::collections::BTreeMap;
use chrono::Datelike;
use reptrack_core::{ExerciseStatus, Pain, Time, Workout, WorkoutStatus};
use serde::Serialize;

/// Exercise status counts of one workout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkoutStats {
    /// Complete exercises
    pub complete: usize,
    /// Adapted exercises
    pub adapted: usize,
    /// Skipped exercises
    pub skipped: usize,
}

impl WorkoutStats {
    /// Count the results of `workout`.
    pub fn of(workout: &Workout) -> Self {
        Self {
            complete: workout.count_status(ExerciseStatus::Complete),
            adapted: workout.count_status(ExerciseStatus::Adapted),
            skipped: workout.count_status(ExerciseStatus::Skipped),
        }
    }
}

/// Training counts of one week of a month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WeekStats {
    /// Week number, 1-5 (days 1-7 are week 1, days 29-31 week 5)
    pub week: u32,
    /// Complete days
    pub complete: usize,
    /// Adapted days
    pub adapted: usize,
    /// Skipped days
    pub skipped: usize,
}

/// One point of the pain series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PainPoint {
    /// When
    pub date: Time,
    /// Back pain
    pub back: Pain,
    /// Knee pain
    pub knee: Pain,
}

/// Statistics of one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyStats {
    /// Recorded days, any status
    pub total: usize,
    /// Days per status
    pub by_status: BTreeMap<&'static str, usize>,
    /// Mean back pain, one decimal
    pub avg_back_pain: f32,
    /// Mean knee pain, one decimal
    pub avg_knee_pain: f32,
    /// Mean duration in minutes, rounded
    pub avg_duration: u32,
    /// Sum of durations in minutes
    pub total_duration: u32,
    /// Weeks with at least one complete, adapted or skipped day
    pub weeks: Vec<WeekStats>,
    /// Pain readings in date order
    pub pain_series: Vec<PainPoint>,
}

impl MonthlyStats {
    /// Days with the given status.
    pub fn count(&self, status: WorkoutStatus) -> usize {
        self.by_status.get(status.as_str()).copied().unwrap_or(0)
    }

    /// Share of recorded days that were complete, in whole percent.
    pub fn completion_rate(&self) -> u32 {
        percent(self.count(WorkoutStatus::Complete), self.total)
    }

    /// Recorded days against a monthly target, in whole percent.
    pub fn goal_progress(&self, monthly_goal: u32) -> u32 {
        percent(self.total, monthly_goal as usize)
    }
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

fn round1(value: f64) -> f32 {
    ((value * 10.0).round() / 10.0) as f32
}

/// Statistics for `month` (1-12) of `year`. Dates are compared in UTC.
pub fn monthly_stats(workouts: &[Workout], year: i32, month: u32) -> MonthlyStats {
    let mut month_workouts: Vec<&Workout> = workouts
        .iter()
        .filter(|w| w.date.year() == year && w.date.month() == month)
        .collect();
    month_workouts.sort_by_key(|w| w.date);

    let mut stats = MonthlyStats {
        total: month_workouts.len(),
        ..Default::default()
    };
    for status in WorkoutStatus::ALL {
        stats.by_status.insert(status.as_str(), 0);
    }
    if month_workouts.is_empty() {
        return stats;
    }

    let mut back_sum = 0u32;
    let mut knee_sum = 0u32;
    let mut weeks: BTreeMap<u32, WeekStats> = BTreeMap::new();

    for w in &month_workouts {
        *stats.by_status.entry(w.status.as_str()).or_insert(0) += 1;
        back_sum += u32::from(w.back_pain);
        knee_sum += u32::from(w.knee_pain);
        stats.total_duration += w.duration;

        let week = ((w.date.day() - 1) / 7).min(4) + 1;
        let entry = weeks.entry(week).or_insert(WeekStats { week, ..Default::default() });
        match w.status {
            WorkoutStatus::Complete => entry.complete += 1,
            WorkoutStatus::Adapted => entry.adapted += 1,
            WorkoutStatus::Skipped => entry.skipped += 1,
            WorkoutStatus::Rest | WorkoutStatus::Sick => {}
        }

        stats.pain_series.push(PainPoint {
            date: w.date,
            back: w.back_pain,
            knee: w.knee_pain,
        });
    }

    let n = month_workouts.len() as f64;
    stats.avg_back_pain = round1(f64::from(back_sum) / n);
    stats.avg_knee_pain = round1(f64::from(knee_sum) / n);
    stats.avg_duration = (f64::from(stats.total_duration) / n).round() as u32;
    stats.weeks = weeks
        .into_values()
        .filter(|w| w.complete + w.adapted + w.skipped > 0)
        .collect();
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use reptrack_core::{Exercise, ExerciseKind, ExerciseOutcome};

    fn at(day: u32, status: WorkoutStatus, back: Pain, knee: Pain, duration: u32) -> Workout {
        Workout {
            back_pain: back,
            knee_pain: knee,
            duration,
            ..Workout::marker(status, chrono::Utc.with_ymd_and_hms(2026, 3, day, 18, 0, 0).unwrap())
        }
    }

    #[test]
    fn test_workout_stats() {
        let ex = Exercise::new("a", "A", 1, 10, ExerciseKind::Dynamic);
        let mut workout = at(1, WorkoutStatus::Adapted, 0, 0, 30);
        workout.exercise_results = vec![
            ExerciseOutcome::complete(&ex),
            ExerciseOutcome::complete(&ex),
            ExerciseOutcome::for_exercise(&ex, ExerciseStatus::Skipped, 0),
        ];
        assert_eq!(WorkoutStats::of(&workout), WorkoutStats { complete: 2, adapted: 0, skipped: 1 });
    }

    #[test]
    fn test_monthly_stats() {
        let workouts = vec![
            at(2, WorkoutStatus::Complete, 1, 2, 35),
            at(4, WorkoutStatus::Adapted, 4, 1, 40),
            at(9, WorkoutStatus::Rest, 0, 0, 0),
            at(30, WorkoutStatus::Complete, 2, 0, 30),
            Workout::marker(WorkoutStatus::Complete, chrono::Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap()),
        ];
        let stats = monthly_stats(&workouts, 2026, 3);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.count(WorkoutStatus::Complete), 2);
        assert_eq!(stats.count(WorkoutStatus::Rest), 1);
        assert_eq!(stats.count(WorkoutStatus::Sick), 0);
        assert_eq!(stats.avg_back_pain, 1.8);
        assert_eq!(stats.avg_knee_pain, 0.8);
        assert_eq!(stats.total_duration, 105);
        assert_eq!(stats.avg_duration, 26);
        assert_eq!(stats.completion_rate(), 50);
        assert_eq!(stats.goal_progress(12), 33);

        // week 2 only has a rest day and is dropped; day 30 lands in week 5
        let weeks: Vec<u32> = stats.weeks.iter().map(|w| w.week).collect();
        assert_eq!(weeks, vec![1, 5]);
        assert_eq!(stats.weeks[0].complete, 1);
        assert_eq!(stats.weeks[0].adapted, 1);

        assert_eq!(stats.pain_series.len(), 4);
        assert_eq!(stats.pain_series[1].back, 4);
    }

    #[test]
    fn test_empty_month() {
        let stats = monthly_stats(&[], 2026, 1);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.avg_duration, 0);
        assert_eq!(stats.completion_rate(), 0);
        assert_eq!(stats.goal_progress(0), 0);
    }
}
