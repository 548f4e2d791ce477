//! Built-in four-day program used to seed an empty store.

use crate::exercise::{Exercise, ExerciseKind};
use crate::plan::{Plan, WarmupItem};

use ExerciseKind::{Dynamic, Static};

fn warmup() -> Vec<WarmupItem> {
    vec![
        WarmupItem::new("Neck rolls", 10, Dynamic),
        WarmupItem::new("Cat-camel", 10, Dynamic),
        WarmupItem::new("Glute bridge", 12, Dynamic),
    ]
}

fn day(id: &str, name: &str, duration: &str, exercises: Vec<Exercise>) -> Plan {
    Plan {
        duration: duration.to_string(),
        warmup: warmup(),
        exercises,
        ..Plan::new(id, name)
    }
}

/// The default program: four plans, one per training day.
pub fn default_plans() -> Vec<Plan> {
    vec![
        day(
            "day1",
            "Day 1 - Chest + Shoulders",
            "30-40 min",
            vec![
                Exercise::new("d1e1", "Dumbbell floor press", 3, 12, Dynamic).with_weight("2x6 kg", 6.0),
                Exercise::new("d1e2", "Single-arm standing press", 3, 10, Dynamic).with_weight("6 kg", 6.0),
                Exercise::new("d1e3", "Push-ups", 3, 10, Dynamic),
                Exercise::new("d1e4", "Lying dumbbell flyes", 3, 12, Dynamic)
                    .with_weight("2x6 kg", 6.0)
                    .with_notes("optional")
                    .optional(),
                Exercise::new("d1e5", "Lying leg raises", 3, 15, Dynamic),
            ],
        ),
        day(
            "day2",
            "Day 2 - Back + Biceps",
            "30-40 min",
            vec![
                Exercise::new("d2e1", "One-arm dumbbell row", 3, 10, Dynamic)
                    .with_weight("6 kg", 6.0)
                    .with_notes("knee supported, each arm"),
                Exercise::new("d2e2", "Shrugs", 3, 15, Dynamic)
                    .with_weight("2x6 kg", 6.0)
                    .with_notes("raise the shoulders"),
                Exercise::new("d2e3", "Hammer curl", 3, 10, Dynamic).with_weight("6 kg", 6.0),
                Exercise::new("d2e4", "Plank", 3, 30, Static).with_notes("seconds"),
                Exercise::new("d2e5", "Crunches", 3, 15, Dynamic),
            ],
        ),
        day(
            "day3",
            "Day 3 - Legs + Core",
            "30-40 min",
            vec![
                Exercise::new("d3e1", "Weighted glute bridge", 3, 15, Dynamic)
                    .with_weight("6 kg", 6.0)
                    .with_notes("dumbbell on hips"),
                Exercise::new("d3e2", "Lying leg raises", 3, 15, Dynamic),
                Exercise::new("d3e3", "Reverse crunches", 3, 20, Dynamic),
                Exercise::new("d3e4", "Dynamic plank", 3, 20, Dynamic).with_notes("alternate forearms"),
                Exercise::new("d3e5", "Pulse glute bridges", 2, 20, Dynamic).with_notes("fast"),
            ],
        ),
        day(
            "day4",
            "Day 4 - Light day",
            "30 min",
            vec![
                Exercise::new("d4e1", "Incline push-ups", 3, 12, Dynamic).with_notes("hands raised"),
                Exercise::new("d4e2", "Dumbbell floor press", 2, 12, Dynamic).with_weight("2x6 kg", 6.0),
                Exercise::new("d4e3", "Hammer curl", 2, 12, Dynamic).with_weight("6 kg", 6.0),
                Exercise::new("d4e4", "Grip hold", 3, 20, Static)
                    .with_weight("8 kg", 8.0)
                    .with_notes("hold the dumbbell by the end, seconds"),
                Exercise::new("d4e5", "Plank", 3, 40, Static).with_notes("seconds"),
            ],
        ),
    ]
}

/// The default plans followed by a lite variant of each.
pub fn default_plans_with_lite() -> Vec<Plan> {
    let base = default_plans();
    let lite: Vec<Plan> = base.iter().map(Plan::lite_variant).collect();
    base.into_iter().chain(lite).collect()
}
