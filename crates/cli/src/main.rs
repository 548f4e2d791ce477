//! RepTrack CLI - workout log with automatic progression.

use std::path::PathBuf;
use anyhow::{anyhow, bail, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use reptrack_core::{
    default_plans_with_lite, ExerciseOutcome, ExerciseStatus, Pain, Plan, PlanId,
    WorkoutId, WorkoutStatus, LITE_SUFFIX,
};
use reptrack_progress::{
    monthly_stats, personal_records, recommendations, report_text, format_duration,
    ProgressionEngine, SessionAggregator, SessionInput, WorkoutStats,
};
use reptrack_storage::{JsonStorage, StateBundle, Storage};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reptrack")]
#[command(about = "Workout log with automatic progression", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the JSON buckets
    #[arg(long, global = true, env = "REPTRACK_DATA_DIR", default_value = ".reptrack")]
    data_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the default plans and their lite variants
    Init,
    /// List plans
    Plans,
    /// Add a lite variant of a plan
    Lite {
        /// Plan ID
        plan: String,
    },
    /// Add a copy of a plan with fresh identifiers
    Copy {
        /// Plan ID
        plan: String,
    },
    /// Finish a session and apply progressions
    Finish {
        /// Plan ID
        #[arg(long)]
        plan: String,
        /// Use the lite variant of the plan
        #[arg(long)]
        lite: bool,
        /// Back pain (0-10)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
        back_pain: Pain,
        /// Knee pain (0-10)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
        knee_pain: Pain,
        /// Exercise result as EXERCISE=STATUS[:REPS]; unlisted exercises are not recorded
        #[arg(long = "result", value_parser = parse_result)]
        results: Vec<ResultArg>,
        /// Record every unlisted exercise as complete
        #[arg(long)]
        rest_complete: bool,
        /// Length in minutes
        #[arg(long, default_value = "0")]
        duration: u32,
        /// Free-text notes
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Record a day without training
    Mark {
        /// Why no training happened
        #[arg(long, value_enum)]
        status: MarkStatus,
    },
    /// List recorded days
    History,
    /// Print a workout report
    Report {
        /// Workout ID
        id: String,
    },
    /// List the progression log
    Progressions,
    /// Show completion streaks
    Streaks,
    /// Monthly statistics
    Stats {
        /// Year, defaults to the current one
        #[arg(long)]
        year: Option<i32>,
        /// Month 1-12, defaults to the current one
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    /// Personal records
    Records,
    /// Export all data as JSON
    Export {
        /// Output file, stdout if omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Import a JSON export
    Import {
        /// Bundle file
        file: PathBuf,
    },
    /// Delete all data
    Clear,
    /// Show settings
    Settings,
}

#[derive(Clone, Copy, ValueEnum)]
enum MarkStatus {
    Rest,
    Sick,
}

impl From<MarkStatus> for WorkoutStatus {
    fn from(status: MarkStatus) -> Self {
        match status {
            MarkStatus::Rest => WorkoutStatus::Rest,
            MarkStatus::Sick => WorkoutStatus::Sick,
        }
    }
}

/// One `--result` argument.
#[derive(Debug, Clone, PartialEq)]
struct ResultArg {
    exercise: String,
    status: ExerciseStatus,
    reps: Option<u32>,
}

fn parse_result(s: &str) -> std::result::Result<ResultArg, String> {
    let (exercise, rest) = s
        .split_once('=')
        .ok_or_else(|| format!("expected EXERCISE=STATUS[:REPS], got '{}'", s))?;
    if exercise.is_empty() {
        return Err("missing exercise id".to_string());
    }
    let (status, reps) = match rest.split_once(':') {
        Some((status, reps)) => {
            let reps = reps.parse().map_err(|_| format!("invalid reps: '{}'", reps))?;
            (status, Some(reps))
        }
        None => (rest, None),
    };
    Ok(ResultArg {
        exercise: exercise.to_string(),
        status: status.parse()?,
        reps,
    })
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("REPTRACK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build outcomes in plan order. Exercises without a result are left out
/// unless `rest_complete` is set. Results may name the base id even when the
/// lite plan is used.
fn build_outcomes(plan: &Plan, results: &[ResultArg], rest_complete: bool) -> Result<Vec<ExerciseOutcome>> {
    for result in results {
        let known = plan.exercises.iter().any(|e| {
            e.id.as_str() == result.exercise || e.id.as_str() == format!("{}{}", result.exercise, LITE_SUFFIX)
        });
        if !known {
            bail!("Exercise {} is not in plan {}", result.exercise, plan.id);
        }
    }

    Ok(plan
        .exercises
        .iter()
        .filter_map(|exercise| {
            let result = results.iter().rev().find(|r| {
                exercise.id.as_str() == r.exercise
                    || exercise.id.as_str() == format!("{}{}", r.exercise, LITE_SUFFIX)
            });
            match result {
                None if rest_complete => Some(ExerciseOutcome::complete(exercise)),
                None => None,
                Some(r) => {
                    let reps = r.reps.unwrap_or(match r.status {
                        ExerciseStatus::Skipped => 0,
                        _ => exercise.reps,
                    });
                    Some(ExerciseOutcome::for_exercise(exercise, r.status, reps))
                }
            }
        })
        .collect())
}

async fn load_plan(storage: &JsonStorage, id: &str) -> Result<Plan> {
    storage
        .load_plan(&PlanId::new(id))
        .await?
        .ok_or_else(|| anyhow!("Plan not found: {}", id))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let mut storage = JsonStorage::new(&cli.data_dir).await?;

    match cli.command {
        Commands::Init => {
            if storage.list_plans().await?.is_empty() {
                let plans = default_plans_with_lite();
                storage.replace_plans(&plans).await?;
                info!("Seeded {} plans", plans.len());
            }
            if storage.load_settings().await?.is_none() {
                storage.save_settings(&Default::default()).await?;
            }
            if storage.load_goals().await?.is_none() {
                storage.save_goals(&Default::default()).await?;
            }
            println!("Initialized {}", cli.data_dir.display());
        }
        Commands::Plans => {
            let plans = storage.list_plans().await?;
            println!("Plans ({})", plans.len());
            for plan in plans {
                let mode = if plan.is_lite { " [LITE]" } else { "" };
                println!("  {} | {}{} | {}", plan.id, plan.name, mode, plan.duration);
                for ex in &plan.exercises {
                    let optional = if ex.optional { " (optional)" } else { "" };
                    println!(
                        "      {} | {} | {}x{} {} | {}{}",
                        ex.id, ex.name, ex.sets, ex.reps, ex.kind.unit(), ex.weight, optional
                    );
                }
            }
        }
        Commands::Lite { plan } => {
            let plan = load_plan(&storage, &plan).await?;
            if plan.is_lite {
                bail!("Plan {} is already a lite variant", plan.id);
            }
            let lite = plan.lite_variant();
            storage.save_plan(&lite).await?;
            println!("Added plan: {} - {}", lite.id, lite.name);
        }
        Commands::Copy { plan } => {
            let copy = load_plan(&storage, &plan).await?.duplicate();
            storage.save_plan(&copy).await?;
            println!("Added plan: {} - {}", copy.id, copy.name);
        }
        Commands::Finish { plan, lite, back_pain, knee_pain, results, rest_complete, duration, notes } => {
            let plan_id = if lite { format!("{}{}", plan, LITE_SUFFIX) } else { plan };
            let plan = load_plan(&storage, &plan_id).await?;
            let outcomes = build_outcomes(&plan, &results, rest_complete)?;

            let settings = storage.load_settings().await?.unwrap_or_default();
            let engine = ProgressionEngine::new(storage).with_rules(settings.progression);
            let mut aggregator = SessionAggregator::with_engine(engine);

            let input = SessionInput { outcomes, duration, notes, ..SessionInput::new(plan) }
                .pain(back_pain, knee_pain);
            let summary = aggregator.finish(input).await?;

            let stats = WorkoutStats::of(&summary.workout);
            println!("Workout {}: {}", summary.workout.id, summary.workout.status);
            println!(
                "  {} complete, {} adapted, {} skipped",
                stats.complete, stats.adapted, stats.skipped
            );
            for (id, decision) in &summary.decisions {
                if let Some(reason) = decision.reason() {
                    println!("  {} held: {}", id, reason.as_str());
                }
            }
            for event in &summary.progressions {
                let sets = summary.plan.exercise(&event.exercise_id).map(|e| e.sets);
                println!("  Progression! {}", event.message(sets));
            }
        }
        Commands::Mark { status } => {
            let mut aggregator = SessionAggregator::new(storage);
            let workout = aggregator.record_marker(status.into(), chrono::Utc::now()).await?;
            println!("Marked {} as {}", workout.date.format("%Y-%m-%d"), workout.status);
        }
        Commands::History => {
            let workouts = storage.list_workouts().await?;
            println!("Workouts ({})", workouts.len());
            for w in workouts {
                let stats = WorkoutStats::of(&w);
                println!(
                    "  {} | {} | {} | {} | {}/{}/{} | pain {}/{}",
                    w.id,
                    w.date.format("%Y-%m-%d"),
                    w.status,
                    w.plan_name,
                    stats.complete,
                    stats.adapted,
                    stats.skipped,
                    w.back_pain,
                    w.knee_pain,
                );
            }
        }
        Commands::Report { id } => {
            let Some(workout) = storage.load_workout(&WorkoutId::from(id.as_str())).await? else {
                println!("Workout not found");
                return Ok(());
            };
            let plan = match &workout.plan_id {
                Some(plan_id) => storage.load_plan(plan_id).await?,
                None => None,
            };
            print!("{}", report_text(&workout, plan.as_ref()));
        }
        Commands::Progressions => {
            let events = storage.list_progressions().await?;
            println!("Progressions ({})", events.len());
            for event in events.iter().rev() {
                println!("  {} | {}", event.date.format("%Y-%m-%d"), event.message(None));
            }
        }
        Commands::Streaks => {
            let history = storage.load_history().await?;
            let plans = storage.list_plans().await?;
            let settings = storage.load_settings().await?.unwrap_or_default();

            println!("Streaks ({})", history.len());
            for (id, entry) in &history {
                println!(
                    "  {} | {} in a row | last pain {}",
                    id, entry.consecutive_completions, entry.last_pain
                );
            }

            let recs = recommendations(
                &history,
                plans.iter().flat_map(|p| &p.exercises),
                &settings.progression,
            );
            for rec in recs {
                println!("  -> {} ({}%)", rec.message, rec.progress);
            }
        }
        Commands::Stats { year, month } => {
            let now = chrono::Utc::now();
            let (year, month) = (year.unwrap_or(now.year()), month.unwrap_or(now.month()));
            let workouts = storage.list_workouts().await?;
            let settings = storage.load_settings().await?.unwrap_or_default();
            let stats = monthly_stats(&workouts, year, month);

            println!("Stats {}-{:02}", year, month);
            println!("  Days: {} (goal {}, {}%)", stats.total, settings.monthly_goal, stats.goal_progress(settings.monthly_goal));
            for status in WorkoutStatus::ALL {
                println!("  {}: {}", status, stats.count(status));
            }
            println!("  Completion rate: {}%", stats.completion_rate());
            println!("  Avg pain: back {:.1}, knees {:.1}", stats.avg_back_pain, stats.avg_knee_pain);
            println!(
                "  Duration: {} total, {} avg",
                format_duration(stats.total_duration),
                format_duration(stats.avg_duration)
            );
            for week in &stats.weeks {
                println!(
                    "  Week {}: {} complete, {} adapted, {} skipped",
                    week.week, week.complete, week.adapted, week.skipped
                );
            }
        }
        Commands::Records => {
            let records = personal_records(&storage.list_workouts().await?);
            println!("Records ({})", records.len());
            for (id, record) in &records {
                println!(
                    "  {} | {} | {} {} | {} | {}",
                    id,
                    record.name,
                    record.max_reps,
                    record.kind.unit(),
                    record.weight,
                    record.date.format("%Y-%m-%d"),
                );
            }
        }
        Commands::Export { out } => {
            let json = StateBundle::export(&storage).await?.to_json()?;
            match out {
                Some(path) => {
                    tokio::fs::write(&path, json).await?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        Commands::Import { file } => {
            let json = tokio::fs::read_to_string(&file).await?;
            StateBundle::from_json(&json)?.import_into(&mut storage).await?;
            println!("Imported {}", file.display());
        }
        Commands::Clear => {
            storage.clear_all().await?;
            println!("Cleared {}", cli.data_dir.display());
        }
        Commands::Settings => {
            let settings = storage.load_settings().await?.unwrap_or_default();
            let rules = settings.progression;
            println!("Settings");
            println!("  Theme: {}", settings.theme);
            println!("  Language: {}", settings.language);
            println!("  Notifications: {} at {}", settings.notifications, settings.reminder_time);
            println!("  Monthly goal: {}", settings.monthly_goal);
            println!(
                "  Progression: pain <= {}, {} in a row, +{} reps, +{} s",
                rules.pain_threshold, rules.required_streak, rules.dynamic_increment, rules.static_increment
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use reptrack_core::{default_plans, ExerciseId};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_result() {
        assert_eq!(
            parse_result("d1e1=adapted:8").unwrap(),
            ResultArg { exercise: "d1e1".into(), status: ExerciseStatus::Adapted, reps: Some(8) }
        );
        assert_eq!(parse_result("d2e4=Skipped").unwrap().reps, None);
        assert!(parse_result("d1e1").is_err());
        assert!(parse_result("=complete").is_err());
        assert!(parse_result("d1e1=done").is_err());
        assert!(parse_result("d1e1=complete:x").is_err());
    }

    #[test]
    fn test_pain_out_of_range_rejected() {
        let args = ["reptrack", "finish", "--plan", "day1", "--back-pain", "11", "--knee-pain", "0"];
        assert!(Cli::try_parse_from(args).is_err());
        let args = ["reptrack", "finish", "--plan", "day1", "--back-pain", "10", "--knee-pain", "0"];
        assert!(Cli::try_parse_from(args).is_ok());
    }

    #[test]
    fn test_build_outcomes() {
        let day1 = default_plans().into_iter().next().unwrap();
        let results = vec![parse_result("d1e2=adapted:8").unwrap(), parse_result("d1e3=skipped").unwrap()];

        // only listed exercises are recorded
        let outcomes = build_outcomes(&day1, &results, false).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].exercise_id, ExerciseId::new("d1e2"));
        assert_eq!(outcomes[0].actual_reps, 8);
        assert_eq!(outcomes[1].status, ExerciseStatus::Skipped);
        assert_eq!(outcomes[1].actual_reps, 0);

        let outcomes = build_outcomes(&day1, &results, true).unwrap();
        assert_eq!(outcomes.len(), day1.exercises.len());
        assert_eq!(outcomes[0].status, ExerciseStatus::Complete);
        assert_eq!(outcomes[1].actual_reps, 8);
        assert_eq!(outcomes[2].status, ExerciseStatus::Skipped);

        // base ids address the lite variant
        let lite = day1.lite_variant();
        let outcomes = build_outcomes(&lite, &results, false).unwrap();
        assert_eq!(outcomes[0].exercise_id, ExerciseId::new("d1e2_lite"));
        assert_eq!(outcomes[0].status, ExerciseStatus::Adapted);

        assert!(build_outcomes(&day1, &[parse_result("d9e9=complete").unwrap()], false).is_err());
        assert!(build_outcomes(&day1, &[], false).unwrap().is_empty());
    }
}
