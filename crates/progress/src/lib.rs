//! Progression Tracking
//!
//! Exercise completion streaks, the progression decision rule, session
//! aggregation, and the derived views (statistics, records, hints, reports).

#![warn(missing_docs)]

pub mod error;
pub mod tracker;
pub mod engine;
pub mod session;
pub mod stats;
pub mod records;
pub mod recommend;
pub mod report;

pub use error::{ProgressError, Result};
pub use tracker::ExerciseHistoryTracker;
pub use engine::{DecisionRecord, HoldReason, Progression, ProgressionDecision, ProgressionEngine};
pub use session::{overall_status, SessionAggregator, SessionInput, SessionSummary};
pub use stats::{monthly_stats, MonthlyStats, PainPoint, WeekStats, WorkoutStats};
pub use records::{personal_records, PersonalRecord};
pub use recommend::{recommendations, Recommendation};
pub use report::{format_duration, report_text};
