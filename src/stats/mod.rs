//! Habit statistics.
//!
//! - [`engine`]: per-habit streaks and completion percentage
//! - [`report`]: leaders across all active habits
//! - [`watch`]: recompute when the ledger changes
//! - [`visualization`]: calendar grid and progress bars

pub mod engine;
pub mod report;
pub mod visualization;
pub mod watch;

pub use engine::{active_day_count, compute_statistics, HabitStatistics};
pub use report::{
    habit_statistics, load_habit_statistics, summarize, AggregateReporter, AllHabitsStatistics,
    Leader,
};
pub use watch::StatsWatcher;
