//! Output formatting for habitflow.
//!
//! This module provides formatters for displaying habits and statistics in
//! various formats.

mod json;
mod pretty;

use chrono::NaiveDate;

use crate::cli::args::OutputFormat;
use crate::core::{CompletionRecord, DateRange, Habit, HabitWithStatus};
use crate::error::HabitError;
use crate::stats::{AllHabitsStatistics, HabitStatistics};

pub use json::*;
pub use pretty::*;

/// Format habits with their status for `date`
///
/// # Errors
///
/// Returns `HabitError::Json` if JSON serialization fails.
pub fn format_habits(
    habits: &[HabitWithStatus],
    title: &str,
    date: NaiveDate,
    format: OutputFormat,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_habits_pretty(habits, title)),
        OutputFormat::Json => format_habits_json(habits, date),
    }
}

/// Format a habit with its statistics
///
/// # Errors
///
/// Returns `HabitError::Json` if JSON serialization fails.
pub fn format_habit(
    habit: &Habit,
    stats: &HabitStatistics,
    format: OutputFormat,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_habit_pretty(habit, stats)),
        OutputFormat::Json => format_habit_json(habit, stats),
    }
}

/// Format only the statistics of a habit
///
/// # Errors
///
/// Returns `HabitError::Json` if JSON serialization fails.
pub fn format_habit_stats(
    habit: &Habit,
    stats: &HabitStatistics,
    format: OutputFormat,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_habit_stats_pretty(habit, stats)),
        OutputFormat::Json => format_habit_json(habit, stats),
    }
}

/// Format one update of `stats watch`
///
/// # Errors
///
/// Returns `HabitError::Json` if JSON serialization fails.
pub fn format_stats_update(
    today: NaiveDate,
    stats: &HabitStatistics,
    format: OutputFormat,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_stats_line_pretty(today, stats)),
        // One compact object per line so the stream can be piped
        OutputFormat::Json => Ok(serde_json::to_string(&serde_json::json!({
            "date": today,
            "statistics": stats
        }))?),
    }
}

/// Format the leaders across all habits
///
/// # Errors
///
/// Returns `HabitError::Json` if JSON serialization fails.
pub fn format_summary(
    summary: Option<&AllHabitsStatistics>,
    format: OutputFormat,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_summary_pretty(summary)),
        OutputFormat::Json => format_summary_json(summary),
    }
}

/// Format the result of a toggle
///
/// # Errors
///
/// Returns `HabitError::Json` if JSON serialization fails.
pub fn format_toggle(
    habit: &Habit,
    record: &CompletionRecord,
    format: OutputFormat,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_toggle_pretty(habit, record)),
        OutputFormat::Json => to_json(record),
    }
}

/// Format a month of completions
///
/// # Errors
///
/// Returns `HabitError::Json` if JSON serialization fails.
pub fn format_calendar(
    habit: &Habit,
    records: &[CompletionRecord],
    month: DateRange,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_calendar_pretty(habit, records, month, today)),
        OutputFormat::Json => format_calendar_json(habit, records, month),
    }
}
