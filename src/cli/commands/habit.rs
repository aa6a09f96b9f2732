//! Habit management commands.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde_json::json;

use super::{resolve_date, resolve_time};
use crate::cli::args::{AddArgs, EditArgs, OutputFormat};
use crate::config::HabitDefaults;
use crate::core::{CompletionLedger, HabitId, HabitRepository, HabitUpdate, HabitWithStatus, NewHabit};
use crate::error::HabitError;
use crate::output::{format_habit, format_habits, to_json};
use crate::stats::load_habit_statistics;

/// Execute add command
///
/// # Errors
///
/// Returns an error if an argument cannot be parsed or the habit is invalid.
pub fn add<H>(
    habits: &H,
    args: AddArgs,
    defaults: &HabitDefaults,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, HabitError>
where
    H: HabitRepository + ?Sized,
{
    let start = args
        .start
        .as_deref()
        .map_or(Ok(today), |s| resolve_date(s, today))?;

    let mut new = NewHabit::new(args.title, start).with_recurrence(args.repeat);
    new.description = args.description;
    new.color = args.color.unwrap_or_else(|| defaults.default_color.clone());
    new.target = args.target;
    new.reminder = args.reminder.as_deref().map(resolve_time).transpose()?;

    let habit = habits.add(new)?;

    match format {
        OutputFormat::Json => to_json(&habit),
        OutputFormat::Pretty => Ok(format!(
            "Created habit: {} (ID: {}, {})",
            habit.title,
            habit.id,
            habit.recurrence.display_name()
        )),
    }
}

/// Execute list command
///
/// # Errors
///
/// Returns an error if storage access or output formatting fails.
pub fn list<H, L>(
    habits: &H,
    ledger: &L,
    archived: bool,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, HabitError>
where
    H: HabitRepository + ?Sized,
    L: CompletionLedger + ?Sized,
{
    let (items, title) = if archived {
        (habits.archived_habits()?, "Archived".to_string())
    } else {
        (habits.active_habits()?, format!("Today, {}", today.format("%a %b %-d")))
    };

    let done: HashSet<HabitId> = ledger
        .records_on(today)?
        .into_iter()
        .filter(|r| r.is_done)
        .map(|r| r.habit_id)
        .collect();

    let items: Vec<HabitWithStatus> = items
        .into_iter()
        .map(|habit| HabitWithStatus {
            done: done.contains(&habit.id),
            habit,
        })
        .collect();

    format_habits(&items, &title, today, format)
}

/// Execute show command
///
/// # Errors
///
/// Returns `HabitError::NotFound` if the habit does not exist.
pub fn show<H, L>(
    habits: &H,
    ledger: &L,
    id: i64,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, HabitError>
where
    H: HabitRepository + ?Sized,
    L: CompletionLedger + ?Sized,
{
    let (habit, stats) = load_habit_statistics(habits, ledger, HabitId(id), today)?;
    format_habit(&habit, &stats, format)
}

/// Execute edit command
///
/// # Errors
///
/// Returns an error if nothing would change, an argument is invalid, or the
/// habit does not exist.
pub fn edit<H>(habits: &H, args: EditArgs, format: OutputFormat) -> Result<String, HabitError>
where
    H: HabitRepository + ?Sized,
{
    let update = HabitUpdate {
        title: args.title,
        description: if args.no_description {
            Some(None)
        } else {
            args.description.map(Some)
        },
        color: args.color,
        target: if args.no_target {
            Some(None)
        } else {
            args.target.map(Some)
        },
        recurrence: args.repeat,
        reminder: if args.no_reminder {
            Some(None)
        } else {
            args.reminder.as_deref().map(resolve_time).transpose()?.map(Some)
        },
    };

    if update.is_empty() {
        return Err(HabitError::invalid("nothing to change; pass at least one option"));
    }

    let habit = habits.update(HabitId(args.id), update)?;

    match format {
        OutputFormat::Json => to_json(&habit),
        OutputFormat::Pretty => Ok(format!("Updated habit: {} (ID: {})", habit.title, habit.id)),
    }
}

/// Execute archive command
///
/// # Errors
///
/// Returns `HabitError::NotFound` if the habit does not exist.
pub fn archive<H>(habits: &H, id: i64, format: OutputFormat) -> Result<String, HabitError>
where
    H: HabitRepository + ?Sized,
{
    habits.archive(HabitId(id))?;
    match format {
        OutputFormat::Json => to_json(&json!({ "id": id, "archived": true })),
        OutputFormat::Pretty => Ok(format!("Archived habit: {id}")),
    }
}

/// Execute restore command
///
/// # Errors
///
/// Returns `HabitError::NotFound` if the habit does not exist.
pub fn restore<H>(habits: &H, id: i64, format: OutputFormat) -> Result<String, HabitError>
where
    H: HabitRepository + ?Sized,
{
    habits.restore(HabitId(id))?;
    match format {
        OutputFormat::Json => to_json(&json!({ "id": id, "archived": false })),
        OutputFormat::Pretty => Ok(format!("Restored habit: {id}")),
    }
}

/// Execute delete command
///
/// # Errors
///
/// Returns `HabitError::NotFound` if the habit does not exist.
pub fn delete<H>(habits: &H, id: i64, format: OutputFormat) -> Result<String, HabitError>
where
    H: HabitRepository + ?Sized,
{
    habits.delete(HabitId(id))?;
    match format {
        OutputFormat::Json => to_json(&json!({ "id": id, "deleted": true })),
        OutputFormat::Pretty => Ok(format!("Deleted habit {id} and its history")),
    }
}
