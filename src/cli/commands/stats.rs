//! Statistics command implementation.
//!
//! Handles the stats subcommands for streak and completion analytics.

use std::io::Write;
use std::time::Duration;

use chrono::NaiveDate;

use crate::cli::args::{OutputFormat, StatsCommands};
use crate::core::{Clock, CompletionLedger, HabitId, HabitRepository};
use crate::error::HabitError;
use crate::output::{format_habit_stats, format_stats_update, format_summary};
use crate::stats::{load_habit_statistics, AggregateReporter, StatsWatcher};

/// Execute the one-shot stats subcommands.
///
/// `watch` streams its output and is handled by [`watch`].
///
/// # Errors
///
/// Returns an error if storage access fails or a habit does not exist.
pub fn stats<H, L>(
    habits: &H,
    ledger: &L,
    cmd: Option<&StatsCommands>,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, HabitError>
where
    H: HabitRepository + ?Sized,
    L: CompletionLedger + ?Sized,
{
    match cmd {
        None | Some(StatsCommands::Summary) => {
            let summary = AggregateReporter::new(habits, ledger).report(today)?;
            format_summary(summary.as_ref(), format)
        }
        Some(StatsCommands::Habit { id }) => {
            let (habit, stats) = load_habit_statistics(habits, ledger, HabitId(*id), today)?;
            format_habit_stats(&habit, &stats, format)
        }
        Some(StatsCommands::Watch { .. }) => Err(HabitError::invalid(
            "stats watch streams its output and cannot be rendered once",
        )),
    }
}

/// Print a habit's statistics every time they change.
///
/// Polls every `interval`; stops after `count` updates when given, otherwise
/// runs until the habit is deleted or an error occurs.
///
/// # Errors
///
/// Returns `HabitError::NotFound` once the habit is gone, or any storage or
/// write failure.
#[allow(clippy::too_many_arguments)]
pub fn watch<H, L, C, W>(
    habits: &H,
    ledger: &L,
    clock: &C,
    id: i64,
    interval: Duration,
    count: Option<usize>,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), HabitError>
where
    H: HabitRepository + ?Sized,
    L: CompletionLedger + ?Sized,
    C: Clock + ?Sized,
    W: Write,
{
    let mut watcher = StatsWatcher::new(habits, ledger, HabitId(id));
    let mut emitted = 0;

    tracing::info!(habit_id = id, interval_ms = interval.as_millis(), "watching statistics");

    loop {
        let today = clock.today();
        if let Some(stats) = watcher.poll(today)? {
            writeln!(out, "{}", format_stats_update(today, &stats, format)?)?;
            out.flush()?;
            emitted += 1;

            if count.is_some_and(|n| emitted >= n) {
                return Ok(());
            }
        }
        std::thread::sleep(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FixedClock, NewHabit};
    use crate::storage::{Database, HabitStore, LedgerStore};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_summary_without_habits() {
        let db = Database::open_in_memory().unwrap();
        let output = stats(
            &HabitStore::new(&db),
            &LedgerStore::new(&db),
            None,
            date(2024, 1, 19),
            OutputFormat::Json,
        )
        .unwrap();
        assert_eq!(output, "null");
    }

    #[test]
    fn test_summary_picks_leader() {
        let db = Database::open_in_memory().unwrap();
        let habits = HabitStore::new(&db);
        let ledger = LedgerStore::new(&db);
        let today = date(2024, 1, 19);

        habits.add(NewHabit::new("Read", date(2024, 1, 1))).unwrap();
        let run = habits.add(NewHabit::new("Run", date(2024, 1, 1))).unwrap();
        for day in 17..=19 {
            ledger.toggle(run.id, date(2024, 1, day), today).unwrap();
        }

        let output = stats(&habits, &ledger, Some(&StatsCommands::Summary), today, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["best_streak"]["habit"]["title"], "Run");
        assert_eq!(value["current_streak"]["value"], 3);
        assert_eq!(value["active_habits"], 2);
    }

    #[test]
    fn test_habit_stats() {
        let db = Database::open_in_memory().unwrap();
        let habits = HabitStore::new(&db);
        let ledger = LedgerStore::new(&db);
        let today = date(2024, 1, 4);
        let habit = habits.add(NewHabit::new("Read", date(2024, 1, 1))).unwrap();
        ledger.toggle(habit.id, date(2024, 1, 3), today).unwrap();
        ledger.toggle(habit.id, today, today).unwrap();

        let cmd = StatsCommands::Habit { id: habit.id.0 };
        let output = stats(&habits, &ledger, Some(&cmd), today, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["statistics"]["current_streak"], 2);
        assert_eq!(value["statistics"]["percent_completion"], 0.5);
    }

    #[test]
    fn test_watch_emits_first_update() {
        let db = Database::open_in_memory().unwrap();
        let habits = HabitStore::new(&db);
        let ledger = LedgerStore::new(&db);
        let today = date(2024, 1, 19);
        let habit = habits.add(NewHabit::new("Read", date(2024, 1, 1))).unwrap();
        ledger.toggle(habit.id, today, today).unwrap();

        let mut out = Vec::new();
        watch(
            &habits,
            &ledger,
            &FixedClock(today),
            habit.id.0,
            Duration::from_millis(1),
            Some(1),
            OutputFormat::Json,
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(value["date"], "2024-01-19");
        assert_eq!(value["statistics"]["current_streak"], 1);
    }

    #[test]
    fn test_watch_missing_habit() {
        let db = Database::open_in_memory().unwrap();
        let mut out = Vec::new();
        let err = watch(
            &HabitStore::new(&db),
            &LedgerStore::new(&db),
            &FixedClock(date(2024, 1, 19)),
            9,
            Duration::from_millis(1),
            None,
            OutputFormat::Pretty,
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(err, HabitError::NotFound(_)));
        assert!(out.is_empty());
    }
}
