//! Marking habits done and viewing completion history.

use chrono::{Datelike, NaiveDate};

use super::{resolve_date, resolve_month};
use crate::cli::args::OutputFormat;
use crate::core::{CompletionLedger, DateRange, HabitId, HabitRepository};
use crate::error::HabitError;
use crate::output::{format_calendar, format_toggle};

/// Execute toggle command
///
/// # Errors
///
/// Returns an error if the date cannot be parsed, lies in the future or
/// before the habit's start, or the habit does not exist.
pub fn toggle<H, L>(
    habits: &H,
    ledger: &L,
    id: i64,
    date: &str,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, HabitError>
where
    H: HabitRepository + ?Sized,
    L: CompletionLedger + ?Sized,
{
    let id = HabitId(id);
    let date = resolve_date(date, today)?;

    let record = ledger.toggle(id, date, today)?;
    let habit = habits.habit(id)?.ok_or_else(|| HabitError::habit_not_found(id))?;

    format_toggle(&habit, &record, format)
}

/// Execute calendar command
///
/// # Errors
///
/// Returns an error if the month cannot be parsed or the habit does not exist.
pub fn calendar<H, L>(
    habits: &H,
    ledger: &L,
    id: i64,
    month: Option<&str>,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, HabitError>
where
    H: HabitRepository + ?Sized,
    L: CompletionLedger + ?Sized,
{
    let id = HabitId(id);
    let (year, month) = month.map_or(Ok((today.year(), today.month())), resolve_month)?;
    let range = DateRange::month(year, month)?;

    let habit = habits.habit(id)?.ok_or_else(|| HabitError::habit_not_found(id))?;
    let records = ledger.records_in_range(id, range)?;

    format_calendar(&habit, &records, range, today, format)
}
