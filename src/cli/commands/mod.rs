//! Command implementations for habitflow.
//!
//! Commands take the storage traits rather than concrete stores and return
//! the text to print.

mod completions;
mod habit;
mod stats;
mod toggle;

pub use completions::completions;
pub use habit::{add, archive, delete, edit, list, restore, show};
pub use stats::{stats, watch};
pub use toggle::{calendar, toggle};

use chrono::{NaiveDate, NaiveTime};

use crate::core::{parse_date, parse_month, parse_time};
use crate::error::HabitError;

/// Resolve a user-supplied date expression against `today`.
///
/// # Errors
///
/// Returns `HabitError::Parse` if the expression is not recognized.
pub fn resolve_date(input: &str, today: NaiveDate) -> Result<NaiveDate, HabitError> {
    parse_date(input, today).ok_or_else(|| {
        HabitError::Parse(format!(
            "Unrecognized date: {input:?} (try today, yesterday, \"3 days ago\", friday, or YYYY-MM-DD)"
        ))
    })
}

fn resolve_time(input: &str) -> Result<NaiveTime, HabitError> {
    parse_time(input)
        .ok_or_else(|| HabitError::Parse(format!("Unrecognized time: {input:?} (try 07:30 or 7am)")))
}

fn resolve_month(input: &str) -> Result<(i32, u32), HabitError> {
    parse_month(input)
        .ok_or_else(|| HabitError::Parse(format!("Unrecognized month: {input:?} (use YYYY-MM)")))
}
