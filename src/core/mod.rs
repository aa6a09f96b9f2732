//! Core domain model for habitflow.
//!
//! Habits, recurrence rules, completion records, the clock abstraction, and
//! the persistence traits the statistics layer depends on.

mod clock;
mod datetime;
mod habit;
pub mod recurrence;
mod traits;

pub use clock::{Clock, FixedClock, SystemClock};
pub use datetime::{parse_date, parse_month, parse_time, parse_weekday};
pub use habit::{
    CompletionRecord, DateRange, Habit, HabitId, HabitUpdate, HabitWithStatus, NewHabit,
    DEFAULT_COLOR,
};
pub use recurrence::{iso_week, Recurrence, RecurrenceKind, WeekdaySet, WEEKDAYS};
pub use traits::{CompletionLedger, HabitRepository};

#[cfg(test)]
pub use traits::{MockCompletionLedger, MockHabitRepository};
