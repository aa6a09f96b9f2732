//! Persistence boundary.
//!
//! The statistics engine never talks to storage directly. The aggregate
//! reporter, the watcher, and the CLI reach habits and completion records
//! through these two traits; `crate::storage` provides the SQLite
//! implementations.

use chrono::NaiveDate;

use super::habit::{CompletionRecord, DateRange, Habit, HabitId, HabitUpdate, NewHabit};
use crate::error::HabitError;

/// Access to habit definitions.
#[cfg_attr(test, mockall::automock)]
pub trait HabitRepository {
    /// Snapshot of all non-archived habits, ordered by id.
    fn active_habits(&self) -> Result<Vec<Habit>, HabitError>;

    /// Snapshot of all archived habits, ordered by id.
    fn archived_habits(&self) -> Result<Vec<Habit>, HabitError>;

    /// Look up a habit by id.
    fn habit(&self, id: HabitId) -> Result<Option<Habit>, HabitError>;

    /// Validate and insert a new habit.
    fn add(&self, habit: NewHabit) -> Result<Habit, HabitError>;

    /// Apply a partial update. Fails with `NotFound` for unknown ids.
    fn update(&self, id: HabitId, update: HabitUpdate) -> Result<Habit, HabitError>;

    /// Hide a habit from active views without discarding its history.
    fn archive(&self, id: HabitId) -> Result<(), HabitError>;

    /// Bring an archived habit back.
    fn restore(&self, id: HabitId) -> Result<(), HabitError>;

    /// Remove a habit and, by cascade, all of its completion records.
    fn delete(&self, id: HabitId) -> Result<(), HabitError>;
}

/// The per-habit, per-date completion store.
#[cfg_attr(test, mockall::automock)]
pub trait CompletionLedger {
    /// Flip the completion state of `(habit_id, date)`.
    ///
    /// Creates a done record when none exists, otherwise flips `is_done`.
    /// Must be atomic per key. Dates after `today` and dates before the
    /// habit's start date are rejected with `InvalidArgument`; unknown habits
    /// with `NotFound`.
    fn toggle(
        &self,
        habit_id: HabitId,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<CompletionRecord, HabitError>;

    /// Records of one habit inside `range`, ordered by date.
    fn records_in_range(
        &self,
        habit_id: HabitId,
        range: DateRange,
    ) -> Result<Vec<CompletionRecord>, HabitError>;

    /// Records of every habit on a single date.
    fn records_on(&self, date: NaiveDate) -> Result<Vec<CompletionRecord>, HabitError>;

    /// Monotonic counter that advances on every change to habits or records.
    fn revision(&self) -> Result<u64, HabitError>;
}
