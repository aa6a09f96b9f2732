//! Cross-habit statistics.

use chrono::NaiveDate;
use serde::Serialize;

use super::engine::{compute_statistics, HabitStatistics};
use crate::core::{CompletionLedger, CompletionRecord, DateRange, Habit, HabitId, HabitRepository};
use crate::error::HabitError;

/// The habit holding the top value of one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leader<T> {
    pub habit: Habit,
    pub value: T,
}

/// Leaders across all active habits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllHabitsStatistics {
    pub best_streak: Leader<u32>,
    pub current_streak: Leader<u32>,
    pub most_consistent: Leader<f64>,
    pub active_habits: usize,
}

/// Pick the leaders from per-habit statistics.
///
/// On ties the habit that comes first in `stats` wins. Returns `None` when
/// `stats` is empty.
#[must_use]
pub fn summarize(stats: &[(Habit, HabitStatistics)]) -> Option<AllHabitsStatistics> {
    Some(AllHabitsStatistics {
        best_streak: leader(stats, |s| s.best_streak)?,
        current_streak: leader(stats, |s| s.current_streak)?,
        most_consistent: leader(stats, |s| s.percent_completion)?,
        active_habits: stats.len(),
    })
}

fn leader<T, F>(stats: &[(Habit, HabitStatistics)], metric: F) -> Option<Leader<T>>
where
    T: PartialOrd + Copy,
    F: Fn(&HabitStatistics) -> T,
{
    let mut best: Option<(&Habit, T)> = None;

    for (habit, s) in stats {
        let value = metric(s);
        match best {
            Some((_, top)) if value <= top => {}
            _ => best = Some((habit, value)),
        }
    }

    best.map(|(habit, value)| Leader {
        habit: habit.clone(),
        value,
    })
}

/// Load the records relevant to `habit` as of `today` and run the engine.
///
/// A habit whose start date is after `today` has no relevant records and
/// gets zero statistics without touching the ledger.
///
/// # Errors
///
/// Propagates ledger failures.
pub fn habit_statistics<L>(ledger: &L, habit: &Habit, today: NaiveDate) -> Result<HabitStatistics, HabitError>
where
    L: CompletionLedger + ?Sized,
{
    let records = relevant_records(ledger, habit, today)?;
    Ok(compute_statistics(habit, &records, today))
}

fn relevant_records<L>(ledger: &L, habit: &Habit, today: NaiveDate) -> Result<Vec<CompletionRecord>, HabitError>
where
    L: CompletionLedger + ?Sized,
{
    if habit.start_date > today {
        return Ok(Vec::new());
    }
    ledger.records_in_range(habit.id, DateRange::new(habit.start_date, today)?)
}

/// Look up a habit by id and compute its statistics.
///
/// # Errors
///
/// Returns `HabitError::NotFound` if the habit does not exist.
pub fn load_habit_statistics<H, L>(
    habits: &H,
    ledger: &L,
    id: HabitId,
    today: NaiveDate,
) -> Result<(Habit, HabitStatistics), HabitError>
where
    H: HabitRepository + ?Sized,
    L: CompletionLedger + ?Sized,
{
    let habit = habits.habit(id)?.ok_or_else(|| HabitError::habit_not_found(id))?;
    let stats = habit_statistics(ledger, &habit, today)?;
    Ok((habit, stats))
}

/// Computes [`AllHabitsStatistics`] from a snapshot of the active habits.
pub struct AggregateReporter<'a, H: ?Sized, L: ?Sized> {
    habits: &'a H,
    ledger: &'a L,
}

impl<'a, H, L> AggregateReporter<'a, H, L>
where
    H: HabitRepository + ?Sized,
    L: CompletionLedger + ?Sized,
{
    #[must_use]
    pub const fn new(habits: &'a H, ledger: &'a L) -> Self {
        Self { habits, ledger }
    }

    /// Statistics of every active habit, in repository order.
    ///
    /// # Errors
    ///
    /// Propagates repository and ledger failures.
    pub fn per_habit(&self, today: NaiveDate) -> Result<Vec<(Habit, HabitStatistics)>, HabitError> {
        self.habits
            .active_habits()?
            .into_iter()
            .map(|habit| {
                let stats = habit_statistics(self.ledger, &habit, today)?;
                Ok((habit, stats))
            })
            .collect()
    }

    /// Leaders across all active habits, or `None` when there are none.
    ///
    /// # Errors
    ///
    /// Propagates repository and ledger failures.
    pub fn report(&self, today: NaiveDate) -> Result<Option<AllHabitsStatistics>, HabitError> {
        let per_habit = self.per_habit(today)?;
        let summary = summarize(&per_habit);

        tracing::debug!(%today, habits = per_habit.len(), "aggregate statistics computed");
        Ok(summary)
    }
}
