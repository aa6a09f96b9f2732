//! Habit statistics engine.
//!
//! Given a habit, its completion records, and "today", computes the current
//! streak, the best streak, and the completion percentage. Pure and
//! synchronous: no I/O, no hidden state, safe to call on every data change.
//!
//! Streak units depend on the recurrence rule:
//! - `Daily`: consecutive calendar days
//! - `WeeklyOnDays`: consecutive scheduled days (unscheduled days are skipped)
//! - `WeeklyCount`: consecutive ISO weeks meeting the weekly count

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{iso_week, CompletionRecord, Habit, Recurrence};

/// Derived statistics for one habit. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HabitStatistics {
    pub current_streak: u32,
    pub best_streak: u32,
    /// Fraction in `[0, 1]`.
    pub percent_completion: f64,
}

/// Compute statistics for `habit` as of `today`.
///
/// Records outside `[habit.start_date, today]` and records of other habits
/// are ignored.
#[must_use]
pub fn compute_statistics(
    habit: &Habit,
    records: &[CompletionRecord],
    today: NaiveDate,
) -> HabitStatistics {
    let active_days = active_day_count(habit, today);
    if active_days == 0 {
        return HabitStatistics::default();
    }

    let in_range: Vec<&CompletionRecord> = records
        .iter()
        .filter(|r| r.habit_id == habit.id && habit.start_date <= r.date && r.date <= today)
        .collect();

    let completed = in_range.iter().filter(|r| r.is_done).count();
    let percent_completion = (completed as f64 / f64::from(active_days)).min(1.0);

    let done: HashSet<NaiveDate> = in_range.iter().filter(|r| r.is_done).map(|r| r.date).collect();
    let earliest = in_range.iter().map(|r| r.date).min();

    let (current_streak, best_streak) = match habit.recurrence {
        Recurrence::Daily => (
            daily_current_streak(&done, today),
            earliest.map_or(0, |first| daily_best_streak(&done, first, today)),
        ),
        Recurrence::WeeklyOnDays { .. } => (
            weekdays_current_streak(&done, habit, today),
            earliest.map_or(0, |first| weekdays_best_streak(&done, habit, first, today)),
        ),
        Recurrence::WeeklyCount { count } => {
            let by_week = done_per_week(&in_range);
            (
                weekly_count_current_streak(&by_week, count, today),
                weekly_count_best_streak(&by_week, count),
            )
        }
    };

    HabitStatistics {
        current_streak,
        best_streak,
        percent_completion,
    }
}

/// Number of expected days between the habit's start date and `today`,
/// inclusive. This is the denominator of the completion percentage.
///
/// For `WeeklyCount` this is `weeks elapsed × count`, where weeks elapsed is
/// the number of ISO weeks from the start date's week through today's week.
#[must_use]
pub fn active_day_count(habit: &Habit, today: NaiveDate) -> u32 {
    let start = habit.start_date;
    if today < start {
        return 0;
    }

    match habit.recurrence {
        Recurrence::Daily => saturating_u32((today - start).num_days() + 1),
        Recurrence::WeeklyOnDays { .. } => {
            let count = start
                .iter_days()
                .take_while(|d| *d <= today)
                .filter(|d| habit.recurrence.is_expected_on(*d, start))
                .count();
            u32::try_from(count).unwrap_or(u32::MAX)
        }
        Recurrence::WeeklyCount { count } => weeks_elapsed(start, today).saturating_mul(count),
    }
}

/// Counted between the Mondays of both weeks, so it keeps growing across
/// ISO year boundaries where week numbers restart. Requires `start <= today`.
fn weeks_elapsed(start: NaiveDate, today: NaiveDate) -> u32 {
    if start.iso_week().year() != today.iso_week().year() {
        tracing::warn!(
            %start,
            %today,
            "weekly-count habit spans an ISO year boundary; streak weeks are grouped by week number"
        );
    }
    let from_monday = |d: NaiveDate| i64::from(d.weekday().num_days_from_monday());
    let days = (today - start).num_days() - from_monday(today) + from_monday(start);
    saturating_u32(days / 7 + 1)
}

fn saturating_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Walk back from today while each day is done.
fn daily_current_streak(done: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut date = Some(today);

    while let Some(d) = date.filter(|d| done.contains(d)) {
        streak += 1;
        date = d.pred_opt();
    }
    streak
}

/// Scan forward from the first recorded day; any day not done resets the run.
fn daily_best_streak(done: &HashSet<NaiveDate>, first: NaiveDate, today: NaiveDate) -> u32 {
    let mut best = 0;
    let mut current = 0;

    for date in first.iter_days().take_while(|d| *d <= today) {
        if done.contains(&date) {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}

/// Walk back from today over scheduled days only; stop at the first
/// scheduled day that is not done.
fn weekdays_current_streak(done: &HashSet<NaiveDate>, habit: &Habit, today: NaiveDate) -> u32 {
    let start = habit.start_date;
    let mut streak = 0;
    let mut date = Some(today);

    while let Some(d) = date.filter(|d| *d >= start) {
        if habit.recurrence.is_expected_on(d, start) {
            if !done.contains(&d) {
                break;
            }
            streak += 1;
        }
        date = d.pred_opt();
    }
    streak
}

/// Forward scan like [`daily_best_streak`], ignoring unscheduled days.
fn weekdays_best_streak(
    done: &HashSet<NaiveDate>,
    habit: &Habit,
    first: NaiveDate,
    today: NaiveDate,
) -> u32 {
    let mut best = 0;
    let mut current = 0;

    for date in first
        .iter_days()
        .take_while(|d| *d <= today)
        .filter(|d| habit.recurrence.is_expected_on(*d, habit.start_date))
    {
        if done.contains(&date) {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}

/// Done-record count per ISO week number. Weeks that only have not-done
/// records are present with a count of zero.
fn done_per_week(records: &[&CompletionRecord]) -> HashMap<u32, u32> {
    let mut by_week: HashMap<u32, u32> = HashMap::new();
    for record in records {
        let count = by_week.entry(iso_week(record.date)).or_default();
        if record.is_done {
            *count += 1;
        }
    }
    by_week
}

/// Walk back week by week from the current ISO week while each week meets
/// the required count.
fn weekly_count_current_streak(by_week: &HashMap<u32, u32>, required: u32, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut week = Some(iso_week(today));

    while let Some(w) = week.filter(|w| by_week.get(w).is_some_and(|&n| n >= required)) {
        streak += 1;
        week = w.checked_sub(1);
    }
    streak
}

/// Scan the weeks that have records in ascending week order. A week meeting
/// the count extends the run and a week below it resets it. Weeks without
/// any record are not visited.
fn weekly_count_best_streak(by_week: &HashMap<u32, u32>, required: u32) -> u32 {
    let mut weeks: Vec<(u32, u32)> = by_week.iter().map(|(&w, &n)| (w, n)).collect();
    weeks.sort_unstable_by_key(|&(week, _)| week);

    let mut best = 0;
    let mut current = 0;

    for (_, completed) in weeks {
        if completed >= required {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}
