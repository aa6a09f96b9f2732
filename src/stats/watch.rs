//! Recompute a habit's statistics when its data changes.
//!
//! The ledger exposes a revision counter that advances on every write to
//! habits or completion records. The watcher remembers the revision and the
//! day it last computed for and recomputes only when either moves.

use chrono::NaiveDate;

use super::engine::HabitStatistics;
use super::report::load_habit_statistics;
use crate::core::{CompletionLedger, HabitId, HabitRepository};
use crate::error::HabitError;

pub struct StatsWatcher<'a, H: ?Sized, L: ?Sized> {
    habits: &'a H,
    ledger: &'a L,
    habit_id: HabitId,
    seen: Option<(u64, NaiveDate)>,
}

impl<'a, H, L> StatsWatcher<'a, H, L>
where
    H: HabitRepository + ?Sized,
    L: CompletionLedger + ?Sized,
{
    #[must_use]
    pub const fn new(habits: &'a H, ledger: &'a L, habit_id: HabitId) -> Self {
        Self {
            habits,
            ledger,
            habit_id,
            seen: None,
        }
    }

    /// Returns fresh statistics if anything changed since the last poll.
    ///
    /// The first poll always computes.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::NotFound` once the habit has been deleted, and
    /// propagates storage failures.
    pub fn poll(&mut self, today: NaiveDate) -> Result<Option<HabitStatistics>, HabitError> {
        let revision = self.ledger.revision()?;
        if self.seen == Some((revision, today)) {
            return Ok(None);
        }

        let (_, stats) = load_habit_statistics(self.habits, self.ledger, self.habit_id, today)?;
        tracing::debug!(habit_id = %self.habit_id, revision, %today, "statistics recomputed");

        self.seen = Some((revision, today));
        Ok(Some(stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CompletionLedger, HabitRepository, NewHabit};
    use crate::storage::{Database, HabitStore, LedgerStore};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_poll_computes_then_waits_for_change() {
        let db = Database::open_in_memory().unwrap();
        let habits = HabitStore::new(&db);
        let ledger = LedgerStore::new(&db);
        let today = date(2024, 1, 19);
        let id = habits.add(NewHabit::new("Read", date(2024, 1, 1))).unwrap().id;

        let mut watcher = StatsWatcher::new(&habits, &ledger, id);
        assert_eq!(watcher.poll(today).unwrap(), Some(HabitStatistics::default()));
        assert_eq!(watcher.poll(today).unwrap(), None);

        ledger.toggle(id, today, today).unwrap();
        let stats = watcher.poll(today).unwrap().unwrap();
        assert_eq!(stats.current_streak, 1);
        assert_eq!(watcher.poll(today).unwrap(), None);
    }

    #[test]
    fn test_day_change_triggers_recompute() {
        let db = Database::open_in_memory().unwrap();
        let habits = HabitStore::new(&db);
        let ledger = LedgerStore::new(&db);
        let id = habits.add(NewHabit::new("Read", date(2024, 1, 1))).unwrap().id;
        ledger.toggle(id, date(2024, 1, 19), date(2024, 1, 19)).unwrap();

        let mut watcher = StatsWatcher::new(&habits, &ledger, id);
        assert_eq!(watcher.poll(date(2024, 1, 19)).unwrap().unwrap().current_streak, 1);

        // Nothing written, but yesterday's streak no longer reaches today
        let next = watcher.poll(date(2024, 1, 20)).unwrap().unwrap();
        assert_eq!(next.current_streak, 0);
        assert_eq!(next.best_streak, 1);
    }

    #[test]
    fn test_deleted_habit_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        let habits = HabitStore::new(&db);
        let ledger = LedgerStore::new(&db);
        let today = date(2024, 1, 19);
        let id = habits.add(NewHabit::new("Read", date(2024, 1, 1))).unwrap().id;

        let mut watcher = StatsWatcher::new(&habits, &ledger, id);
        watcher.poll(today).unwrap();

        habits.delete(id).unwrap();
        assert!(matches!(watcher.poll(today), Err(HabitError::NotFound(_))));
    }

    #[test]
    fn test_unrelated_write_recomputes_same_value() {
        let db = Database::open_in_memory().unwrap();
        let habits = HabitStore::new(&db);
        let ledger = LedgerStore::new(&db);
        let today = date(2024, 1, 19);
        let id = habits.add(NewHabit::new("Read", date(2024, 1, 1))).unwrap().id;

        let mut watcher = StatsWatcher::new(&habits, &ledger, id);
        let first = watcher.poll(today).unwrap();

        habits.add(NewHabit::new("Other", date(2024, 1, 1))).unwrap();
        assert_eq!(watcher.poll(today).unwrap(), first);
    }
}
