//! Completion ledger storage.
//!
//! One row per `(habit_id, date)`. The toggle is a single upsert statement,
//! so two connections toggling the same key are serialised by SQLite and
//! every flip is applied.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};

use super::habits::parse_stored_date;
use super::Database;
use crate::core::{CompletionLedger, CompletionRecord, DateRange, HabitId};
use crate::error::HabitError;

/// Storage for completion records.
pub struct LedgerStore<'a> {
    db: &'a Database,
}

impl<'a> LedgerStore<'a> {
    /// Create storage on top of an open database.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn habit_start_date(&self, habit_id: HabitId) -> Result<Option<NaiveDate>, HabitError> {
        let start: Option<String> = self
            .db
            .connection()
            .query_row(
                "SELECT start_date FROM habits WHERE id = ?1",
                [habit_id.0],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| HabitError::Database(format!("Failed to query habit: {e}")))?;

        start.as_deref().map(parse_stored_date).transpose()
    }

    fn collect(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<CompletionRecord>, HabitError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| HabitError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(params, row_to_raw)
            .map_err(|e| HabitError::Database(format!("Failed to query completions: {e}")))?;

        let mut records = Vec::new();
        for row in rows {
            let (habit_id, date, is_done) = row?;
            records.push(CompletionRecord {
                habit_id: HabitId(habit_id),
                date: parse_stored_date(&date)?,
                is_done,
            });
        }

        Ok(records)
    }
}

impl CompletionLedger for LedgerStore<'_> {
    fn toggle(
        &self,
        habit_id: HabitId,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<CompletionRecord, HabitError> {
        if date > today {
            return Err(HabitError::invalid(format!(
                "cannot mark {date} as done: it is in the future"
            )));
        }

        let start = self
            .habit_start_date(habit_id)?
            .ok_or_else(|| HabitError::habit_not_found(habit_id))?;
        if date < start {
            return Err(HabitError::invalid(format!(
                "cannot mark {date} as done: habit {habit_id} starts on {start}"
            )));
        }

        let is_done: bool = self
            .db
            .connection()
            .query_row(
                r"INSERT INTO completions (habit_id, date, is_done) VALUES (?1, ?2, 1)
                  ON CONFLICT (habit_id, date) DO UPDATE SET is_done = NOT is_done
                  RETURNING is_done",
                params![habit_id.0, date.to_string()],
                |row| row.get(0),
            )
            .map_err(|e| HabitError::Database(format!("Failed to toggle completion: {e}")))?;

        tracing::info!(habit_id = %habit_id, %date, is_done, "completion toggled");

        Ok(CompletionRecord {
            habit_id,
            date,
            is_done,
        })
    }

    fn records_in_range(
        &self,
        habit_id: HabitId,
        range: DateRange,
    ) -> Result<Vec<CompletionRecord>, HabitError> {
        self.collect(
            r"SELECT habit_id, date, is_done FROM completions
              WHERE habit_id = ?1 AND date BETWEEN ?2 AND ?3
              ORDER BY date",
            params![habit_id.0, range.start.to_string(), range.end.to_string()],
        )
    }

    fn records_on(&self, date: NaiveDate) -> Result<Vec<CompletionRecord>, HabitError> {
        self.collect(
            r"SELECT habit_id, date, is_done FROM completions
              WHERE date = ?1
              ORDER BY habit_id",
            [date.to_string()],
        )
    }

    fn revision(&self) -> Result<u64, HabitError> {
        let revision: i64 = self
            .db
            .connection()
            .query_row("SELECT revision FROM ledger_meta WHERE id = 1", [], |row| {
                row.get(0)
            })
            .map_err(|e| HabitError::Database(format!("Failed to read revision: {e}")))?;

        u64::try_from(revision)
            .map_err(|_| HabitError::Database(format!("Negative revision {revision}")))
    }
}

fn row_to_raw(row: &Row<'_>) -> Result<(i64, String, bool), rusqlite::Error> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}
