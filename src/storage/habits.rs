//! Habit storage.
//!
//! Persists habit definitions to the local database.

use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, OptionalExtension, Row};

use super::Database;
use crate::core::{Habit, HabitId, HabitRepository, HabitUpdate, NewHabit, Recurrence};
use crate::error::HabitError;

const SELECT_HABIT: &str = r"SELECT id, title, description, start_date, color, target, archived,
                                    repeat_kind, repeat_days, repeat_count, reminder
                             FROM habits";

/// Storage for habit definitions.
pub struct HabitStore<'a> {
    db: &'a Database,
}

impl<'a> HabitStore<'a> {
    /// Create storage on top of an open database.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn query_habits(&self, archived: bool) -> Result<Vec<Habit>, HabitError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(&format!("{SELECT_HABIT} WHERE archived = ?1 ORDER BY id"))
            .map_err(|e| HabitError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([archived], HabitRow::from_row)
            .map_err(|e| HabitError::Database(format!("Failed to query habits: {e}")))?;

        let mut habits = Vec::new();
        for row in rows {
            habits.push(row?.into_habit()?);
        }

        Ok(habits)
    }

    fn set_archived(&self, id: HabitId, archived: bool) -> Result<(), HabitError> {
        let rows = self
            .db
            .connection()
            .execute(
                "UPDATE habits SET archived = ?1 WHERE id = ?2",
                params![archived, id.0],
            )
            .map_err(|e| HabitError::Database(format!("Failed to update habit: {e}")))?;

        if rows == 0 {
            return Err(HabitError::habit_not_found(id));
        }
        tracing::info!(habit_id = %id, archived, "habit archive flag changed");
        Ok(())
    }
}

impl HabitRepository for HabitStore<'_> {
    fn active_habits(&self) -> Result<Vec<Habit>, HabitError> {
        self.query_habits(false)
    }

    fn archived_habits(&self) -> Result<Vec<Habit>, HabitError> {
        self.query_habits(true)
    }

    fn habit(&self, id: HabitId) -> Result<Option<Habit>, HabitError> {
        let conn = self.db.connection();

        let row = conn
            .query_row(
                &format!("{SELECT_HABIT} WHERE id = ?1"),
                [id.0],
                HabitRow::from_row,
            )
            .optional()
            .map_err(|e| HabitError::Database(format!("Failed to query habit: {e}")))?;

        row.map(HabitRow::into_habit).transpose()
    }

    fn add(&self, habit: NewHabit) -> Result<Habit, HabitError> {
        let habit = habit.validate()?;
        let conn = self.db.connection();
        let (kind, days, count) = habit.recurrence.to_columns();

        conn.execute(
            r"INSERT INTO habits
              (title, description, start_date, color, target, archived,
               repeat_kind, repeat_days, repeat_count, reminder)
              VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?7, ?8, ?9)",
            params![
                habit.title,
                habit.description,
                habit.start_date.to_string(),
                habit.color,
                habit.target,
                kind,
                days,
                count,
                habit.reminder.map(format_time),
            ],
        )
        .map_err(|e| HabitError::Database(format!("Failed to insert habit: {e}")))?;

        let id = HabitId(conn.last_insert_rowid());
        tracing::info!(habit_id = %id, title = %habit.title, recurrence = %habit.recurrence, "habit created");

        Ok(Habit {
            id,
            title: habit.title,
            description: habit.description,
            start_date: habit.start_date,
            color: habit.color,
            target: habit.target,
            archived: false,
            recurrence: habit.recurrence,
            reminder: habit.reminder,
        })
    }

    fn update(&self, id: HabitId, update: HabitUpdate) -> Result<Habit, HabitError> {
        let mut habit = self.habit(id)?.ok_or_else(|| HabitError::habit_not_found(id))?;
        if update.is_empty() {
            return Ok(habit);
        }
        update.apply(&mut habit)?;

        let (kind, days, count) = habit.recurrence.to_columns();
        self.db
            .connection()
            .execute(
                r"UPDATE habits SET
                  title = ?1,
                  description = ?2,
                  color = ?3,
                  target = ?4,
                  repeat_kind = ?5,
                  repeat_days = ?6,
                  repeat_count = ?7,
                  reminder = ?8
                  WHERE id = ?9",
                params![
                    habit.title,
                    habit.description,
                    habit.color,
                    habit.target,
                    kind,
                    days,
                    count,
                    habit.reminder.map(format_time),
                    id.0,
                ],
            )
            .map_err(|e| HabitError::Database(format!("Failed to update habit: {e}")))?;

        tracing::info!(habit_id = %id, "habit updated");
        Ok(habit)
    }

    fn archive(&self, id: HabitId) -> Result<(), HabitError> {
        self.set_archived(id, true)
    }

    fn restore(&self, id: HabitId) -> Result<(), HabitError> {
        self.set_archived(id, false)
    }

    fn delete(&self, id: HabitId) -> Result<(), HabitError> {
        let rows = self
            .db
            .connection()
            .execute("DELETE FROM habits WHERE id = ?1", [id.0])
            .map_err(|e| HabitError::Database(format!("Failed to delete habit: {e}")))?;

        if rows == 0 {
            return Err(HabitError::habit_not_found(id));
        }
        tracing::info!(habit_id = %id, "habit deleted");
        Ok(())
    }
}

/// Raw column values of a `habits` row, converted outside the rusqlite closure.
struct HabitRow {
    id: i64,
    title: String,
    description: Option<String>,
    start_date: String,
    color: String,
    target: Option<u32>,
    archived: bool,
    repeat_kind: String,
    repeat_days: Option<String>,
    repeat_count: Option<u32>,
    reminder: Option<String>,
}

impl HabitRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            start_date: row.get(3)?,
            color: row.get(4)?,
            target: row.get(5)?,
            archived: row.get(6)?,
            repeat_kind: row.get(7)?,
            repeat_days: row.get(8)?,
            repeat_count: row.get(9)?,
            reminder: row.get(10)?,
        })
    }

    fn into_habit(self) -> Result<Habit, HabitError> {
        let start_date = parse_stored_date(&self.start_date)?;
        let recurrence = Recurrence::from_columns(
            &self.repeat_kind,
            self.repeat_days.as_deref(),
            self.repeat_count,
        )?;
        let reminder = self
            .reminder
            .as_deref()
            .map(|s| {
                NaiveTime::parse_from_str(s, "%H:%M")
                    .map_err(|e| HabitError::Database(format!("Bad reminder time {s:?}: {e}")))
            })
            .transpose()?;

        Ok(Habit {
            id: HabitId(self.id),
            title: self.title,
            description: self.description,
            start_date,
            color: self.color,
            target: self.target,
            archived: self.archived,
            recurrence,
            reminder,
        })
    }
}

/// Parse a `YYYY-MM-DD` column value.
pub(super) fn parse_stored_date(s: &str) -> Result<NaiveDate, HabitError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| HabitError::Database(format!("Bad stored date {s:?}: {e}")))
}

fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}
