//! Habit and completion record types.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::recurrence::Recurrence;
use crate::error::HabitError;

/// Default color tag for new habits.
pub const DEFAULT_COLOR: &str = "#4CAF50";

/// Unique habit identifier (SQLite rowid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(pub i64);

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user-defined recurring activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Inclusive lower bound for all statistics. Immutable after creation.
    pub start_date: NaiveDate,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
    pub archived: bool,
    pub recurrence: Recurrence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder: Option<NaiveTime>,
}

/// Input for creating a habit.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHabit {
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub color: String,
    pub target: Option<u32>,
    pub recurrence: Recurrence,
    pub reminder: Option<NaiveTime>,
}

impl NewHabit {
    /// A daily habit starting on `start_date` with the default color.
    #[must_use]
    pub fn new(title: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: None,
            start_date,
            color: DEFAULT_COLOR.to_string(),
            target: None,
            recurrence: Recurrence::Daily,
            reminder: None,
        }
    }

    #[must_use]
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check field invariants and normalise the title.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::InvalidArgument` for a blank title or a malformed color.
    pub fn validate(mut self) -> Result<Self, HabitError> {
        self.title = validate_title(&self.title)?;
        validate_color(&self.color)?;
        Ok(self)
    }
}

/// Partial update for an existing habit.
///
/// The start date is deliberately absent: changing it would rewrite the
/// history every streak was computed against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitUpdate {
    pub title: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub color: Option<String>,
    pub target: Option<Option<u32>>,
    pub recurrence: Option<Recurrence>,
    pub reminder: Option<Option<NaiveTime>>,
}

impl HabitUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply this update to `habit`, validating changed fields.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::InvalidArgument` for a blank title or a malformed color.
    pub fn apply(self, habit: &mut Habit) -> Result<(), HabitError> {
        if let Some(title) = self.title {
            habit.title = validate_title(&title)?;
        }
        if let Some(color) = self.color {
            validate_color(&color)?;
            habit.color = color;
        }
        if let Some(description) = self.description {
            habit.description = description;
        }
        if let Some(target) = self.target {
            habit.target = target;
        }
        if let Some(recurrence) = self.recurrence {
            habit.recurrence = recurrence;
        }
        if let Some(reminder) = self.reminder {
            habit.reminder = reminder;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<String, HabitError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(HabitError::invalid("habit title must not be blank"));
    }
    Ok(trimmed.to_string())
}

fn validate_color(color: &str) -> Result<(), HabitError> {
    let valid = color
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if valid {
        Ok(())
    } else {
        Err(HabitError::invalid(format!(
            "color must look like #RRGGBB, got {color:?}"
        )))
    }
}

/// Whether a habit was performed on a date. Absent records mean "not done".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub habit_id: HabitId,
    pub date: NaiveDate,
    pub is_done: bool,
}

impl CompletionRecord {
    #[must_use]
    pub const fn done(habit_id: HabitId, date: NaiveDate) -> Self {
        Self {
            habit_id,
            date,
            is_done: true,
        }
    }
}

/// A habit paired with its completion status for one date.
#[derive(Debug, Clone, Serialize)]
pub struct HabitWithStatus {
    #[serde(flatten)]
    pub habit: Habit,
    pub done: bool,
}

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// # Errors
    ///
    /// Returns `HabitError::InvalidArgument` if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, HabitError> {
        if start > end {
            return Err(HabitError::invalid(format!(
                "date range starts after it ends ({start} > {end})"
            )));
        }
        Ok(Self { start, end })
    }

    /// The full calendar month `year`-`month`.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::InvalidArgument` for an invalid month.
    pub fn month(year: i32, month: u32) -> Result<Self, HabitError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| HabitError::invalid(format!("invalid month {year}-{month:02}")))?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| HabitError::invalid(format!("invalid month {year}-{month:02}")))?;
        Ok(Self {
            start,
            end: next - Duration::days(1),
        })
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in the range (at least 1).
    #[must_use]
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Iterate every date in the range in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_habit() -> Habit {
        Habit {
            id: HabitId(1),
            title: "Read".to_string(),
            description: None,
            start_date: date(2024, 1, 1),
            color: DEFAULT_COLOR.to_string(),
            target: None,
            archived: false,
            recurrence: Recurrence::Daily,
            reminder: None,
        }
    }

    #[test]
    fn test_new_habit_validate_trims_title() {
        let habit = NewHabit::new("  Meditate  ", date(2024, 1, 1)).validate().unwrap();
        assert_eq!(habit.title, "Meditate");
    }

    #[test]
    fn test_new_habit_rejects_blank_title() {
        let err = NewHabit::new("   ", date(2024, 1, 1)).validate().unwrap_err();
        assert!(matches!(err, HabitError::InvalidArgument(_)));
    }

    #[test]
    fn test_new_habit_rejects_bad_color() {
        let mut habit = NewHabit::new("Run", date(2024, 1, 1));
        habit.color = "green".to_string();
        assert!(matches!(habit.validate(), Err(HabitError::InvalidArgument(_))));
    }

    #[test]
    fn test_update_apply() {
        let mut habit = sample_habit();
        let update = HabitUpdate {
            title: Some("Read 20 pages".to_string()),
            description: Some(Some("Fiction".to_string())),
            target: Some(Some(20)),
            ..HabitUpdate::default()
        };
        update.apply(&mut habit).unwrap();
        assert_eq!(habit.title, "Read 20 pages");
        assert_eq!(habit.description.as_deref(), Some("Fiction"));
        assert_eq!(habit.target, Some(20));
        assert_eq!(habit.start_date, date(2024, 1, 1));
    }

    #[test]
    fn test_update_clears_optional_fields() {
        let mut habit = sample_habit();
        habit.description = Some("old".to_string());
        HabitUpdate {
            description: Some(None),
            ..HabitUpdate::default()
        }
        .apply(&mut habit)
        .unwrap();
        assert_eq!(habit.description, None);
    }

    #[test]
    fn test_update_rejects_blank_title() {
        let mut habit = sample_habit();
        let update = HabitUpdate {
            title: Some(String::new()),
            ..HabitUpdate::default()
        };
        assert!(update.apply(&mut habit).is_err());
        assert_eq!(habit.title, "Read");
    }

    #[test]
    fn test_update_is_empty() {
        assert!(HabitUpdate::default().is_empty());
        let update = HabitUpdate {
            color: Some("#000000".to_string()),
            ..HabitUpdate::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_date_range() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 3)).unwrap();
        assert_eq!(range.len_days(), 3);
        assert!(range.contains(date(2024, 1, 2)));
        assert!(!range.contains(date(2024, 1, 4)));
        assert_eq!(range.days().count(), 3);

        assert!(DateRange::new(date(2024, 1, 3), date(2024, 1, 1)).is_err());
    }

    #[test]
    fn test_month_range() {
        let feb = DateRange::month(2024, 2).unwrap();
        assert_eq!(feb.start, date(2024, 2, 1));
        assert_eq!(feb.end, date(2024, 2, 29));

        let dec = DateRange::month(2023, 12).unwrap();
        assert_eq!(dec.end, date(2023, 12, 31));

        assert!(DateRange::month(2024, 0).is_err());
    }

    #[test]
    fn test_habit_json_shape() {
        let json = serde_json::to_value(sample_habit()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["start_date"], "2024-01-01");
        assert_eq!(json["recurrence"]["type"], "daily");
        assert!(json.get("description").is_none());
    }
}
