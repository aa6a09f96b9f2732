//! JSON output formatting for habitflow.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;

use crate::core::{CompletionRecord, DateRange, Habit, HabitWithStatus};
use crate::error::HabitError;
use crate::stats::{AllHabitsStatistics, HabitStatistics};

/// Format habits with their status as JSON
///
/// # Errors
///
/// Returns `HabitError::Json` if JSON serialization fails.
pub fn format_habits_json(habits: &[HabitWithStatus], date: NaiveDate) -> Result<String, HabitError> {
    let output = json!({
        "date": date,
        "count": habits.len(),
        "items": habits
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a habit and its statistics as JSON
///
/// # Errors
///
/// Returns `HabitError::Json` if JSON serialization fails.
pub fn format_habit_json(habit: &Habit, stats: &HabitStatistics) -> Result<String, HabitError> {
    let output = json!({
        "habit": habit,
        "statistics": stats
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the all-habits summary as JSON (`null` when there are no habits)
///
/// # Errors
///
/// Returns `HabitError::Json` if JSON serialization fails.
pub fn format_summary_json(summary: Option<&AllHabitsStatistics>) -> Result<String, HabitError> {
    Ok(serde_json::to_string_pretty(&summary)?)
}

/// Format a month of completions as JSON
///
/// # Errors
///
/// Returns `HabitError::Json` if JSON serialization fails.
pub fn format_calendar_json(
    habit: &Habit,
    records: &[CompletionRecord],
    month: DateRange,
) -> Result<String, HabitError> {
    let done: Vec<NaiveDate> = records.iter().filter(|r| r.is_done).map(|r| r.date).collect();
    let output = json!({
        "habit_id": habit.id,
        "title": habit.title,
        "month": month.start.format("%Y-%m").to_string(),
        "done": done
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `HabitError::Json` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, HabitError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{HabitId, Recurrence, DEFAULT_COLOR};
    use crate::stats::Leader;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_habit(title: &str, recurrence: Recurrence) -> Habit {
        Habit {
            id: HabitId(7),
            title: title.to_string(),
            description: None,
            start_date: date(2024, 1, 1),
            color: DEFAULT_COLOR.to_string(),
            target: None,
            archived: false,
            recurrence,
            reminder: None,
        }
    }

    #[test]
    fn test_format_habits_json_empty_list() {
        let result = format_habits_json(&[], date(2024, 1, 19)).unwrap();

        assert!(result.contains("\"date\": \"2024-01-19\""));
        assert!(result.contains("\"count\": 0"));
        assert!(result.contains("\"items\": []"));
    }

    #[test]
    fn test_format_habits_json_flattens_status() {
        let items = vec![HabitWithStatus {
            habit: make_habit("Read", Recurrence::Daily),
            done: true,
        }];
        let value: serde_json::Value =
            serde_json::from_str(&format_habits_json(&items, date(2024, 1, 19)).unwrap()).unwrap();

        assert_eq!(value["items"][0]["title"], "Read");
        assert_eq!(value["items"][0]["done"], true);
        assert_eq!(value["items"][0]["recurrence"]["type"], "daily");
        assert!(value["items"][0].get("description").is_none());
    }

    #[test]
    fn test_format_habit_json_weekdays() {
        let habit = make_habit("Gym", Recurrence::weekly_on_days([Weekday::Mon, Weekday::Fri]));
        let stats = HabitStatistics {
            current_streak: 2,
            best_streak: 5,
            percent_completion: 0.5,
        };
        let value: serde_json::Value =
            serde_json::from_str(&format_habit_json(&habit, &stats).unwrap()).unwrap();

        assert_eq!(value["habit"]["recurrence"]["type"], "weekly_on_days");
        assert_eq!(value["habit"]["recurrence"]["days"], json!(["Mon", "Fri"]));
        assert_eq!(value["statistics"]["best_streak"], 5);
        assert_eq!(value["statistics"]["percent_completion"], 0.5);
    }

    #[test]
    fn test_format_summary_json() {
        assert_eq!(format_summary_json(None).unwrap(), "null");

        let habit = make_habit("Read", Recurrence::Daily);
        let summary = AllHabitsStatistics {
            best_streak: Leader { habit: habit.clone(), value: 9 },
            current_streak: Leader { habit: habit.clone(), value: 3 },
            most_consistent: Leader { habit, value: 0.75 },
            active_habits: 1,
        };
        let value: serde_json::Value =
            serde_json::from_str(&format_summary_json(Some(&summary)).unwrap()).unwrap();
        assert_eq!(value["best_streak"]["value"], 9);
        assert_eq!(value["most_consistent"]["habit"]["title"], "Read");
    }

    #[test]
    fn test_format_calendar_json_lists_done_dates() {
        let habit = make_habit("Read", Recurrence::Daily);
        let records = vec![
            CompletionRecord::done(HabitId(7), date(2024, 1, 2)),
            CompletionRecord {
                habit_id: HabitId(7),
                date: date(2024, 1, 3),
                is_done: false,
            },
        ];
        let month = DateRange::month(2024, 1).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&format_calendar_json(&habit, &records, month).unwrap()).unwrap();

        assert_eq!(value["month"], "2024-01");
        assert_eq!(value["done"], json!(["2024-01-02"]));
    }
}
