//! Recurrence rules.
//!
//! A habit is expected either every day, on a fixed set of weekdays, or a
//! number of times per ISO week. The rule decides which calendar dates count
//! as "active days" for statistics; the streak logic itself lives in
//! [`crate::stats::engine`].

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::datetime::parse_weekday;
use crate::error::HabitError;

/// All weekdays, Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A set of weekdays stored as a 7-bit mask (bit 0 = Monday).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Weekday>", into = "Vec<Weekday>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    const fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }

    /// Add a weekday to the set.
    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    #[must_use]
    pub const fn contains(self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the contained weekdays, Monday first.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        WEEKDAYS.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl From<Vec<Weekday>> for WeekdaySet {
    fn from(days: Vec<Weekday>) -> Self {
        days.into_iter().collect()
    }
}

impl From<WeekdaySet> for Vec<Weekday> {
    fn from(set: WeekdaySet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .iter()
            .map(|d| d.to_string().to_lowercase())
            .collect();
        f.write_str(&names.join(","))
    }
}

impl FromStr for WeekdaySet {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| {
                parse_weekday(t).ok_or_else(|| HabitError::Parse(format!("Unknown weekday: {t}")))
            })
            .collect()
    }
}

/// How often a habit is expected to be performed.
///
/// Deserialization goes through [`Recurrence::weekly_count`], so a zero
/// weekly count is rejected there too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", try_from = "RecurrenceRepr")]
pub enum Recurrence {
    /// Every calendar day from the start date onward.
    #[default]
    Daily,
    /// Only on the listed weekdays.
    WeeklyOnDays { days: WeekdaySet },
    /// `count` times per ISO week, on any days.
    WeeklyCount { count: u32 },
}

/// Unvalidated wire form of [`Recurrence`].
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RecurrenceRepr {
    Daily,
    WeeklyOnDays { days: WeekdaySet },
    WeeklyCount { count: u32 },
}

impl TryFrom<RecurrenceRepr> for Recurrence {
    type Error = HabitError;

    fn try_from(repr: RecurrenceRepr) -> Result<Self, Self::Error> {
        match repr {
            RecurrenceRepr::Daily => Ok(Self::Daily),
            RecurrenceRepr::WeeklyOnDays { days } => Ok(Self::WeeklyOnDays { days }),
            RecurrenceRepr::WeeklyCount { count } => Self::weekly_count(count),
        }
    }
}

/// Discriminant of a [`Recurrence`], used for storage and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceKind {
    Daily,
    WeeklyDays,
    WeeklyCount,
}

impl RecurrenceKind {
    /// Column value used in the `habits.repeat_kind` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::WeeklyDays => "weekly_days",
            Self::WeeklyCount => "weekly_count",
        }
    }
}

impl Recurrence {
    /// Expected on the given weekdays.
    ///
    /// An empty set is accepted; such a habit is never expected and its
    /// statistics are always zero.
    #[must_use]
    pub fn weekly_on_days(days: impl IntoIterator<Item = Weekday>) -> Self {
        Self::WeeklyOnDays {
            days: days.into_iter().collect(),
        }
    }

    /// Expected `count` times per ISO week.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::InvalidArgument` if `count` is zero.
    pub fn weekly_count(count: u32) -> Result<Self, HabitError> {
        if count == 0 {
            return Err(HabitError::invalid("weekly count must be positive"));
        }
        Ok(Self::WeeklyCount { count })
    }

    #[must_use]
    pub const fn kind(&self) -> RecurrenceKind {
        match self {
            Self::Daily => RecurrenceKind::Daily,
            Self::WeeklyOnDays { .. } => RecurrenceKind::WeeklyDays,
            Self::WeeklyCount { .. } => RecurrenceKind::WeeklyCount,
        }
    }

    /// Whether the habit is expected on `date`.
    ///
    /// `WeeklyCount` does not gate individual days: any date on or after the
    /// start qualifies, and the weekly threshold is applied by the engine.
    #[must_use]
    pub fn is_expected_on(&self, date: NaiveDate, start: NaiveDate) -> bool {
        if date < start {
            return false;
        }
        match self {
            Self::Daily | Self::WeeklyCount { .. } => true,
            Self::WeeklyOnDays { days } => days.contains(date.weekday()),
        }
    }

    /// Short human-readable label.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Daily => "Daily".to_string(),
            Self::WeeklyOnDays { days } if days.is_empty() => "Never".to_string(),
            Self::WeeklyOnDays { days } => {
                let names: Vec<String> = days.iter().map(|d| d.to_string()).collect();
                names.join(", ")
            }
            Self::WeeklyCount { count } => format!("{count}x per week"),
        }
    }

    /// Rebuild a rule from its storage columns.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::Database` for unknown kinds or missing columns.
    pub fn from_columns(
        kind: &str,
        days: Option<&str>,
        count: Option<u32>,
    ) -> Result<Self, HabitError> {
        match kind {
            "daily" => Ok(Self::Daily),
            "weekly_days" => {
                let days = days.unwrap_or_default();
                let set = days
                    .parse::<WeekdaySet>()
                    .map_err(|e| HabitError::Database(format!("Bad repeat days {days:?}: {e}")))?;
                Ok(Self::WeeklyOnDays { days: set })
            }
            "weekly_count" => {
                let count = count
                    .ok_or_else(|| HabitError::Database("weekly_count without count".into()))?;
                Self::weekly_count(count).map_err(|e| HabitError::Database(e.to_string()))
            }
            other => Err(HabitError::Database(format!("Unknown repeat kind: {other}"))),
        }
    }

    /// Split into storage columns `(kind, days, count)`.
    #[must_use]
    pub fn to_columns(&self) -> (&'static str, Option<String>, Option<u32>) {
        let kind = self.kind().as_str();
        match self {
            Self::Daily => (kind, None, None),
            Self::WeeklyOnDays { days } => (kind, Some(days.to_string()), None),
            Self::WeeklyCount { count } => (kind, None, Some(*count)),
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => f.write_str("daily"),
            Self::WeeklyOnDays { days } => write!(f, "weekly:{days}"),
            Self::WeeklyCount { count } => write!(f, "{count}/week"),
        }
    }
}

impl FromStr for Recurrence {
    type Err = HabitError;

    /// Accepts `daily`, `mon,wed,fri`, `weekly:mon,wed`, `3/week`, `weekly:3`,
    /// `weekdays` and `weekends`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        let body = input.strip_prefix("weekly:").unwrap_or(&input);

        match body {
            "daily" | "everyday" | "every day" => return Ok(Self::Daily),
            "weekdays" => return Ok(Self::weekly_on_days(WEEKDAYS[..5].iter().copied())),
            "weekends" => return Ok(Self::weekly_on_days([Weekday::Sat, Weekday::Sun])),
            _ => {}
        }

        let count_str = body
            .strip_suffix("/week")
            .or_else(|| body.strip_suffix("x"))
            .unwrap_or(body);
        if let Ok(count) = count_str.trim().parse::<u32>() {
            return Self::weekly_count(count);
        }

        let days: WeekdaySet = body.parse()?;
        if days.is_empty() {
            return Err(HabitError::Parse(format!("Unrecognized repeat rule: {s}")));
        }
        Ok(Self::WeeklyOnDays { days })
    }
}

/// ISO-8601 week number (1..=53) of `date`.
#[must_use]
pub fn iso_week(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_set_basics() {
        let set: WeekdaySet = [Weekday::Fri, Weekday::Mon, Weekday::Wed].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert!(set.contains(Weekday::Mon));
        assert!(!set.contains(Weekday::Tue));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]
        );
        assert_eq!(set.to_string(), "mon,wed,fri");
    }

    #[test]
    fn test_weekday_set_serde() {
        let set: WeekdaySet = [Weekday::Tue, Weekday::Sun].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["Tue","Sun"]"#);
        let back: WeekdaySet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_weekly_count_rejects_zero() {
        assert!(matches!(
            Recurrence::weekly_count(0),
            Err(HabitError::InvalidArgument(_))
        ));
        assert_eq!(
            Recurrence::weekly_count(3).unwrap(),
            Recurrence::WeeklyCount { count: 3 }
        );
    }

    #[test]
    fn test_recurrence_serde() {
        let rule = Recurrence::weekly_count(3).unwrap();
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"{"type":"weekly_count","count":3}"#);
        assert_eq!(serde_json::from_str::<Recurrence>(&json).unwrap(), rule);

        let rule = Recurrence::weekly_on_days([Weekday::Mon]);
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(serde_json::from_str::<Recurrence>(&json).unwrap(), rule);
    }

    #[test]
    fn test_recurrence_deserialize_rejects_zero_count() {
        let err = serde_json::from_str::<Recurrence>(r#"{"type":"weekly_count","count":0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("weekly count must be positive"));
    }

    #[test]
    fn test_is_expected_on_daily() {
        let start = date(2024, 1, 10);
        assert!(!Recurrence::Daily.is_expected_on(date(2024, 1, 9), start));
        assert!(Recurrence::Daily.is_expected_on(start, start));
        assert!(Recurrence::Daily.is_expected_on(date(2024, 3, 1), start));
    }

    #[test]
    fn test_is_expected_on_weekdays() {
        let rule = Recurrence::weekly_on_days([Weekday::Mon, Weekday::Wed, Weekday::Fri]);
        let start = date(2024, 1, 1);
        assert!(rule.is_expected_on(date(2024, 1, 1), start)); // Monday
        assert!(!rule.is_expected_on(date(2024, 1, 2), start)); // Tuesday
        assert!(rule.is_expected_on(date(2024, 1, 3), start)); // Wednesday
        assert!(!rule.is_expected_on(date(2023, 12, 29), start)); // Friday before start
    }

    #[test]
    fn test_empty_weekday_set_never_expected() {
        let rule = Recurrence::weekly_on_days(std::iter::empty());
        let start = date(2024, 1, 1);
        for offset in 0..7 {
            let d = start + chrono::Duration::days(offset);
            assert!(!rule.is_expected_on(d, start));
        }
    }

    #[test]
    fn test_weekly_count_does_not_gate_days() {
        let rule = Recurrence::weekly_count(2).unwrap();
        let start = date(2024, 1, 1);
        assert!(rule.is_expected_on(date(2024, 1, 6), start));
        assert!(!rule.is_expected_on(date(2023, 12, 31), start));
    }

    #[test]
    fn test_parse_rules() {
        assert_eq!("daily".parse::<Recurrence>().unwrap(), Recurrence::Daily);
        assert_eq!(
            "mon,wed,fri".parse::<Recurrence>().unwrap(),
            Recurrence::weekly_on_days([Weekday::Mon, Weekday::Wed, Weekday::Fri])
        );
        assert_eq!(
            "weekly:Tuesday, Thursday".parse::<Recurrence>().unwrap(),
            Recurrence::weekly_on_days([Weekday::Tue, Weekday::Thu])
        );
        assert_eq!(
            "3/week".parse::<Recurrence>().unwrap(),
            Recurrence::WeeklyCount { count: 3 }
        );
        assert_eq!(
            "weekly:2".parse::<Recurrence>().unwrap(),
            Recurrence::WeeklyCount { count: 2 }
        );
        assert_eq!("weekends".parse::<Recurrence>().unwrap().to_string(), "weekly:sat,sun");
    }

    #[test]
    fn test_parse_rules_invalid() {
        assert!(matches!(
            "0/week".parse::<Recurrence>(),
            Err(HabitError::InvalidArgument(_))
        ));
        assert!(matches!("sometimes".parse::<Recurrence>(), Err(HabitError::Parse(_))));
        assert!(matches!("".parse::<Recurrence>(), Err(HabitError::Parse(_))));
    }

    #[test]
    fn test_display_parse_agree() {
        for rule in [
            Recurrence::Daily,
            Recurrence::weekly_on_days([Weekday::Sat]),
            Recurrence::WeeklyCount { count: 4 },
        ] {
            assert_eq!(rule.to_string().parse::<Recurrence>().unwrap(), rule);
        }
    }

    #[test]
    fn test_columns() {
        let rule = Recurrence::weekly_on_days([Weekday::Mon, Weekday::Fri]);
        let (kind, days, count) = rule.to_columns();
        assert_eq!(kind, "weekly_days");
        assert_eq!(days.as_deref(), Some("mon,fri"));
        assert_eq!(count, None);
        assert_eq!(Recurrence::from_columns(kind, days.as_deref(), count).unwrap(), rule);

        assert!(matches!(
            Recurrence::from_columns("monthly", None, None),
            Err(HabitError::Database(_))
        ));
        assert!(matches!(
            Recurrence::from_columns("weekly_count", None, None),
            Err(HabitError::Database(_))
        ));
    }

    #[test]
    fn test_iso_week() {
        assert_eq!(iso_week(date(2024, 1, 1)), 1);
        assert_eq!(iso_week(date(2024, 1, 8)), 2);
        // 2021-01-03 is a Sunday that belongs to week 53 of 2020
        assert_eq!(iso_week(date(2021, 1, 3)), 53);
    }
}
