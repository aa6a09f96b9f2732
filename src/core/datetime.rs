//! Date and time parsing utilities.
//!
//! Completion records can only be toggled for today or the past, so relative
//! expressions resolve backwards: `friday` means the most recent Friday on or
//! before today.

use chrono::{Datelike, Days, Duration, NaiveDate, NaiveTime, Weekday};

/// Parse a date expression relative to `today`.
///
/// Supports:
/// - `today`, `yesterday`
/// - `3 days ago`, `2 weeks ago`
/// - `monday`, `last monday` (most recent occurrence on or before today)
/// - `2024-12-15` (ISO format)
///
/// Returns `None` if the input cannot be parsed.
#[must_use]
pub fn parse_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "today" => return Some(today),
        "yesterday" => return today.pred_opt(),
        _ => {},
    }

    if let Some(date) = parse_relative_offset(&input, today) {
        return Some(date);
    }

    let day_str = input.strip_prefix("last ").unwrap_or(&input);
    if let Some(target) = parse_weekday(day_str) {
        return Some(most_recent(target, today));
    }

    NaiveDate::parse_from_str(&input, "%Y-%m-%d").ok()
}

/// Parse "X days/weeks ago" patterns.
fn parse_relative_offset(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.len() == 3 && parts[2] == "ago" {
        let amount: u64 = parts[0].parse().ok()?;
        let unit = parts[1].trim_end_matches('s');

        let days = match unit {
            "day" => amount,
            "week" => amount.checked_mul(7)?,
            _ => return None,
        };

        return today.checked_sub_days(Days::new(days));
    }

    None
}

/// The latest date on or before `today` that falls on `target`.
fn most_recent(target: Weekday, today: NaiveDate) -> NaiveDate {
    let days_back = (i64::from(today.weekday().num_days_from_monday())
        - i64::from(target.num_days_from_monday())
        + 7)
        % 7;
    today - Duration::days(days_back)
}

/// Parse a weekday name (full or abbreviated, case-insensitive).
#[must_use]
pub fn parse_weekday(input: &str) -> Option<Weekday> {
    match input.trim().to_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thur" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Parse a `YYYY-MM` month into `(year, month)`.
#[must_use]
pub fn parse_month(input: &str) -> Option<(i32, u32)> {
    let (year, month) = input.trim().split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1).map(|_| (year, month))
}

/// Parse a reminder time.
///
/// Accepts `15:00`, `3pm`, `3:30pm`, and `morning`/`noon`/`evening`.
#[must_use]
pub fn parse_time(input: &str) -> Option<NaiveTime> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "morning" => return NaiveTime::from_hms_opt(9, 0, 0),
        "noon" | "midday" => return NaiveTime::from_hms_opt(12, 0, 0),
        "afternoon" => return NaiveTime::from_hms_opt(14, 0, 0),
        "evening" => return NaiveTime::from_hms_opt(18, 0, 0),
        "night" => return NaiveTime::from_hms_opt(21, 0, 0),
        _ => {},
    }

    if let Ok(time) = NaiveTime::parse_from_str(&input, "%H:%M") {
        return Some(time);
    }

    let (time_str, is_pm) = if let Some(rest) = input.strip_suffix("pm") {
        (rest, true)
    } else if let Some(rest) = input.strip_suffix("am") {
        (rest, false)
    } else {
        return None;
    };

    let (hour, minute) = match time_str.split_once(':') {
        Some((h, m)) => (h.parse::<u32>().ok()?, m.parse::<u32>().ok()?),
        None => (time_str.parse::<u32>().ok()?, 0),
    };
    if hour == 0 || hour > 12 {
        return None;
    }

    let hour = match (is_pm, hour) {
        (true, 12) => 12,
        (true, h) => h + 12,
        (false, 12) => 0,
        (false, h) => h,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}
