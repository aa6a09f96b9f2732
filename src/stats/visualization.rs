//! Terminal visualization for habit statistics.
//!
//! Plain-text renderings; coloring is left to the output layer.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use crate::core::{CompletionRecord, DateRange, Habit, Recurrence, WEEKDAYS};

const FULL_BLOCK: char = '█';
const LIGHT_SHADE: char = '░';

/// Marker for a day with a done record.
pub const DONE_MARK: char = '✓';
/// Marker for a scheduled past day without a done record.
pub const MISSED_MARK: char = '✗';

/// Render one calendar month as a Monday-first grid.
///
/// Each cell is the day number followed by [`DONE_MARK`], [`MISSED_MARK`],
/// or a blank. Days before the habit's start date and days after `today`
/// are never marked missed. `WeeklyCount` habits have no per-day schedule,
/// so only done days are marked.
#[must_use]
pub fn render_month_calendar(
    habit: &Habit,
    records: &[CompletionRecord],
    month: DateRange,
    today: NaiveDate,
) -> String {
    let done: HashSet<NaiveDate> = records
        .iter()
        .filter(|r| r.is_done && month.contains(r.date))
        .map(|r| r.date)
        .collect();

    let mut lines = Vec::new();
    lines.push(format!("{:^28}", month.start.format("%B %Y").to_string()));
    lines.push(
        WEEKDAYS
            .iter()
            .map(|d| format!(" {:<3}", &d.to_string()[..2]))
            .collect::<String>(),
    );

    let offset = month.start.weekday().num_days_from_monday() as usize;
    let mut row = "    ".repeat(offset);
    let mut column = offset;

    for date in month.days() {
        let mark = if done.contains(&date) {
            DONE_MARK
        } else if date <= today
            && tracks_missed_days(&habit.recurrence)
            && habit.recurrence.is_expected_on(date, habit.start_date)
        {
            MISSED_MARK
        } else {
            ' '
        };
        row.push_str(&format!("{:>3}{mark}", date.day()));
        column += 1;

        if column == 7 {
            lines.push(row.trim_end().to_string());
            row = String::new();
            column = 0;
        }
    }
    if !row.is_empty() {
        lines.push(row.trim_end().to_string());
    }

    lines.push(String::new());
    lines.push(format!("{DONE_MARK} done  {MISSED_MARK} missed"));

    lines.join("\n")
}

const fn tracks_missed_days(recurrence: &Recurrence) -> bool {
    match recurrence {
        Recurrence::Daily | Recurrence::WeeklyOnDays { .. } => true,
        Recurrence::WeeklyCount { .. } => false,
    }
}

/// Render a fraction in `[0, 1]` as a progress bar with a percentage.
#[must_use]
pub fn render_progress_bar(fraction: f64, width: usize) -> String {
    let progress = fraction.clamp(0.0, 1.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((progress * width as f64).round() as usize).min(width);

    format!(
        "[{}{}] {:.0}%",
        FULL_BLOCK.to_string().repeat(filled),
        LIGHT_SHADE.to_string().repeat(width - filled),
        progress * 100.0
    )
}

/// Render a bordered box of `label : value` rows under a title.
#[must_use]
pub fn render_summary_box(title: &str, items: &[(&str, String)]) -> String {
    let label_width = items.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let value_width = items.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);
    let inner = (label_width + value_width + 3).max(title.chars().count()) + 2;

    let mut lines = Vec::new();
    lines.push(format!("┌{}┐", "─".repeat(inner)));
    lines.push(format!("│{title:^inner$}│"));
    lines.push(format!("├{}┤", "─".repeat(inner)));
    for (label, value) in items {
        let row = format!("{label:>label_width$} : {value}");
        lines.push(format!("│ {row:<width$} │", width = inner - 2));
    }
    lines.push(format!("└{}┘", "─".repeat(inner)));

    lines.join("\n")
}
