use chrono::NaiveDate;
use colored::Colorize;

use crate::core::{CompletionRecord, DateRange, Habit, HabitWithStatus, RecurrenceKind};
use crate::stats::visualization::{render_month_calendar, render_progress_bar, render_summary_box};
use crate::stats::{AllHabitsStatistics, HabitStatistics, Leader};

/// Format a list of habits with their status for one day
pub fn format_habits_pretty(habits: &[HabitWithStatus], title: &str) -> String {
    if habits.is_empty() {
        return format!("{title} (0 habits)\n  No habits");
    }

    let mut output = format!("{} ({} habits)\n", title, habits.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for item in habits {
        let habit = &item.habit;
        let status_icon = if item.done { "[x]".green() } else { "[ ]".white() };

        let mut line = format!(
            "{} {} {}",
            status_icon,
            format!("#{}", habit.id).dimmed(),
            habit.title.bold()
        );
        line.push_str(&format!("  {}", habit.recurrence.display_name().cyan()));

        if let Some(reminder) = habit.reminder {
            line.push_str(&format!("  {}", reminder.format("%H:%M").to_string().yellow()));
        }

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a habit's details followed by its statistics
pub fn format_habit_pretty(habit: &Habit, stats: &HabitStatistics) -> String {
    let mut output = format!("{}\n", habit.title.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), habit.id));

    if let Some(description) = &habit.description {
        output.push_str(&format!("  {}: {}\n", "Description".dimmed(), description));
    }

    output.push_str(&format!(
        "  {}: {}\n",
        "Repeats".dimmed(),
        habit.recurrence.display_name()
    ));
    output.push_str(&format!("  {}: {}\n", "Started".dimmed(), habit.start_date));
    output.push_str(&format!("  {}: {}\n", "Color".dimmed(), habit.color));

    if let Some(target) = habit.target {
        output.push_str(&format!("  {}: {}\n", "Target".dimmed(), target));
    }
    if let Some(reminder) = habit.reminder {
        output.push_str(&format!(
            "  {}: {}\n",
            "Reminder".dimmed(),
            reminder.format("%H:%M")
        ));
    }
    if habit.archived {
        output.push_str(&format!("  {}\n", "Archived".yellow()));
    }

    output.push('\n');
    output.push_str(&format_stats_lines(stats));
    output
}

fn format_stats_lines(stats: &HabitStatistics) -> String {
    let streak = if stats.current_streak > 0 {
        stats.current_streak.to_string().green().to_string()
    } else {
        "0".dimmed().to_string()
    };

    let mut output = format!("  {}: {}\n", "Current streak".dimmed(), streak);
    output.push_str(&format!("  {}: {}\n", "Best streak".dimmed(), stats.best_streak));
    output.push_str(&format!(
        "  {}: {}\n",
        "Completion".dimmed(),
        render_progress_bar(stats.percent_completion, 20)
    ));
    output
}

/// Format one habit's statistics as a box
pub fn format_habit_stats_pretty(habit: &Habit, stats: &HabitStatistics) -> String {
    let items = [
        ("Current streak", stats.current_streak.to_string()),
        ("Best streak", stats.best_streak.to_string()),
        ("Completion", render_progress_bar(stats.percent_completion, 20)),
    ];
    render_summary_box(&habit.title, &items)
}

/// Format a single watch update as one line
pub fn format_stats_line_pretty(today: NaiveDate, stats: &HabitStatistics) -> String {
    format!(
        "{}  current {}  best {}  {:.0}%",
        today.to_string().dimmed(),
        stats.current_streak.to_string().green(),
        stats.best_streak,
        stats.percent_completion * 100.0
    )
}

/// Format the leaders across all habits
pub fn format_summary_pretty(summary: Option<&AllHabitsStatistics>) -> String {
    let Some(summary) = summary else {
        return "No active habits".dimmed().to_string();
    };

    let output = [
        "HABIT STATISTICS".bold().to_string(),
        "─".repeat(50),
        leader_line("Best streak", &summary.best_streak, streak_label),
        leader_line("Current streak", &summary.current_streak, streak_label),
        leader_line("Most consistent", &summary.most_consistent, |_, v| {
            format!("{:.0}%", v * 100.0)
        }),
        String::new(),
        format!("  {} active habits", summary.active_habits).dimmed().to_string(),
    ];
    output.join("\n")
}

fn leader_line<T: Copy>(
    label: &str,
    leader: &Leader<T>,
    value: impl Fn(&Habit, T) -> String,
) -> String {
    format!(
        "  {:<16} {} {}",
        format!("{label}:"),
        leader.habit.title.bold(),
        format!("({})", value(&leader.habit, leader.value)).cyan()
    )
}

fn streak_label(habit: &Habit, streak: u32) -> String {
    let unit = match habit.recurrence.kind() {
        RecurrenceKind::Daily | RecurrenceKind::WeeklyDays => "days",
        RecurrenceKind::WeeklyCount => "weeks",
    };
    format!("{streak} {unit}")
}

/// Format the result of a toggle
pub fn format_toggle_pretty(habit: &Habit, record: &CompletionRecord) -> String {
    if record.is_done {
        format!("{} {} on {}", "Done:".green(), habit.title.bold(), record.date)
    } else {
        format!("{} {} on {}", "Undone:".yellow(), habit.title.bold(), record.date)
    }
}

/// Format a month calendar
pub fn format_calendar_pretty(
    habit: &Habit,
    records: &[CompletionRecord],
    month: DateRange,
    today: NaiveDate,
) -> String {
    let calendar = render_month_calendar(habit, records, month, today);
    let done = records.iter().filter(|r| r.is_done).count();

    format!(
        "{} {}\n\n{}\n{}",
        habit.title.bold(),
        format!("#{}", habit.id).dimmed(),
        calendar,
        format!("{done} done this month").dimmed()
    )
}
