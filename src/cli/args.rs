use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::core::Recurrence;

#[derive(Parser)]
#[command(name = "habitflow")]
#[command(about = "Track recurring habits, streaks, and completion rates from the terminal")]
#[command(long_about = "habitflow - a habit tracker for the terminal

Define habits that repeat daily, on chosen weekdays, or a number of times
per week. Mark them done day by day and follow your streaks.

QUICK START:
  habitflow add \"Read\" --repeat daily        Create a habit
  habitflow add \"Gym\" --repeat mon,wed,fri   Scheduled weekdays
  habitflow add \"Run\" --repeat 3/week        Any three days a week
  habitflow toggle 1                         Mark habit 1 done today
  habitflow stats                            Leaders across all habits

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  habitflow <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true, env = "HABITFLOW_TODAY", value_name = "DATE")]
    pub today: Option<String>,

    /// Data directory (default: ~/.habitflow)
    #[arg(long, global = true, env = "HABITFLOW_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a habit
    ///
    /// # Examples
    ///
    ///   habitflow add "Read"
    ///   habitflow add "Gym" --repeat mon,wed,fri --reminder 7am
    ///   habitflow add "Run" --repeat 3/week --start 2024-01-01
    #[command(alias = "a")]
    Add(AddArgs),

    /// List habits with today's status
    #[command(alias = "ls")]
    List {
        /// Show archived habits instead
        #[arg(long)]
        archived: bool,
    },

    /// Show a habit with its statistics
    Show {
        /// Habit ID
        id: i64,
    },

    /// Change a habit's title, color, schedule, or reminder
    ///
    /// The start date cannot be changed.
    Edit(EditArgs),

    /// Hide a habit from the active list, keeping its history
    Archive {
        /// Habit ID
        id: i64,
    },

    /// Bring an archived habit back
    Restore {
        /// Habit ID
        id: i64,
    },

    /// Delete a habit and all of its completion records
    Delete {
        /// Habit ID
        id: i64,
    },

    /// Flip a habit's done state for a day
    ///
    /// # Examples
    ///
    ///   habitflow toggle 1                   Today
    ///   habitflow check 1 --date yesterday
    ///   habitflow toggle 1 --date "last friday"
    #[command(alias = "check")]
    Toggle {
        /// Habit ID
        id: i64,

        /// Day to toggle (today, yesterday, "3 days ago", friday, YYYY-MM-DD)
        #[arg(long, short = 'd', default_value = "today")]
        date: String,
    },

    /// Show a month of completions as a calendar
    #[command(alias = "cal")]
    Calendar {
        /// Habit ID
        id: i64,

        /// Month to show (YYYY-MM, default: the current month)
        #[arg(long, short = 'm')]
        month: Option<String>,
    },

    /// View streaks and completion rates
    ///
    /// # Subcommands
    ///
    ///   summary   Leaders across all active habits (default)
    ///   habit     Statistics for one habit
    ///   watch     Recompute one habit's statistics as data changes
    Stats(StatsArgs),

    /// Generate a shell completion script
    ///
    /// Example: habitflow completions zsh > ~/.zfunc/_habitflow
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for creating a habit.
#[derive(Args)]
pub struct AddArgs {
    /// Habit title
    pub title: String,

    /// Longer description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// First day the habit counts (default: today)
    #[arg(long, short = 's')]
    pub start: Option<String>,

    /// Color tag as #RRGGBB (default: habits.default_color from config)
    #[arg(long, short = 'c')]
    pub color: Option<String>,

    /// Numeric target, e.g. pages or minutes
    #[arg(long, short = 't')]
    pub target: Option<u32>,

    /// Schedule: daily, weekdays, weekends, mon,wed,fri, or N/week
    #[arg(long, short = 'r', default_value = "daily")]
    pub repeat: Recurrence,

    /// Reminder time (7:30, 7am, morning)
    #[arg(long)]
    pub reminder: Option<String>,
}

/// Arguments for editing a habit.
#[derive(Args)]
pub struct EditArgs {
    /// Habit ID
    pub id: i64,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description
    #[arg(long, short = 'd', conflicts_with = "no_description")]
    pub description: Option<String>,

    /// Remove the description
    #[arg(long)]
    pub no_description: bool,

    /// New color as #RRGGBB
    #[arg(long, short = 'c')]
    pub color: Option<String>,

    /// New numeric target
    #[arg(long, short = 't', conflicts_with = "no_target")]
    pub target: Option<u32>,

    /// Remove the target
    #[arg(long)]
    pub no_target: bool,

    /// New schedule
    #[arg(long, short = 'r')]
    pub repeat: Option<Recurrence>,

    /// New reminder time
    #[arg(long, conflicts_with = "no_reminder")]
    pub reminder: Option<String>,

    /// Remove the reminder
    #[arg(long)]
    pub no_reminder: bool,
}

/// Arguments for statistics.
#[derive(Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub command: Option<StatsCommands>,
}

/// Statistics subcommands.
#[derive(Subcommand)]
pub enum StatsCommands {
    /// Best streak, current streak, and most consistent habit
    Summary,

    /// Current streak, best streak, and completion rate of one habit
    Habit {
        /// Habit ID
        id: i64,
    },

    /// Print a habit's statistics whenever they change
    ///
    /// Polls the database and prints a new line after every change to the
    /// habit's completions, and when the day rolls over.
    Watch {
        /// Habit ID
        id: i64,

        /// Seconds between polls
        #[arg(long, short = 'i', default_value = "2")]
        interval: u64,

        /// Stop after this many updates
        #[arg(long, short = 'n')]
        count: Option<usize>,
    },
}
