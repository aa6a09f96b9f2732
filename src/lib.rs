//! habitflow - a habit tracker for the terminal
//!
//! Habits repeat daily, on chosen weekdays, or a number of times per ISO
//! week. Completions live in a local SQLite ledger, and the statistics engine
//! derives current streaks, best streaks, and completion rates from it.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use habitflow::core::{CompletionLedger, HabitRepository, NewHabit};
//! use habitflow::stats::load_habit_statistics;
//! use habitflow::storage::{Database, HabitStore, LedgerStore};
//!
//! # fn main() -> Result<(), habitflow::HabitError> {
//! let db = Database::open_in_memory()?;
//! let (habits, ledger) = (HabitStore::new(&db), LedgerStore::new(&db));
//! let today = NaiveDate::from_ymd_opt(2024, 1, 19).unwrap_or_default();
//!
//! let read = habits.add(NewHabit::new("Read", today))?;
//! ledger.toggle(read.id, today, today)?;
//!
//! let (_, stats) = load_habit_statistics(&habits, &ledger, read.id, today)?;
//! assert_eq!(stats.current_streak, 1);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod output;
pub mod stats;
pub mod storage;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::HabitError;
