//! Storage layer for habitflow.
//!
//! This module provides SQLite-based persistence for:
//! - Habit definitions ([`HabitStore`])
//! - The completion ledger ([`LedgerStore`])

mod database;
mod habits;
mod ledger;
mod migrations;

pub use database::Database;
pub use habits::HabitStore;
pub use ledger::LedgerStore;
