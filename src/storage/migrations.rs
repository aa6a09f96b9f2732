//! Database migrations for habitflow.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;

use crate::error::HabitError;

/// Current schema version.
pub(crate) const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, HabitError> {
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| HabitError::Database(format!("Failed to get schema version: {e}")))?;

    Ok(version)
}

/// Set the schema version in the database.
fn set_version(conn: &Connection, version: i32) -> Result<(), HabitError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| HabitError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), HabitError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        tracing::info!(version, "applying schema migration");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

/// Run a specific migration.
fn run_migration(conn: &Connection, version: i32) -> Result<(), HabitError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(HabitError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: Initial schema.
///
/// Creates tables for:
/// - `habits`: habit definitions and their recurrence rule
/// - `completions`: one row per (habit, date), cascaded on habit delete
/// - `ledger_meta`: a single revision counter bumped by triggers on every
///   change to the two tables above
fn migrate_v1(conn: &Connection) -> Result<(), HabitError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS habits (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            start_date TEXT NOT NULL,
            color TEXT NOT NULL,
            target INTEGER,
            archived INTEGER NOT NULL DEFAULT 0,
            repeat_kind TEXT NOT NULL DEFAULT 'daily',
            repeat_days TEXT,
            repeat_count INTEGER,
            reminder TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_habits_archived
        ON habits(archived);

        CREATE TABLE IF NOT EXISTS completions (
            habit_id INTEGER NOT NULL REFERENCES habits(id) ON DELETE CASCADE,
            date TEXT NOT NULL,
            is_done INTEGER NOT NULL DEFAULT 1,
            PRIMARY KEY (habit_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_completions_date
        ON completions(date);

        CREATE TABLE IF NOT EXISTS ledger_meta (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            revision INTEGER NOT NULL
        );

        INSERT OR IGNORE INTO ledger_meta (id, revision) VALUES (1, 0);

        CREATE TRIGGER IF NOT EXISTS habits_after_insert AFTER INSERT ON habits
        BEGIN UPDATE ledger_meta SET revision = revision + 1 WHERE id = 1; END;

        CREATE TRIGGER IF NOT EXISTS habits_after_update AFTER UPDATE ON habits
        BEGIN UPDATE ledger_meta SET revision = revision + 1 WHERE id = 1; END;

        CREATE TRIGGER IF NOT EXISTS habits_after_delete AFTER DELETE ON habits
        BEGIN UPDATE ledger_meta SET revision = revision + 1 WHERE id = 1; END;

        CREATE TRIGGER IF NOT EXISTS completions_after_insert AFTER INSERT ON completions
        BEGIN UPDATE ledger_meta SET revision = revision + 1 WHERE id = 1; END;

        CREATE TRIGGER IF NOT EXISTS completions_after_update AFTER UPDATE ON completions
        BEGIN UPDATE ledger_meta SET revision = revision + 1 WHERE id = 1; END;

        CREATE TRIGGER IF NOT EXISTS completions_after_delete AFTER DELETE ON completions
        BEGIN UPDATE ledger_meta SET revision = revision + 1 WHERE id = 1; END;
        ",
    )
    .map_err(|e| HabitError::Database(format!("Migration v1 failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revision(conn: &Connection) -> i64 {
        conn.query_row("SELECT revision FROM ledger_meta WHERE id = 1", [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    #[test]
    fn test_migration_v1() {
        let conn = Connection::open_in_memory().unwrap();

        run(&conn).unwrap();

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);

        conn.execute(
            "INSERT INTO habits (title, start_date, color) VALUES ('Read', '2024-01-01', '#4CAF50')",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO completions (habit_id, date, is_done) VALUES (1, '2024-01-01', 1)",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_completion_key_is_unique() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();

        conn.execute(
            "INSERT INTO habits (title, start_date, color) VALUES ('Read', '2024-01-01', '#4CAF50')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO completions (habit_id, date) VALUES (1, '2024-01-02')",
            [],
        )
        .unwrap();

        let duplicate = conn.execute(
            "INSERT INTO completions (habit_id, date) VALUES (1, '2024-01-02')",
            [],
        );
        assert!(duplicate.is_err());
    }

    #[test]
    fn test_revision_triggers() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        assert_eq!(revision(&conn), 0);

        conn.execute(
            "INSERT INTO habits (title, start_date, color) VALUES ('Read', '2024-01-01', '#4CAF50')",
            [],
        )
        .unwrap();
        assert_eq!(revision(&conn), 1);

        conn.execute(
            "INSERT INTO completions (habit_id, date) VALUES (1, '2024-01-02')",
            [],
        )
        .unwrap();
        conn.execute("UPDATE completions SET is_done = 0", []).unwrap();
        assert_eq!(revision(&conn), 3);
    }

    #[test]
    fn test_migration_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        run(&conn).unwrap();
        run(&conn).unwrap();

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
        assert_eq!(revision(&conn), 0);
    }

    #[test]
    fn test_get_version_new_database() {
        let conn = Connection::open_in_memory().unwrap();

        assert_eq!(get_version(&conn).unwrap(), 0);
    }
}
