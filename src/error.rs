//! Error types for habitflow.

use thiserror::Error;

/// Errors produced by the habitflow library and CLI.
#[derive(Debug, Error)]
pub enum HabitError {
    /// An argument violated a precondition (future toggle, zero weekly count, blank title).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A habit (or other record) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration could not be read, parsed, or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The local database failed.
    #[error("Database error: {0}")]
    Database(String),

    /// User input could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HabitError {
    /// Shorthand for [`HabitError::InvalidArgument`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Shorthand for a missing habit.
    #[must_use]
    pub fn habit_not_found(id: crate::core::HabitId) -> Self {
        Self::NotFound(format!("habit {id}"))
    }

    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) | Self::Parse(_) => 2,
            Self::NotFound(_) => 3,
            Self::Config(_) | Self::Database(_) | Self::Io(_) | Self::Json(_) => 1,
        }
    }
}

impl From<rusqlite::Error> for HabitError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HabitId;

    #[test]
    fn test_error_display() {
        let err = HabitError::invalid("cannot toggle a future date");
        assert_eq!(err.to_string(), "Invalid argument: cannot toggle a future date");

        let err = HabitError::habit_not_found(HabitId(7));
        assert_eq!(err.to_string(), "Not found: habit 7");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(HabitError::invalid("x").exit_code(), 2);
        assert_eq!(HabitError::NotFound("x".into()).exit_code(), 3);
        assert_eq!(HabitError::Database("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_from_rusqlite() {
        let err: HabitError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, HabitError::Database(_)));
    }
}
