//! Path resolution for habitflow configuration and data files.
//!
//! All habitflow data is stored in `~/.habitflow/` unless overridden with
//! `--home` or `HABITFLOW_HOME`:
//! - `config.yaml` - Main configuration file
//! - `habitflow.db` - SQLite database with habits and completion records

use std::path::PathBuf;

use crate::error::HabitError;

/// Paths to habitflow configuration and data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Root directory: `~/.habitflow/`
    pub root: PathBuf,
    /// Config file: `~/.habitflow/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.habitflow/habitflow.db`
    pub database: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, HabitError> {
        let home = std::env::var("HOME")
            .map_err(|_| HabitError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".habitflow")))
    }

    /// Use `root` when given, otherwise the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if no root is given and the home directory cannot be
    /// determined.
    pub fn resolve(root: Option<PathBuf>) -> Result<Self, HabitError> {
        root.map_or_else(Self::new, |root| Ok(Self::with_root(root)))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("habitflow.db"),
            root,
        }
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), HabitError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                HabitError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}
