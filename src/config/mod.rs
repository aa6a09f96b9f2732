//! Configuration management for habitflow.
//!
//! This module handles loading configuration from `~/.habitflow/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, HabitDefaults, LogConfig, LogFormat};
