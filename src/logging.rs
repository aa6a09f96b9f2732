//! Structured logging setup.
//!
//! Logs go to stderr so command output on stdout stays machine-readable.
//! `RUST_LOG` takes precedence over the config file and `-v` flags.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogConfig, LogFormat};
use crate::error::HabitError;

/// Filter directive for the given `-v` count and configured base level.
#[must_use]
pub fn filter_directive(verbosity: u8, config: &LogConfig) -> String {
    let crate_level = match verbosity {
        0 => return config.level.clone(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("{},habitflow={crate_level}", config.level)
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns `HabitError::Config` if the level directive is malformed or a
/// subscriber is already installed.
pub fn init(verbosity: u8, config: &LogConfig) -> Result<(), HabitError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(filter_directive(verbosity, config))
            .map_err(|e| HabitError::Config(format!("Invalid log level {:?}: {e}", config.level)))?,
    };

    let subscriber = tracing_subscriber::registry().with(env_filter);

    let result = match config.format {
        LogFormat::Json => subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| HabitError::Config(format!("Failed to initialize logging: {e}")))
}
