//! Source of "today".
//!
//! Statistics and toggles depend on the current date. Everything below the
//! CLI takes it through a [`Clock`] (or an explicit `today` argument) so tests
//! and the `--today` flag can pin it.

use chrono::{Local, NaiveDate};

/// Provides the current calendar date.
pub trait Clock {
    /// The current local date.
    fn today(&self) -> NaiveDate;
}

/// Reads the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
