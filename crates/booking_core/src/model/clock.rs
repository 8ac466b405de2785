//! Source of "today" for date validation and daily listings.

use chrono::{Local, NaiveDate};

/// Supplies the current calendar day in local time.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock implementation backed by the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one day. Used by tests and replay tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
