//! Clock abstraction
//!
//! Rule windows are evaluated against the establishment's local wall clock.
//! The engine itself takes the instant as a parameter and stays pure; this
//! trait is how callers obtain that instant, and how tests pin it.

use chrono::NaiveDateTime;

/// Source of the local evaluation instant
pub trait Clock: Send + Sync {
    /// Current local date-time (weekday and time-of-day derive from it)
    fn now_local(&self) -> NaiveDateTime;
}

/// Production clock backed by the system's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_local(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Fixed clock for deterministic tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now_local(&self) -> NaiveDateTime {
        self.0
    }
}
