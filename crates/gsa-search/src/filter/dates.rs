//! Date predicates used by period filters and quick filters.
//!
//! Due dates are calendar dates. Where a date is compared with the current
//! instant it is taken as local midnight of that day, so a due date of today
//! is already "now" (and not after it) for the whole day.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Milliseconds in one day.
const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Source of the current local time.
pub trait Clock {
    /// Returns the current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Context for filter evaluation: the instant quick windows are measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterContext {
    now: NaiveDateTime,
}

impl FilterContext {
    /// Creates a context evaluating relative to `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Creates a context from a clock.
    pub fn from_clock(clock: &dyn Clock) -> Self {
        Self::new(clock.now())
    }

    /// Creates a context at the current local time.
    pub fn now_local() -> Self {
        Self::from_clock(&SystemClock)
    }

    /// The reference instant.
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }
}

/// Returns the instant a due date refers to (local midnight).
pub fn due_instant(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::default())
}

/// Returns true unless `date` falls before `start` or after `end`.
///
/// Bounds are inclusive and an absent bound does not constrain.
pub fn in_range(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    if start.is_some_and(|start| date < start) {
        return false;
    }
    if end.is_some_and(|end| date > end) {
        return false;
    }
    true
}

/// Returns true if `date` lies strictly between `now` and `now + days`.
///
/// Both ends are open: a date equal to `now` or to the window end is excluded.
/// A window reaching past the last representable instant has no end.
pub fn in_quick_window(date: NaiveDate, days: u32, now: NaiveDateTime) -> bool {
    let due = due_instant(date);
    if due <= now {
        return false;
    }
    match now.checked_add_signed(Duration::days(i64::from(days))) {
        Some(window_end) => due < window_end,
        None => true,
    }
}

/// Whole days from `now` until the due date, rounded up.
///
/// Negative once the due date has passed.
pub fn days_until(date: NaiveDate, now: NaiveDateTime) -> i64 {
    let millis = (due_instant(date) - now).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}

/// Formats a date for display, e.g. `Mar 7, 2026`.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
