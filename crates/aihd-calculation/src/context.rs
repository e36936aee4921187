//! Temporal context shared by every calculation in one evaluation.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// The reference instant of a report evaluation.
///
/// Created once per evaluation and passed by reference to every rule, so
/// ages and "most recent" comparisons use the same basis in every bucket.
///
/// # Examples
///
/// ```
/// use aihd_calculation::TemporalContext;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let context = TemporalContext::end_of_day(day);
/// assert_eq!(context.today(), day);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalContext {
    now: NaiveDateTime,
}

impl TemporalContext {
    /// Creates a context anchored at `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Creates a context anchored at the last second of `date`, so that
    /// every observation recorded on that day is in range.
    pub fn end_of_day(date: NaiveDate) -> Self {
        let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        Self::new(date.and_time(last_second))
    }

    /// Creates a context anchored at the current local time.
    pub fn current() -> Self {
        Self::new(Local::now().naive_local())
    }

    /// Returns the reference instant.
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Returns the date part of the reference instant.
    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }
}
