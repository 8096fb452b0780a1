//! Inclusive date ranges over record timestamps
//!
//! Bounds may be given at calendar-day resolution or as full instants.
//! Day bounds are normalized before comparison:
//! - start day -> 00:00:00.000 of that day
//! - end day   -> 23:59:59.999 of that day
//!
//! Instants carrying a UTC offset are compared in their own wall-clock
//! time, the frame day bounds live in; naive instants are taken as-is.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Accepted naive datetime layouts, tried in order
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single range bound as supplied by a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// Calendar-day resolution, expanded on normalization
    Day(NaiveDate),
    /// Exact instant, used unchanged
    Instant(NaiveDateTime),
}

impl DateBound {
    /// Parses a bound from text.
    ///
    /// Returns None for anything that is not a date, a naive datetime or an
    /// RFC 3339 timestamp.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Ok(day) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
            return Some(DateBound::Day(day));
        }

        parse_instant(input).map(DateBound::Instant)
    }

    /// Earliest instant covered by this bound
    pub fn start_instant(&self) -> NaiveDateTime {
        match self {
            DateBound::Day(day) => day.and_time(NaiveTime::MIN),
            DateBound::Instant(at) => *at,
        }
    }

    /// Latest instant covered by this bound
    pub fn end_instant(&self) -> NaiveDateTime {
        match self {
            DateBound::Day(day) => end_of_day(*day),
            DateBound::Instant(at) => *at,
        }
    }
}

impl From<NaiveDate> for DateBound {
    fn from(day: NaiveDate) -> Self {
        DateBound::Day(day)
    }
}

impl From<NaiveDateTime> for DateBound {
    fn from(at: NaiveDateTime) -> Self {
        DateBound::Instant(at)
    }
}

/// Inclusive `[start, end]` window; an unset side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DateRange {
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

impl DateRange {
    /// Builds a normalized range from optional bounds
    pub fn new(start: Option<DateBound>, end: Option<DateBound>) -> Self {
        Self {
            start: start.map(|b| b.start_instant()),
            end: end.map(|b| b.end_instant()),
        }
    }

    /// Range with both sides set
    pub fn between(start: impl Into<DateBound>, end: impl Into<DateBound>) -> Self {
        Self::new(Some(start.into()), Some(end.into()))
    }

    /// Range open towards the end of time
    pub fn since(start: impl Into<DateBound>) -> Self {
        Self::new(Some(start.into()), None)
    }

    /// Range open towards the start of time
    pub fn until(end: impl Into<DateBound>) -> Self {
        Self::new(None, Some(end.into()))
    }

    /// Normalized start instant, if bounded
    pub fn start(&self) -> Option<NaiveDateTime> {
        self.start
    }

    /// Normalized end instant, if bounded
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }

    /// True when neither side is set
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// True when start lies after end. Such a range matches nothing;
    /// bounds are never swapped.
    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(s), Some(e)) if s > e)
    }

    /// Inclusive containment check
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        if let Some(start) = self.start {
            if at < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if at > end {
                return false;
            }
        }
        true
    }
}

/// Parses a record timestamp.
///
/// Dates without a time component map to midnight. Integers are taken as
/// milliseconds since the Unix epoch by [`crate::query::JsonAccessor`], not
/// here.
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    DateBound::parse(input).map(|b| b.start_instant())
}

fn parse_instant(input: &str) -> Option<NaiveDateTime> {
    if let Ok(at) = DateTime::parse_from_rfc3339(input) {
        return Some(at.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
}

fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    match day.and_hms_milli_opt(23, 59, 59, 999) {
        Some(at) => at,
        // Constant fields are always in range
        None => day.and_time(NaiveTime::MIN),
    }
}
