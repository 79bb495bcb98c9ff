//! Local calendar days and the instant ranges they cover.
//!
//! Feedings are stored as UTC instants but grouped by the calendar day they
//! fall on in a given timezone. The timezone is always passed in explicitly;
//! callers that want the host zone pass [`chrono::Local`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing date and time input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// The input was not in `YYYY/M/D` form.
    #[error("invalid date {input:?}, expected YYYY/M/D")]
    Malformed { input: String },

    /// A date component was not an integer.
    #[error("{field} is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },

    /// The month was outside 1..=12.
    #[error("month must be between 1 and 12, got {month}")]
    MonthOutOfRange { month: u32 },

    /// The day does not exist in the given month.
    #[error("no such day: {year}/{month}/{day}")]
    NoSuchDay { year: i32, month: u32, day: u32 },

    /// The input was not in `HH:MM` form.
    #[error("invalid time {input:?}, expected HH:MM")]
    InvalidTime { input: String },

    /// The local time falls in a DST gap.
    #[error("{date} {time} does not exist in the local timezone")]
    NonexistentLocalTime { date: String, time: String },
}

/// A calendar date, independent of any timezone.
///
/// Displays as its day key (`YYYY/M/D`, no zero padding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Builds a date from numeric components, rejecting invalid days.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateParseError> {
        if !(1..=12).contains(&month) {
            return Err(DateParseError::MonthOutOfRange { month });
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(DateParseError::NoSuchDay { year, month, day })
    }

    /// The local calendar date of `instant` in `tz`.
    pub fn of<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> Self {
        Self(instant.with_timezone(tz).date_naive())
    }

    /// The date containing `now` in `tz`.
    pub fn today<Tz: TimeZone>(tz: &Tz, now: DateTime<Utc>) -> Self {
        Self::of(now, tz)
    }

    pub const fn naive(self) -> NaiveDate {
        self.0
    }

    pub fn previous(self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    pub fn next(self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// Returns the canonical key for this date.
    pub fn key(self) -> String {
        day_key(self)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.0.year(), self.0.month(), self.0.day())
    }
}

impl FromStr for CalendarDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(year), Some(month), Some(day), None) => parse_calendar_date(year, month, day),
            _ => Err(DateParseError::Malformed {
                input: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = DateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.key()
    }
}

/// Canonical key for a date, used in paths and for "is this today" checks.
pub fn day_key(date: CalendarDate) -> String {
    date.to_string()
}

/// Parses path-style date components into a validated date.
///
/// Out-of-range components are errors; nothing is rolled over into the next
/// month or year.
pub fn parse_calendar_date(
    year: &str,
    month: &str,
    day: &str,
) -> Result<CalendarDate, DateParseError> {
    let year: i32 = parse_component(year, "year")?;
    let month: u32 = parse_component(month, "month")?;
    let day: u32 = parse_component(day, "day")?;
    CalendarDate::from_ymd(year, month, day)
}

fn parse_component<T: FromStr>(value: &str, field: &'static str) -> Result<T, DateParseError> {
    value.parse().map_err(|_| DateParseError::NotANumber {
        field,
        value: value.to_string(),
    })
}

/// Whether two instants fall on the same local calendar date in `tz`.
pub fn same_day<Tz: TimeZone>(a: DateTime<Utc>, b: DateTime<Utc>, tz: &Tz) -> bool {
    CalendarDate::of(a, tz) == CalendarDate::of(b, tz)
}

/// The half-open instant range `[start, end)` covered by one local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub date: CalendarDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// Computes the window from local midnight of `date` to local midnight of the next day.
    pub fn for_date<Tz: TimeZone>(date: CalendarDate, tz: &Tz) -> Self {
        let start = local_midnight_to_utc(date.0, tz);
        let end = date.0.succ_opt().map_or_else(
            || start + Duration::days(1),
            |next| local_midnight_to_utc(next, tz),
        );
        Self { date, start, end }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    pub fn start_ms(&self) -> i64 {
        self.start.timestamp_millis()
    }

    pub fn end_ms(&self) -> i64 {
        self.end.timestamp_millis()
    }
}

/// Converts a local date at midnight to UTC.
/// Handles DST ambiguity by picking the earlier time.
fn local_midnight_to_utc<Tz: TimeZone>(local_date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = local_date.and_time(NaiveTime::MIN);
    let mut candidate = midnight;
    // A spring-forward gap at midnight: the day starts at the first local
    // time that exists.
    while candidate.date() == local_date {
        match tz.from_local_datetime(&candidate) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                return dt.with_timezone(&Utc);
            }
            LocalResult::None => candidate += Duration::minutes(15),
        }
    }
    Utc.from_utc_datetime(&midnight)
}

/// Parses an `HH:MM` time of day.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, DateParseError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").map_err(|_| DateParseError::InvalidTime {
        input: input.to_string(),
    })
}

/// Resolves a local date and time in `tz` to a UTC instant.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant.
pub fn local_instant<Tz: TimeZone>(
    date: CalendarDate,
    time: NaiveTime,
    tz: &Tz,
) -> Result<DateTime<Utc>, DateParseError> {
    match tz.from_local_datetime(&date.0.and_time(time)) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt.with_timezone(&Utc)),
        LocalResult::None => Err(DateParseError::NonexistentLocalTime {
            date: date.key(),
            time: time.format("%H:%M").to_string(),
        }),
    }
}
