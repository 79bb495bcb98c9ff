//! Day-to-day navigation.

use std::fmt;
use std::str::FromStr;

use crate::day::{CalendarDate, DateParseError, day_key};

/// The day a caller asked to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestedDay {
    Today,
    Date(CalendarDate),
}

impl FromStr for RequestedDay {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("today") {
            return Ok(Self::Today);
        }
        s.parse().map(Self::Date)
    }
}

impl fmt::Display for RequestedDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => f.write_str("today"),
            Self::Date(date) => write!(f, "{date}"),
        }
    }
}

/// The resolved view for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayView {
    pub effective_day: CalendarDate,
    pub is_today: bool,
    /// An explicit date named today; callers should send the user to the
    /// today view instead of rendering the same day under a second address.
    pub redirect_to_today: bool,
    pub previous: Option<CalendarDate>,
    /// Withheld on today so there is no link to the future.
    pub next: Option<CalendarDate>,
}

/// Maps a requested day onto the day to show, given what today is.
pub fn resolve_view(requested: RequestedDay, today: CalendarDate) -> DayView {
    let (effective_day, redirect_to_today) = match requested {
        RequestedDay::Today => (today, false),
        RequestedDay::Date(date) if day_key(date) == day_key(today) => (today, true),
        RequestedDay::Date(date) => (date, false),
    };
    let is_today = effective_day == today;

    DayView {
        effective_day,
        is_today,
        redirect_to_today,
        previous: effective_day.previous(),
        next: if is_today { None } else { effective_day.next() },
    }
}
