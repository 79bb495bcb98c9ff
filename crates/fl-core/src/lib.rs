//! Core domain logic for the feeding log.
//!
//! This crate contains the fundamental types and logic for:
//! - Day windows: mapping instants onto local calendar days
//! - Aggregation: turning stored feedings into an attributed, ordered day log
//! - Navigation: resolving a requested day into the view to show

pub mod day;
pub mod feeding;
pub mod navigation;
pub mod types;

pub use day::{
    CalendarDate, DateParseError, DayWindow, day_key, local_instant, parse_calendar_date,
    parse_time_of_day, same_day,
};
pub use feeding::{
    ANONYMOUS_NAME, Attribution, DayLog, DisplayFeeding, FeedingEvent, UNKNOWN_USER_NAME, User,
    aggregate, format_time_of_day,
};
pub use navigation::{DayView, RequestedDay, resolve_view};
pub use types::{FeedingId, UserId, ValidationError};
