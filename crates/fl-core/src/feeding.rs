//! Feeding events and their display projection.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::day::{CalendarDate, DayWindow};
use crate::types::{FeedingId, UserId};

/// Display name for feedings recorded without a user.
pub const ANONYMOUS_NAME: &str = "anon";

/// Display name for feedings whose user no longer exists.
pub const UNKNOWN_USER_NAME: &str = "unknown user";

/// A person who can record feedings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

/// A stored feeding: who fed, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedingEvent {
    pub id: FeedingId,
    /// `None` for anonymous feedings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub timestamp: DateTime<Utc>,
}

/// Who a feeding is shown as belonging to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Attribution {
    /// Recorded by a known user.
    Attributed { user_id: UserId, name: String },
    /// Recorded without a user.
    Anonymous,
    /// The referenced user is missing from the user table.
    UnknownUser { user_id: UserId },
}

impl Attribution {
    pub fn display_name(&self) -> &str {
        match self {
            Self::Attributed { name, .. } => name,
            Self::Anonymous => ANONYMOUS_NAME,
            Self::UnknownUser { .. } => UNKNOWN_USER_NAME,
        }
    }

    pub const fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }
}

impl fmt::Display for Attribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.display_name())
    }
}

/// A feeding as shown in a day log. Never written back to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayFeeding {
    pub id: FeedingId,
    pub who: Attribution,
    /// 24-hour local time of day, e.g. `14:05:30`.
    pub time: String,
    pub timestamp: DateTime<Utc>,
}

/// Everything a renderer needs to show one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayLog {
    /// Day key of the day shown.
    pub date: CalendarDate,
    pub today: bool,
    pub previous: Option<CalendarDate>,
    /// `None` when showing today.
    pub next: Option<CalendarDate>,
    /// Most recent first.
    pub feedings: Vec<DisplayFeeding>,
    pub users: Vec<User>,
}

/// Formats an instant as a 24-hour local time of day.
pub fn format_time_of_day<Tz>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    instant.with_timezone(tz).format("%H:%M:%S").to_string()
}

fn attribute(event: &FeedingEvent, names: &HashMap<UserId, &str>) -> Attribution {
    let Some(user_id) = event.user_id else {
        return Attribution::Anonymous;
    };
    if let Some(name) = names.get(&user_id) {
        Attribution::Attributed {
            user_id,
            name: (*name).to_string(),
        }
    } else {
        tracing::warn!(
            feeding_id = %event.id,
            user_id = %user_id,
            "feeding references a missing user"
        );
        Attribution::UnknownUser { user_id }
    }
}

/// Projects the feedings that fall inside `window` into display form.
///
/// The result is ordered most recent first. Feedings with equal timestamps
/// keep their relative input order.
pub fn aggregate<Tz>(
    users: &[User],
    events: Vec<FeedingEvent>,
    window: &DayWindow,
    tz: &Tz,
) -> Vec<DisplayFeeding>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let names: HashMap<UserId, &str> = users
        .iter()
        .map(|user| (user.id, user.name.as_str()))
        .collect();

    let mut feedings: Vec<DisplayFeeding> = events
        .into_iter()
        .filter(|event| window.contains(event.timestamp))
        .map(|event| DisplayFeeding {
            id: event.id,
            who: attribute(&event, &names),
            time: format_time_of_day(event.timestamp, tz),
            timestamp: event.timestamp,
        })
        .collect();

    feedings.sort_by_key(|feeding| std::cmp::Reverse(feeding.timestamp));
    feedings
}
