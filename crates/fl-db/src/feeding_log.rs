//! Day-windowed feeding log over a [`Database`].

use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};
use fl_core::{
    CalendarDate, DayLog, DayView, DayWindow, DisplayFeeding, FeedingEvent, FeedingId, User,
    UserId, aggregate, local_instant, parse_time_of_day,
};

use crate::{Database, DbError};

/// Reads and mutates the feeding log, grouping by calendar day in `Tz`.
///
/// Nothing is cached: every read goes back to the store, so a read after a
/// mutation always sees it.
pub struct FeedingLog<Tz: TimeZone> {
    db: Database,
    tz: Tz,
}

impl FeedingLog<Local> {
    /// A log grouped by the host's local timezone.
    pub const fn local(db: Database) -> Self {
        Self { db, tz: Local }
    }
}

impl<Tz> FeedingLog<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    pub const fn new(db: Database, tz: Tz) -> Self {
        Self { db, tz }
    }

    pub const fn database(&self) -> &Database {
        &self.db
    }

    pub const fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// The calendar date containing `now`.
    pub fn today(&self, now: DateTime<Utc>) -> CalendarDate {
        CalendarDate::today(&self.tz, now)
    }

    pub fn window(&self, day: CalendarDate) -> DayWindow {
        DayWindow::for_date(day, &self.tz)
    }

    /// All feedings on `day`, most recent first.
    pub fn feedings_for_day(&self, day: CalendarDate) -> Result<Vec<DisplayFeeding>, DbError> {
        let users = self.db.list_users()?;
        self.feedings_with_users(day, &users)
    }

    fn feedings_with_users(
        &self,
        day: CalendarDate,
        users: &[User],
    ) -> Result<Vec<DisplayFeeding>, DbError> {
        let window = self.window(day);
        let events = self.db.list_feedings_in_range(window.start, window.end)?;
        tracing::debug!(
            day = %day,
            event_count = events.len(),
            "loaded feedings for day"
        );
        Ok(aggregate(users, events, &window, &self.tz))
    }

    /// Builds the render payload for a resolved view.
    ///
    /// The user list is read once and used both for attribution and for the payload.
    pub fn day_log(&self, view: &DayView) -> Result<DayLog, DbError> {
        let users = self.db.list_users()?;
        let feedings = self.feedings_with_users(view.effective_day, &users)?;
        Ok(DayLog {
            date: view.effective_day,
            today: view.is_today,
            previous: view.previous,
            next: view.next,
            feedings,
            users,
        })
    }

    /// Records a feeding at `at`, or now when `at` is `None`.
    ///
    /// `user_id` is not checked against the user table.
    pub fn add_entry(
        &mut self,
        user_id: Option<UserId>,
        at: Option<DateTime<Utc>>,
    ) -> Result<FeedingEvent, DbError> {
        let at = at.unwrap_or_else(Utc::now);
        let event = self.db.insert_feeding(user_id, at)?;
        match event.user_id {
            Some(user) => tracing::info!(feeding_id = %event.id, user_id = %user, "added feeding"),
            None => tracing::info!(feeding_id = %event.id, "added anonymous feeding"),
        }
        Ok(event)
    }

    /// Records a feeding at a local `HH:MM` on `day`.
    pub fn add_entry_at(
        &mut self,
        user_id: Option<UserId>,
        day: CalendarDate,
        time: &str,
    ) -> Result<FeedingEvent, DbError> {
        let time = parse_time_of_day(time)?;
        let at = local_instant(day, time, &self.tz)?;
        self.add_entry(user_id, Some(at))
    }

    /// Deletes a feeding. Missing IDs are not an error.
    ///
    /// Returns whether a feeding was removed.
    pub fn remove_entry(&mut self, id: FeedingId) -> Result<bool, DbError> {
        let removed = self.db.delete_feeding(id)?;
        if removed {
            tracing::info!(feeding_id = %id, "deleted feeding");
        } else {
            tracing::debug!(feeding_id = %id, "no feeding to delete");
        }
        Ok(removed)
    }

    /// Deletes every feeding on `day`. Returns how many were removed.
    pub fn clear_day(&mut self, day: CalendarDate) -> Result<usize, DbError> {
        let window = self.window(day);
        let removed = self.db.delete_feedings_in_range(window.start, window.end)?;
        tracing::info!(day = %day, removed, "cleared feedings for day");
        Ok(removed)
    }
}
