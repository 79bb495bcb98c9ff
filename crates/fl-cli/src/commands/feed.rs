//! Feed command for recording a feeding.

use std::fmt;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use fl_core::{CalendarDate, format_time_of_day};
use fl_db::FeedingLog;

use crate::FeedArgs;

/// Runs the feed command.
///
/// Without `--time` the feeding is recorded at `now`. With `--time` it is
/// recorded at that local time on `--date`, or on today when no date is given.
pub fn run<W, Tz>(
    writer: &mut W,
    log: &mut FeedingLog<Tz>,
    args: &FeedArgs,
    now: DateTime<Utc>,
) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let event = match &args.time {
        Some(time) => {
            let day = args.date.unwrap_or_else(|| log.today(now));
            log.add_entry_at(args.user, day, time)?
        }
        None => log.add_entry(args.user, Some(now))?,
    };

    let day = CalendarDate::of(event.timestamp, log.timezone());
    let time = format_time_of_day(event.timestamp, log.timezone());
    match event.user_id {
        Some(user) => writeln!(
            writer,
            "Recorded feeding #{} by user {user} at {time} on {day}",
            event.id
        )?,
        None => writeln!(
            writer,
            "Recorded anonymous feeding #{} at {time} on {day}",
            event.id
        )?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::FixedOffset;
    use fl_core::UserId;
    use fl_db::Database;
    use insta::assert_snapshot;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-29T15:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn empty_log() -> FeedingLog<FixedOffset> {
        let db = Database::open_in_memory().unwrap();
        FeedingLog::new(db, FixedOffset::west_opt(3 * 3600).unwrap())
    }

    fn feed(log: &mut FeedingLog<FixedOffset>, args: &FeedArgs) -> String {
        let mut output = Vec::new();
        run(&mut output, log, args, now()).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn feed_now_by_user() {
        let mut log = empty_log();
        let args = FeedArgs {
            user: Some(UserId::new(2).unwrap()),
            date: None,
            time: None,
        };

        let output = feed(&mut log, &args);

        assert_snapshot!(output, @"Recorded feeding #1 by user 2 at 12:00:00 on 2025/1/29");
        assert_eq!(log.database().count_feedings().unwrap(), 1);
    }

    #[test]
    fn feed_at_explicit_date_and_time() {
        let mut log = empty_log();
        let args = FeedArgs {
            user: None,
            date: Some(CalendarDate::from_ymd(2025, 1, 27).unwrap()),
            time: Some("21:45".to_string()),
        };

        let output = feed(&mut log, &args);

        assert_snapshot!(output, @"Recorded anonymous feeding #1 at 21:45:00 on 2025/1/27");
    }

    #[test]
    fn feed_at_time_defaults_to_today() {
        let mut log = empty_log();
        let args = FeedArgs {
            user: None,
            date: None,
            time: Some("06:10".to_string()),
        };

        feed(&mut log, &args);

        let today = log.today(now());
        let feedings = log.feedings_for_day(today).unwrap();
        assert_eq!(feedings.len(), 1);
        assert_eq!(feedings[0].time, "06:10:00");
    }

    #[test]
    fn feed_rejects_malformed_time_without_writing() {
        let mut log = empty_log();
        let args = FeedArgs {
            user: None,
            date: None,
            time: Some("quarter past".to_string()),
        };

        let mut output = Vec::new();
        let err = run(&mut output, &mut log, &args, now()).unwrap_err();

        assert!(err.to_string().contains("expected HH:MM"));
        assert_eq!(log.database().count_feedings().unwrap(), 0);
        assert!(output.is_empty());
    }
}
