//! Clear command for deleting every feeding on a day.

use std::fmt;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use fl_core::resolve_view;
use fl_db::FeedingLog;

use crate::ClearArgs;

/// Runs the clear command.
pub fn run<W, Tz>(
    writer: &mut W,
    log: &mut FeedingLog<Tz>,
    args: &ClearArgs,
    now: DateTime<Utc>,
) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let day = resolve_view(args.day, log.today(now)).effective_day;
    let removed = log.clear_day(day)?;
    let noun = if removed == 1 { "feeding" } else { "feedings" };
    writeln!(writer, "Cleared {removed} {noun} on {day}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::FixedOffset;
    use fl_core::{CalendarDate, RequestedDay};
    use fl_db::Database;
    use insta::assert_snapshot;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-29T15:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn clear_today_reports_count() {
        let db = Database::open_in_memory().unwrap();
        let mut log = FeedingLog::new(db, FixedOffset::west_opt(3 * 3600).unwrap());
        let today = log.today(now());
        for time in ["01:00", "09:30", "22:15"] {
            log.add_entry_at(None, today, time).unwrap();
        }

        let mut output = Vec::new();
        let args = ClearArgs {
            day: RequestedDay::Today,
        };
        run(&mut output, &mut log, &args, now()).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @"Cleared 3 feedings on 2025/1/29");
        assert!(log.feedings_for_day(today).unwrap().is_empty());
    }

    #[test]
    fn clear_empty_day_is_not_an_error() {
        let db = Database::open_in_memory().unwrap();
        let mut log = FeedingLog::new(db, FixedOffset::west_opt(3 * 3600).unwrap());

        let mut output = Vec::new();
        let args = ClearArgs {
            day: RequestedDay::Date(CalendarDate::from_ymd(2024, 2, 29).unwrap()),
        };
        run(&mut output, &mut log, &args, now()).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @"Cleared 0 feedings on 2024/2/29");
    }
}
