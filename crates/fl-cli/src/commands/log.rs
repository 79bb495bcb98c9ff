//! Log command for showing one day of feedings.
//!
//! This module implements `fl log [today|YYYY/M/D] [--json]`.

use std::fmt::{self, Write as _};
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use fl_core::{DayLog, resolve_view};
use fl_db::FeedingLog;
use serde::Serialize;

use crate::LogArgs;

// ========== Human-Readable Output ==========

/// Formats a day log for the terminal.
pub fn format_day_log(data: &DayLog) -> String {
    let mut output = String::new();

    let suffix = if data.today { " (today)" } else { "" };
    writeln!(output, "FEEDINGS: {}{suffix}", data.date).unwrap();
    writeln!(output, "─────────").unwrap();

    if data.feedings.is_empty() {
        writeln!(output, "No feedings recorded.").unwrap();
    } else {
        for feeding in &data.feedings {
            writeln!(
                output,
                "  {}  {:<16}  #{}",
                feeding.time, feeding.who, feeding.id
            )
            .unwrap();
        }
        let noun = if data.feedings.len() == 1 {
            "feeding"
        } else {
            "feedings"
        };
        writeln!(output).unwrap();
        writeln!(output, "{} {noun}", data.feedings.len()).unwrap();
    }

    writeln!(output).unwrap();
    if let Some(previous) = data.previous {
        writeln!(output, "Previous: fl log {previous}").unwrap();
    }
    if let Some(next) = data.next {
        writeln!(output, "Next:     fl log {next}").unwrap();
    }

    output
}

// ========== JSON Output ==========

#[derive(Debug, Serialize)]
struct JsonDayLog<'a> {
    utc_offset: &'a str,
    #[serde(flatten)]
    log: &'a DayLog,
}

/// Formats a day log as JSON.
///
/// `utc_offset` is the offset of the log's timezone at the start of the day shown.
pub fn format_day_log_json(data: &DayLog, utc_offset: &str) -> Result<String> {
    let report = JsonDayLog {
        utc_offset,
        log: data,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the log command.
pub fn run<W, Tz>(
    writer: &mut W,
    log: &FeedingLog<Tz>,
    args: &LogArgs,
    now: DateTime<Utc>,
) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let view = resolve_view(args.day, log.today(now));
    if view.redirect_to_today {
        tracing::debug!(requested = %args.day, "requested date is today; showing today");
    }

    let data = log.day_log(&view)?;

    if args.json {
        let start = log.window(data.date).start.with_timezone(log.timezone());
        let utc_offset = start.offset().to_string();
        writeln!(writer, "{}", format_day_log_json(&data, &utc_offset)?)?;
    } else {
        write!(writer, "{}", format_day_log(&data))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::FixedOffset;
    use fl_core::{CalendarDate, RequestedDay, UserId};
    use fl_db::Database;
    use insta::assert_snapshot;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-29T15:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn seeded_log() -> FeedingLog<FixedOffset> {
        let mut db = Database::open_in_memory().unwrap();
        db.insert_user("Ana").unwrap();
        db.insert_user("Beto").unwrap();
        let mut log = FeedingLog::new(db, FixedOffset::west_opt(3 * 3600).unwrap());
        let today = log.today(now());
        let ana = Some(UserId::new(1).unwrap());
        let beto = Some(UserId::new(2).unwrap());
        log.add_entry_at(ana, today, "08:00").unwrap();
        log.add_entry_at(beto, today, "08:05").unwrap();
        log.add_entry_at(None, today, "20:00").unwrap();
        log.add_entry_at(Some(UserId::new(7).unwrap()), today, "21:30")
            .unwrap();
        log
    }

    fn render(log: &FeedingLog<FixedOffset>, day: RequestedDay, json: bool) -> String {
        let mut output = Vec::new();
        run(&mut output, log, &LogArgs { day, json }, now()).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn log_today_lists_feedings_newest_first() {
        let output = render(&seeded_log(), RequestedDay::Today, false);
        assert_snapshot!(output, @r"
        FEEDINGS: 2025/1/29 (today)
        ─────────
          21:30:00  unknown user      #4
          20:00:00  anon              #3
          08:05:00  Beto              #2
          08:00:00  Ana               #1

        4 feedings

        Previous: fl log 2025/1/28
        ");
    }

    #[test]
    fn log_past_day_without_feedings() {
        let day = CalendarDate::from_ymd(2025, 1, 20).unwrap();
        let output = render(&seeded_log(), RequestedDay::Date(day), false);
        assert_snapshot!(output, @r"
        FEEDINGS: 2025/1/20
        ─────────
        No feedings recorded.

        Previous: fl log 2025/1/19
        Next:     fl log 2025/1/21
        ");
    }

    #[test]
    fn explicit_today_renders_as_today() {
        let log = seeded_log();
        let day = CalendarDate::from_ymd(2025, 1, 29).unwrap();
        assert_eq!(
            render(&log, RequestedDay::Date(day), false),
            render(&log, RequestedDay::Today, false)
        );
    }

    #[test]
    fn log_json_output_has_render_fields() {
        let output = render(&seeded_log(), RequestedDay::Today, true);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["date"], "2025/1/29");
        assert_eq!(value["today"], true);
        assert_eq!(value["previous"], "2025/1/28");
        assert!(value["next"].is_null());
        assert_eq!(value["utc_offset"], "-03:00");
        assert_eq!(value["users"].as_array().unwrap().len(), 2);

        let feedings = value["feedings"].as_array().unwrap();
        assert_eq!(feedings.len(), 4);
        assert_eq!(feedings[1]["time"], "20:00:00");
        assert_eq!(feedings[1]["who"]["kind"], "anonymous");
        assert_eq!(feedings[2]["who"]["name"], "Beto");
    }

    #[test]
    fn log_json_offset_follows_the_log_timezone() {
        let mut log = FeedingLog::new(
            Database::open_in_memory().unwrap(),
            FixedOffset::east_opt(5 * 3600 + 1800).unwrap(),
        );
        log.add_entry(None, Some(now())).unwrap();

        let output = render(&log, RequestedDay::Today, true);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["utc_offset"], "+05:30");
        assert_eq!(value["date"], "2025/1/29");
        assert_eq!(value["feedings"][0]["time"], "20:30:00");
    }
}
