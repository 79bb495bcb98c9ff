//! Remove command for deleting a single feeding.

use std::fmt;
use std::io::Write;

use anyhow::Result;
use chrono::TimeZone;
use fl_db::FeedingLog;

use crate::RemoveArgs;

/// Runs the remove command. A missing ID is reported, not treated as an error.
pub fn run<W, Tz>(writer: &mut W, log: &mut FeedingLog<Tz>, args: &RemoveArgs) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if log.remove_entry(args.id)? {
        writeln!(writer, "Deleted feeding #{}", args.id)?;
    } else {
        writeln!(writer, "No feeding #{}; nothing deleted", args.id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use fl_core::FeedingId;
    use fl_db::Database;
    use insta::assert_snapshot;

    #[test]
    fn remove_reports_missing_feeding() {
        let mut log = FeedingLog::new(Database::open_in_memory().unwrap(), Utc);
        let feeding = log.add_entry(None, None).unwrap();

        let mut first = Vec::new();
        run(&mut first, &mut log, &RemoveArgs { id: feeding.id }).unwrap();
        let mut second = Vec::new();
        run(&mut second, &mut log, &RemoveArgs { id: feeding.id }).unwrap();

        assert_snapshot!(String::from_utf8(first).unwrap(), @"Deleted feeding #1");
        assert_snapshot!(String::from_utf8(second).unwrap(), @"No feeding #1; nothing deleted");
    }

    #[test]
    fn remove_unknown_id_keeps_other_feedings() {
        let mut log = FeedingLog::new(Database::open_in_memory().unwrap(), Utc);
        log.add_entry(None, None).unwrap();

        let args = RemoveArgs {
            id: FeedingId::new(999_999).unwrap(),
        };
        run(&mut Vec::<u8>::new(), &mut log, &args).unwrap();

        assert_eq!(log.database().count_feedings().unwrap(), 1);
    }

    #[test]
    fn remove_zero_is_a_no_op() {
        let mut log = FeedingLog::new(Database::open_in_memory().unwrap(), Utc);
        log.add_entry(None, None).unwrap();

        let mut output = Vec::new();
        let args = RemoveArgs {
            id: FeedingId::from_raw(0),
        };
        run(&mut output, &mut log, &args).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @"No feeding #0; nothing deleted");
        assert_eq!(log.database().count_feedings().unwrap(), 1);
    }
}
