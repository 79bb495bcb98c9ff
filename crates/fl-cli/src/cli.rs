//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fl_core::{CalendarDate, FeedingId, RequestedDay, UserId};

/// Shared feeding log.
///
/// Records who fed and when, and shows the log one local calendar day at a time.
#[derive(Debug, Parser)]
#[command(name = "fl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the feedings for a day.
    Log(LogArgs),

    /// Record a feeding.
    Feed(FeedArgs),

    /// Delete a single feeding by ID.
    Remove(RemoveArgs),

    /// Delete every feeding on a day.
    Clear(ClearArgs),

    /// Manage the people who feed.
    #[command(subcommand)]
    Users(UsersAction),
}

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Day to show: `today` or `YYYY/M/D`.
    #[arg(default_value = "today")]
    pub day: RequestedDay,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct FeedArgs {
    /// ID of the user who fed. Omit for an anonymous feeding.
    #[arg(short, long, allow_negative_numbers = true)]
    pub user: Option<UserId>,

    /// Local day of the feeding (`YYYY/M/D`). Defaults to today.
    #[arg(long, requires = "time")]
    pub date: Option<CalendarDate>,

    /// Local time of the feeding (`HH:MM`). Defaults to now.
    #[arg(long)]
    pub time: Option<String>,
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Feeding ID to delete.
    #[arg(allow_negative_numbers = true)]
    pub id: FeedingId,
}

#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Day to clear: `today` or `YYYY/M/D`.
    #[arg(default_value = "today")]
    pub day: RequestedDay,
}

/// User management actions.
#[derive(Debug, Subcommand)]
pub enum UsersAction {
    /// List users.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Add a user.
    Add {
        /// Display name.
        name: String,
    },
}
