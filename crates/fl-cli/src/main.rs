use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fl_cli::commands::{clear, feed, log, remove, users};
use fl_cli::{Cli, Commands, Config, UsersAction};
use fl_db::{Database, FeedingLog};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = Database::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr; stdout carries command output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let (mut db, _config) = open_database(cli.config.as_deref())?;
    let mut stdout = std::io::stdout().lock();

    match command {
        Commands::Users(action) => match action {
            UsersAction::List { json } => users::list(&mut stdout, &db, *json)?,
            UsersAction::Add { name } => users::add(&mut stdout, &mut db, name)?,
        },
        Commands::Log(args) => {
            let feeding_log = FeedingLog::local(db);
            log::run(&mut stdout, &feeding_log, args, Utc::now())?;
        }
        Commands::Feed(args) => {
            let mut feeding_log = FeedingLog::local(db);
            feed::run(&mut stdout, &mut feeding_log, args, Utc::now())?;
        }
        Commands::Remove(args) => {
            let mut feeding_log = FeedingLog::local(db);
            remove::run(&mut stdout, &mut feeding_log, args)?;
        }
        Commands::Clear(args) => {
            let mut feeding_log = FeedingLog::local(db);
            clear::run(&mut stdout, &mut feeding_log, args, Utc::now())?;
        }
    }

    stdout.flush()?;
    Ok(())
}
