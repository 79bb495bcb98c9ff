//! Feeding log CLI library.
//!
//! This crate provides the CLI interface for the feeding log.

mod cli;
pub mod commands;
mod config;

pub use cli::{ClearArgs, Cli, Commands, FeedArgs, LogArgs, RemoveArgs, UsersAction};
pub use config::Config;
