//! CLI subcommand implementations.

pub mod clear;
pub mod feed;
pub mod log;
pub mod remove;
pub mod users;
