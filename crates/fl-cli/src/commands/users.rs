//! Users command for provisioning the people who feed.

use std::io::Write;

use anyhow::Result;
use fl_db::Database;

/// Lists users, one per line or as JSON.
pub fn list<W: Write>(writer: &mut W, db: &Database, json: bool) -> Result<()> {
    let users = db.list_users()?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&users)?)?;
        return Ok(());
    }

    if users.is_empty() {
        writeln!(writer, "No users. Add one with 'fl users add <name>'.")?;
        return Ok(());
    }

    writeln!(writer, "{:>4}  Name", "ID")?;
    for user in users {
        writeln!(writer, "{:>4}  {}", user.id, user.name)?;
    }
    Ok(())
}

/// Adds a user.
pub fn add<W: Write>(writer: &mut W, db: &mut Database, name: &str) -> Result<()> {
    let user = db.insert_user(name)?;
    tracing::info!(user_id = %user.id, name = %user.name, "added user");
    writeln!(writer, "Added user #{}: {}", user.id, user.name)?;
    Ok(())
}
