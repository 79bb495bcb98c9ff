//! Storage layer for the feeding log.
//!
//! Provides persistence for users and feeding events using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! Each command opens its own `Database`, does one read or one write, and drops it.
//! There is no locking beyond what `SQLite` itself provides.
//!
//! # Schema
//!
//! ## Timestamp Format
//!
//! Feeding times are stored as INTEGER milliseconds since the Unix epoch (UTC).
//! Day queries are half-open millisecond ranges whose bounds are computed from
//! local midnights by [`fl_core::DayWindow`], so `SQLite` never has to know the
//! local timezone.
//!
//! ## Identifiers
//!
//! `feedings.id` is `AUTOINCREMENT`, so ids of deleted feedings are never
//! handed out again.

mod feeding_log;

use std::path::Path;

use chrono::{DateTime, Utc};
use fl_core::{DateParseError, FeedingEvent, FeedingId, User, UserId, ValidationError};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

pub use feeding_log::FeedingLog;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored feeding time is outside the representable range.
    #[error("invalid timestamp for feeding {feeding_id}: {time_ms}")]
    InvalidTimestamp { feeding_id: i64, time_ms: i64 },
    /// A stored row carries an id that fails validation.
    #[error("invalid {table} row {row_id}")]
    InvalidId {
        table: &'static str,
        row_id: i64,
        #[source]
        source: ValidationError,
    },
    /// A user name was empty.
    #[error("user name cannot be empty")]
    EmptyUserName,
    /// Date or time input could not be resolved.
    #[error(transparent)]
    Date(#[from] DateParseError),
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// A feeding row as read from `SQLite`, before validation.
struct FeedingRow {
    id: i64,
    user_id: Option<i64>,
    time_ms: i64,
}

impl FeedingRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            time_ms: row.get(2)?,
        })
    }

    fn into_event(self) -> Result<FeedingEvent, DbError> {
        let id = FeedingId::new(self.id).map_err(|source| DbError::InvalidId {
            table: "feedings",
            row_id: self.id,
            source,
        })?;
        // Not a foreign key: any stored value is kept and shown as an unknown user.
        let user_id = self.user_id.map(UserId::from_raw);
        let timestamp =
            DateTime::from_timestamp_millis(self.time_ms).ok_or(DbError::InvalidTimestamp {
                feeding_id: self.id,
                time_ms: self.time_ms,
            })?;
        Ok(FeedingEvent {
            id,
            user_id,
            timestamp,
        })
    }
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL
            );

            -- user_id is not a foreign key; it may name a user that no longer exists.
            CREATE TABLE IF NOT EXISTS feedings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER,
                time_ms INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_feedings_time ON feedings(time_ms);
            ",
        )?;
        Ok(())
    }

    /// Adds a user and returns it with its assigned ID.
    pub fn insert_user(&mut self, name: &str) -> Result<User, DbError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DbError::EmptyUserName);
        }
        self.conn
            .execute("INSERT INTO users (name) VALUES (?)", params![name])?;
        let row_id = self.conn.last_insert_rowid();
        let id = UserId::new(row_id).map_err(|source| DbError::InvalidId {
            table: "users",
            row_id,
            source,
        })?;
        Ok(User {
            id,
            name: name.to_string(),
        })
    }

    /// Lists users ordered by ID.
    pub fn list_users(&self) -> Result<Vec<User>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM users ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let name: String = row.get(1)?;
            Ok((id, name))
        })?;
        let mut users = Vec::new();
        for row in rows {
            let (row_id, name) = row?;
            let id = UserId::new(row_id).map_err(|source| DbError::InvalidId {
                table: "users",
                row_id,
                source,
            })?;
            users.push(User { id, name });
        }
        Ok(users)
    }

    /// Records a feeding and returns it with its assigned ID.
    pub fn insert_feeding(
        &mut self,
        user_id: Option<UserId>,
        at: DateTime<Utc>,
    ) -> Result<FeedingEvent, DbError> {
        let time_ms = at.timestamp_millis();
        self.conn.execute(
            "INSERT INTO feedings (user_id, time_ms) VALUES (?, ?)",
            params![user_id.map(i64::from), time_ms],
        )?;
        FeedingRow {
            id: self.conn.last_insert_rowid(),
            user_id: user_id.map(i64::from),
            time_ms,
        }
        .into_event()
    }

    /// Fetches a single feeding by ID.
    pub fn get_feeding(&self, id: FeedingId) -> Result<Option<FeedingEvent>, DbError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, user_id, time_ms FROM feedings WHERE id = ?",
                params![id.get()],
                FeedingRow::from_row,
            )
            .optional()?;
        row.map(FeedingRow::into_event).transpose()
    }

    /// Lists all feedings ordered by time then ID.
    pub fn list_feedings(&self) -> Result<Vec<FeedingEvent>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, user_id, time_ms
            FROM feedings
            ORDER BY time_ms ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map([], FeedingRow::from_row)?;
        let mut feedings = Vec::new();
        for row in rows {
            feedings.push(row?.into_event()?);
        }
        Ok(feedings)
    }

    /// Lists feedings within a time range, ordered by time then ID.
    ///
    /// The range is inclusive of `start` and exclusive of `end`.
    pub fn list_feedings_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<FeedingEvent>, DbError> {
        if end <= start {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare(
            "
            SELECT id, user_id, time_ms
            FROM feedings
            WHERE time_ms >= ? AND time_ms < ?
            ORDER BY time_ms ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map(
            params![start.timestamp_millis(), end.timestamp_millis()],
            FeedingRow::from_row,
        )?;
        let mut feedings = Vec::new();
        for row in rows {
            feedings.push(row?.into_event()?);
        }
        Ok(feedings)
    }

    /// Deletes a feeding by ID. Returns whether a row was removed.
    pub fn delete_feeding(&mut self, id: FeedingId) -> Result<bool, DbError> {
        let deleted = self
            .conn
            .execute("DELETE FROM feedings WHERE id = ?", params![id.get()])?;
        Ok(deleted > 0)
    }

    /// Deletes feedings within `[start, end)`. Returns the number removed.
    pub fn delete_feedings_in_range(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<usize, DbError> {
        if end <= start {
            return Ok(0);
        }
        let deleted = self.conn.execute(
            "DELETE FROM feedings WHERE time_ms >= ? AND time_ms < ?",
            params![start.timestamp_millis(), end.timestamp_millis()],
        )?;
        Ok(deleted)
    }

    /// Counts all stored feedings.
    pub fn count_feedings(&self) -> Result<usize, DbError> {
        let count: usize = self
            .conn
            .query_row("SELECT COUNT(*) FROM feedings", [], |row| row.get(0))?;
        Ok(count)
    }
}
