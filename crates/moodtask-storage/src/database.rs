// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use chrono::{DateTime, Utc};
use moodtask_core::MoodtaskError;
use tracing::debug;

use crate::migrations::run_migrations;

/// Handle to the single SQLite connection.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path` in WAL mode and
    /// applies pending migrations.
    pub async fn open(path: &str) -> Result<Self, MoodtaskError> {
        Self::open_with_wal(path, true).await
    }

    /// Like [`Database::open`], with explicit control over WAL mode.
    pub async fn open_with_wal(path: &str, wal_mode: bool) -> Result<Self, MoodtaskError> {
        if let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| MoodtaskError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| MoodtaskError::Storage {
                source: Box::new(e),
            })?;

        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if wal_mode {
                // journal_mode returns a row, so it cannot go through execute_batch.
                conn.query_row("PRAGMA journal_mode = WAL;", [], |_| Ok(()))?;
            }
            conn.execute_batch(
                "PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout = 5000;
                 PRAGMA foreign_keys = OFF;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| -> Result<Result<(), MoodtaskError>, rusqlite::Error> {
            Ok(run_migrations(conn))
        })
        .await
        .map_err(map_tr_err)??;

        debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The tokio-rusqlite connection every query goes through.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoints the WAL so the main database file is self-contained.
    pub async fn close(&self) -> Result<(), MoodtaskError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.query_row("PRAGMA wal_checkpoint(TRUNCATE);", [], |_| Ok(()))?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Convert a tokio-rusqlite error into MoodtaskError::Storage.
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> MoodtaskError {
    MoodtaskError::Storage {
        source: Box::new(e),
    }
}

/// Fixed-width UTC timestamp so lexical order matches time order.
pub(crate) fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.9fZ").to_string()
}

/// Parses a stored timestamp, reporting failures against column `idx`.
pub(crate) fn parse_ts(idx: usize, raw: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Parses a strum-backed enum column.
pub(crate) fn parse_enum<T>(idx: usize, raw: &str) -> Result<T, rusqlite::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
