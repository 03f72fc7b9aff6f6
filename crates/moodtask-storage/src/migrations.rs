// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! SQL migration files are compiled into the binary at build time via
//! `embed_migrations!`. Migrations run automatically on database open.

use moodtask_core::MoodtaskError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against the given connection.
///
/// Refinery tracks applied migrations in its own `refinery_schema_history` table.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), MoodtaskError> {
    let report = embedded::migrations::runner()
        .run(conn)
        .map_err(|e| MoodtaskError::Storage {
            source: format!("migration failed: {e}").into(),
        })?;
    for migration in report.applied_migrations() {
        tracing::debug!(migration = %migration, "applied migration");
    }
    Ok(())
}
