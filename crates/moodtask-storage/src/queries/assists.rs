// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI assist log. Rows are append-only and survive task deletion.

use moodtask_core::{AiTaskAssist, Mood, MoodtaskError};
use rusqlite::params;

use crate::database::{Database, format_ts, parse_enum, parse_ts};

/// Append one assist record.
pub async fn insert_assist(db: &Database, assist: &AiTaskAssist) -> Result<(), MoodtaskError> {
    let assist = assist.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO ai_task_assists (id, user_id, task_id, suggestion, mood, timestamp) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    assist.id,
                    assist.user_id,
                    assist.task_id,
                    assist.suggestion,
                    assist.mood.to_string(),
                    format_ts(&assist.timestamp),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Assists recorded for a task, newest first.
pub async fn list_assists_for_task(
    db: &Database,
    task_id: &str,
) -> Result<Vec<AiTaskAssist>, MoodtaskError> {
    let task_id = task_id.to_string();
    db.connection()
        .call(move |conn| -> Result<Vec<AiTaskAssist>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, task_id, suggestion, mood, timestamp FROM ai_task_assists \
                 WHERE task_id = ?1 ORDER BY timestamp DESC, rowid DESC",
            )?;
            let rows = stmt.query_map(params![task_id], |row| {
                let mood: String = row.get(4)?;
                let timestamp: String = row.get(5)?;
                Ok(AiTaskAssist {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    task_id: row.get(2)?,
                    suggestion: row.get(3)?,
                    mood: parse_enum::<Mood>(4, &mood)?,
                    timestamp: parse_ts(5, &timestamp)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}
