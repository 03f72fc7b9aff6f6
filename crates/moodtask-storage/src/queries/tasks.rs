// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Focus task CRUD operations.

use moodtask_core::{FocusTask, MoodtaskError, TaskPatch, TaskStatus};
use rusqlite::params;

use crate::database::{Database, format_ts, parse_enum, parse_ts};

const TASK_COLUMNS: &str = "id, user_id, title, description, status, created_at";

fn row_to_task(row: &rusqlite::Row<'_>) -> Result<FocusTask, rusqlite::Error> {
    let status: String = row.get(4)?;
    let created_at: String = row.get(5)?;
    Ok(FocusTask {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status: parse_enum::<TaskStatus>(4, &status)?,
        created_at: parse_ts(5, &created_at)?,
    })
}

fn query_task(conn: &rusqlite::Connection, id: &str) -> Result<Option<FocusTask>, rusqlite::Error> {
    let sql = format!("SELECT {TASK_COLUMNS} FROM focus_tasks WHERE id = ?1 LIMIT 1");
    match conn.query_row(&sql, params![id], row_to_task) {
        Ok(task) => Ok(Some(task)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Insert a new task.
pub async fn create_task(db: &Database, task: &FocusTask) -> Result<(), MoodtaskError> {
    let task = task.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO focus_tasks (id, user_id, title, description, status, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    task.id,
                    task.user_id,
                    task.title,
                    task.description,
                    task.status.to_string(),
                    format_ts(&task.created_at),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a task by ID.
pub async fn get_task(db: &Database, id: &str) -> Result<Option<FocusTask>, MoodtaskError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| query_task(conn, &id))
        .await
        .map_err(crate::database::map_tr_err)
}

/// A user's tasks, newest first, optionally filtered by status.
pub async fn list_tasks(
    db: &Database,
    user_id: &str,
    status: Option<TaskStatus>,
) -> Result<Vec<FocusTask>, MoodtaskError> {
    let user_id = user_id.to_string();
    let status = status.map(|s| s.to_string());
    db.connection()
        .call(move |conn| -> Result<Vec<FocusTask>, rusqlite::Error> {
            let sql = format!(
                "SELECT {TASK_COLUMNS} FROM focus_tasks \
                 WHERE user_id = ?1 AND (?2 IS NULL OR status = ?2) \
                 ORDER BY created_at DESC, rowid DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![user_id, status], row_to_task)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Apply a partial update inside one transaction and return the new row.
///
/// A blank replacement title is rejected before anything is written.
pub async fn update_task(
    db: &Database,
    id: &str,
    patch: &TaskPatch,
) -> Result<FocusTask, MoodtaskError> {
    let owned_id = id.to_string();
    let patch = patch.clone();
    let outcome = db
        .connection()
        .call(
            move |conn| -> Result<Option<Result<FocusTask, MoodtaskError>>, rusqlite::Error> {
                let tx = conn.transaction()?;
                let Some(mut task) = query_task(&tx, &owned_id)? else {
                    return Ok(None);
                };
                if let Err(e) = patch.apply(&mut task) {
                    return Ok(Some(Err(e)));
                }
                tx.execute(
                    "UPDATE focus_tasks SET title = ?1, description = ?2, status = ?3 \
                     WHERE id = ?4",
                    params![
                        task.title,
                        task.description,
                        task.status.to_string(),
                        task.id
                    ],
                )?;
                tx.commit()?;
                Ok(Some(Ok(task)))
            },
        )
        .await
        .map_err(crate::database::map_tr_err)?;

    match outcome {
        Some(result) => result,
        None => Err(MoodtaskError::NotFound {
            entity: "task",
            id: id.to_string(),
        }),
    }
}

/// Delete a task. Deleting an unknown id is a no-op.
pub async fn delete_task(db: &Database, id: &str) -> Result<(), MoodtaskError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute("DELETE FROM focus_tasks WHERE id = ?1", params![id])?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::setup_db;
    use chrono::{Duration, Utc};

    fn task_aged(user: &str, title: &str, days_old: i64) -> FocusTask {
        let mut task = FocusTask::new(user, title, None).unwrap();
        task.created_at = Utc::now() - Duration::days(days_old);
        task
    }

    #[tokio::test]
    async fn create_and_get_task_roundtrips() {
        let (db, _dir) = setup_db().await;
        let task = FocusTask::new("u1", "Write report", Some("Quarterly numbers".into())).unwrap();
        create_task(&db, &task).await.unwrap();

        let stored = get_task(&db, &task.id).await.unwrap().unwrap();
        assert_eq!(stored, task);
        assert!(get_task(&db, "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_newest_first_and_filters_by_status() {
        let (db, _dir) = setup_db().await;
        let old = task_aged("u1", "old", 5);
        let mid = task_aged("u1", "mid", 2);
        let new = task_aged("u1", "new", 0);
        let other = task_aged("u2", "other user", 0);
        for t in [&mid, &old, &new, &other] {
            create_task(&db, t).await.unwrap();
        }
        update_task(&db, &mid.id, &TaskPatch::status(TaskStatus::Completed))
            .await
            .unwrap();

        let all = list_tasks(&db, "u1", None).await.unwrap();
        let titles: Vec<&str> = all.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "mid", "old"]);

        let pending = list_tasks(&db, "u1", Some(TaskStatus::Pending)).await.unwrap();
        let titles: Vec<&str> = pending.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "old"]);
    }

    #[tokio::test]
    async fn update_rejects_blank_title_without_writing() {
        let (db, _dir) = setup_db().await;
        let task = task_aged("u1", "Keep me", 0);
        create_task(&db, &task).await.unwrap();

        let patch = TaskPatch {
            title: Some("  ".into()),
            status: Some(TaskStatus::Completed),
            ..TaskPatch::default()
        };
        let err = update_task(&db, &task.id, &patch).await.unwrap_err();
        assert!(matches!(err, MoodtaskError::Validation(_)));

        let stored = get_task(&db, &task.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Keep me");
        assert_eq!(stored.status, TaskStatus::Pending);
    }

    #[tokio::test]
    async fn update_missing_task_is_not_found() {
        let (db, _dir) = setup_db().await;
        let err = update_task(&db, "ghost", &TaskPatch::status(TaskStatus::Completed))
            .await
            .unwrap_err();
        assert!(matches!(err, MoodtaskError::NotFound { entity: "task", .. }));
    }

    #[tokio::test]
    async fn delete_removes_task_and_is_idempotent() {
        let (db, _dir) = setup_db().await;
        let task = task_aged("u1", "Temporary", 0);
        create_task(&db, &task).await.unwrap();

        delete_task(&db, &task.id).await.unwrap();
        assert!(get_task(&db, &task.id).await.unwrap().is_none());
        delete_task(&db, &task.id).await.unwrap();
    }
}
