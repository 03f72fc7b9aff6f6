// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Emotional state log operations. Rows are append-only.

use chrono::{DateTime, Utc};
use moodtask_core::{EmotionalState, Mood, MoodtaskError};
use rusqlite::params;

use crate::database::{Database, format_ts, parse_enum, parse_ts};

fn row_to_state(row: &rusqlite::Row<'_>) -> Result<EmotionalState, rusqlite::Error> {
    let mood: String = row.get(2)?;
    let timestamp: String = row.get(3)?;
    Ok(EmotionalState {
        id: row.get(0)?,
        user_id: row.get(1)?,
        mood: parse_enum::<Mood>(2, &mood)?,
        timestamp: parse_ts(3, &timestamp)?,
    })
}

/// Append one mood selection.
pub async fn insert_emotional_state(
    db: &Database,
    state: &EmotionalState,
) -> Result<(), MoodtaskError> {
    let state = state.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO emotional_states (id, user_id, mood, timestamp) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    state.id,
                    state.user_id,
                    state.mood.to_string(),
                    format_ts(&state.timestamp),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// A user's states, newest first. A negative limit means no limit.
pub async fn list_emotional_states(
    db: &Database,
    user_id: &str,
    limit: Option<i64>,
) -> Result<Vec<EmotionalState>, MoodtaskError> {
    let user_id = user_id.to_string();
    let limit = limit.unwrap_or(-1);
    db.connection()
        .call(move |conn| -> Result<Vec<EmotionalState>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, mood, timestamp FROM emotional_states \
                 WHERE user_id = ?1 ORDER BY timestamp DESC, rowid DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![user_id, limit], row_to_state)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The newest state, if the user has logged any.
pub async fn latest_emotional_state(
    db: &Database,
    user_id: &str,
) -> Result<Option<EmotionalState>, MoodtaskError> {
    let mut states = list_emotional_states(db, user_id, Some(1)).await?;
    Ok(states.pop())
}

/// States in the inclusive window `[start, end]`, oldest first.
pub async fn emotional_states_between(
    db: &Database,
    user_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<EmotionalState>, MoodtaskError> {
    let user_id = user_id.to_string();
    let (start, end) = (format_ts(&start), format_ts(&end));
    db.connection()
        .call(move |conn| -> Result<Vec<EmotionalState>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, mood, timestamp FROM emotional_states \
                 WHERE user_id = ?1 AND timestamp >= ?2 AND timestamp <= ?3 \
                 ORDER BY timestamp ASC, rowid ASC",
            )?;
            let rows = stmt.query_map(params![user_id, start, end], row_to_state)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::setup_db;
    use chrono::Duration;

    fn state_at(user: &str, mood: Mood, ts: DateTime<Utc>) -> EmotionalState {
        let mut state = EmotionalState::new(user, mood);
        state.timestamp = ts;
        state
    }

    #[tokio::test]
    async fn latest_state_is_newest_insert() {
        let (db, _dir) = setup_db().await;
        let now = Utc::now();
        insert_emotional_state(&db, &state_at("u1", Mood::Focused, now - Duration::hours(2)))
            .await
            .unwrap();
        insert_emotional_state(&db, &state_at("u1", Mood::LowEnergy, now))
            .await
            .unwrap();
        insert_emotional_state(&db, &state_at("u2", Mood::Overwhelmed, now + Duration::hours(1)))
            .await
            .unwrap();

        let latest = latest_emotional_state(&db, "u1").await.unwrap().unwrap();
        assert_eq!(latest.mood, Mood::LowEnergy);
        assert!(latest_emotional_state(&db, "u3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_newest_first_and_limited() {
        let (db, _dir) = setup_db().await;
        let base = Utc::now() - Duration::days(1);
        for (i, mood) in [Mood::Focused, Mood::Overwhelmed, Mood::LowEnergy]
            .into_iter()
            .enumerate()
        {
            insert_emotional_state(&db, &state_at("u1", mood, base + Duration::minutes(i as i64)))
                .await
                .unwrap();
        }

        let all = list_emotional_states(&db, "u1", None).await.unwrap();
        let moods: Vec<Mood> = all.iter().map(|s| s.mood).collect();
        assert_eq!(moods, vec![Mood::LowEnergy, Mood::Overwhelmed, Mood::Focused]);

        let two = list_emotional_states(&db, "u1", Some(2)).await.unwrap();
        assert_eq!(two.len(), 2);
    }

    #[tokio::test]
    async fn window_is_inclusive_and_oldest_first() {
        let (db, _dir) = setup_db().await;
        let start = Utc::now() - Duration::days(7);
        let end = start + Duration::days(7);
        insert_emotional_state(&db, &state_at("u1", Mood::Focused, start - Duration::seconds(1)))
            .await
            .unwrap();
        insert_emotional_state(&db, &state_at("u1", Mood::LowEnergy, end))
            .await
            .unwrap();
        insert_emotional_state(&db, &state_at("u1", Mood::Overwhelmed, start))
            .await
            .unwrap();

        let window = emotional_states_between(&db, "u1", start, end).await.unwrap();
        let moods: Vec<Mood> = window.iter().map(|s| s.mood).collect();
        assert_eq!(moods, vec![Mood::Overwhelmed, Mood::LowEnergy]);
    }
}
