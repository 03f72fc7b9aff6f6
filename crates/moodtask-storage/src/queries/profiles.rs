// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User profile CRUD operations.

use chrono::Utc;
use moodtask_core::{MoodtaskError, ProfilePatch, UserProfile};
use rusqlite::params;

use crate::database::{Database, format_ts, parse_ts};

const SELECT_PROFILE: &str = "SELECT id, display_name, neurodivergent_status, dev_mode_enabled, \
     created_at, updated_at FROM user_profiles WHERE id = ?1";

fn row_to_profile(row: &rusqlite::Row<'_>) -> Result<UserProfile, rusqlite::Error> {
    let created_at: String = row.get(4)?;
    let updated_at: String = row.get(5)?;
    Ok(UserProfile {
        id: row.get(0)?,
        display_name: row.get(1)?,
        neurodivergent_status: row.get(2)?,
        dev_mode_enabled: row.get(3)?,
        created_at: parse_ts(4, &created_at)?,
        updated_at: parse_ts(5, &updated_at)?,
    })
}

fn query_profile(
    conn: &rusqlite::Connection,
    id: &str,
) -> Result<Option<UserProfile>, rusqlite::Error> {
    match conn.query_row(SELECT_PROFILE, params![id], row_to_profile) {
        Ok(profile) => Ok(Some(profile)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Create a new profile.
pub async fn create_profile(db: &Database, profile: &UserProfile) -> Result<(), MoodtaskError> {
    let profile = profile.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO user_profiles (id, display_name, neurodivergent_status, \
                 dev_mode_enabled, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    profile.id,
                    profile.display_name,
                    profile.neurodivergent_status,
                    profile.dev_mode_enabled,
                    format_ts(&profile.created_at),
                    format_ts(&profile.updated_at),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a profile by ID.
pub async fn get_profile(db: &Database, id: &str) -> Result<Option<UserProfile>, MoodtaskError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| query_profile(conn, &id))
        .await
        .map_err(crate::database::map_tr_err)
}

/// Apply a partial update inside one transaction and return the new row.
pub async fn update_profile(
    db: &Database,
    id: &str,
    patch: &ProfilePatch,
) -> Result<UserProfile, MoodtaskError> {
    let owned_id = id.to_string();
    let patch = patch.clone();
    let updated = db
        .connection()
        .call(move |conn| -> Result<Option<UserProfile>, rusqlite::Error> {
            let tx = conn.transaction()?;
            let Some(mut profile) = query_profile(&tx, &owned_id)? else {
                return Ok(None);
            };
            patch.apply(&mut profile, Utc::now());
            tx.execute(
                "UPDATE user_profiles SET display_name = ?1, neurodivergent_status = ?2, \
                 dev_mode_enabled = ?3, updated_at = ?4 WHERE id = ?5",
                params![
                    profile.display_name,
                    profile.neurodivergent_status,
                    profile.dev_mode_enabled,
                    format_ts(&profile.updated_at),
                    profile.id,
                ],
            )?;
            tx.commit()?;
            Ok(Some(profile))
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    updated.ok_or_else(|| MoodtaskError::NotFound {
        entity: "profile",
        id: id.to_string(),
    })
}
