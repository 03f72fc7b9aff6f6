// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offline subcommands that run the engine directly and print JSON.

use chrono::{Duration, Local, Utc};
use moodtask_config::model::MoodtaskConfig;
use moodtask_core::{Mood, MoodtaskError, StorageAdapter, TaskStatus};
use moodtask_engine::{analyze, animation_for, prioritize, select_for_context, theme_for};
use serde::Serialize;

use crate::serve::open_storage;

fn to_json<T: Serialize>(value: &T) -> Result<String, MoodtaskError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| MoodtaskError::Internal(format!("failed to render output: {e}")))
}

fn parse_mood(value: &str) -> Result<Mood, MoodtaskError> {
    Mood::parse(value).ok_or_else(|| MoodtaskError::Validation("Invalid mood provided".into()))
}

/// Ranks a user's pending tasks with the heuristic engine.
pub async fn run_prioritize(
    config: &MoodtaskConfig,
    user_id: &str,
    mood: &str,
) -> Result<String, MoodtaskError> {
    let storage = open_storage(config).await?;
    let tasks = storage.list_tasks(user_id, Some(TaskStatus::Pending)).await?;
    storage.close().await?;
    to_json(&prioritize(&tasks, mood, Utc::now()))
}

/// Summarizes a user's moods over the last `days` days.
pub async fn run_analyze(
    config: &MoodtaskConfig,
    user_id: &str,
    days: i64,
) -> Result<String, MoodtaskError> {
    if days <= 0 {
        return Err(MoodtaskError::Validation(
            "Days must be a positive number".into(),
        ));
    }
    let storage = open_storage(config).await?;
    let end = Utc::now();
    let states = storage
        .emotional_states_between(user_id, end - Duration::days(days), end)
        .await?;
    storage.close().await?;
    to_json(&analyze(&states, days))
}

/// Picks a quote for `mood`, from the local clock's bucket unless `context`
/// names one.
pub fn run_quote(mood: &str, context: Option<&str>) -> Result<String, MoodtaskError> {
    let mood = parse_mood(mood)?;
    let selection = select_for_context(mood, context, &[], &Local::now(), &mut rand::thread_rng());
    to_json(&selection)
}

#[derive(Serialize)]
struct ThemeOutput {
    colors: moodtask_engine::ThemeColors,
    animation: moodtask_engine::AnimationProfile,
}

/// Prints the colors and animation profile for `mood` (focused when absent).
pub fn run_theme(mood: Option<&str>) -> Result<String, MoodtaskError> {
    let mood = mood.map(parse_mood).transpose()?;
    to_json(&ThemeOutput {
        colors: theme_for(mood),
        animation: animation_for(mood),
    })
}

/// Renders the effective configuration as TOML with the API key masked.
pub fn run_config(config: &MoodtaskConfig) -> Result<String, MoodtaskError> {
    let mut shown = config.clone();
    if shown.gemini.api_key.is_some() {
        shown.gemini.api_key = Some("********".to_string());
    }
    toml::to_string_pretty(&shown)
        .map_err(|e| MoodtaskError::Internal(format!("failed to render config: {e}")))
}
