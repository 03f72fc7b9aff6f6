// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait: the persistence gateway for profiles, emotional
//! states, tasks, and AI assists.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::MoodtaskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{
    AiTaskAssist, EmotionalState, FocusTask, ProfilePatch, TaskPatch, TaskStatus, UserProfile,
};

/// Adapter for the persistence backend.
///
/// Every lookup is an equality filter on `id` or `user_id`; per-user row
/// isolation is the caller's filter, not a separate policy layer.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), MoodtaskError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), MoodtaskError>;

    // --- Profiles ---

    async fn create_profile(&self, profile: &UserProfile) -> Result<(), MoodtaskError>;

    async fn get_profile(&self, id: &str) -> Result<Option<UserProfile>, MoodtaskError>;

    /// Applies `patch` and returns the updated row. Fails with `NotFound`
    /// when no profile has this id.
    async fn update_profile(
        &self,
        id: &str,
        patch: &ProfilePatch,
    ) -> Result<UserProfile, MoodtaskError>;

    // --- Emotional states ---

    async fn insert_emotional_state(&self, state: &EmotionalState) -> Result<(), MoodtaskError>;

    /// Newest first, optionally limited.
    async fn list_emotional_states(
        &self,
        user_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<EmotionalState>, MoodtaskError>;

    /// The most recent state, which defines the user's current mood.
    async fn latest_emotional_state(
        &self,
        user_id: &str,
    ) -> Result<Option<EmotionalState>, MoodtaskError>;

    /// States with `start <= timestamp <= end`, oldest first.
    async fn emotional_states_between(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<EmotionalState>, MoodtaskError>;

    // --- Tasks ---

    async fn create_task(&self, task: &FocusTask) -> Result<(), MoodtaskError>;

    async fn get_task(&self, id: &str) -> Result<Option<FocusTask>, MoodtaskError>;

    /// Newest first, optionally filtered by status.
    async fn list_tasks(
        &self,
        user_id: &str,
        status: Option<TaskStatus>,
    ) -> Result<Vec<FocusTask>, MoodtaskError>;

    /// Applies `patch` and returns the updated row.
    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<FocusTask, MoodtaskError>;

    async fn delete_task(&self, id: &str) -> Result<(), MoodtaskError>;

    // --- AI assists ---

    async fn insert_assist(&self, assist: &AiTaskAssist) -> Result<(), MoodtaskError>;

    /// Newest first.
    async fn list_assists_for_task(
        &self,
        task_id: &str,
    ) -> Result<Vec<AiTaskAssist>, MoodtaskError>;
}
