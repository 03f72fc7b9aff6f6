// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles an initialized SQLite storage in a temp
//! directory and a [`MockProvider`], and seeds profiles and tasks so tests
//! can exercise the services and the HTTP router against real storage.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use moodtask_config::model::StorageConfig;
use moodtask_core::{
    EmotionalState, FocusTask, Mood, MoodtaskError, ProfilePatch, StorageAdapter, UserProfile,
};
use moodtask_storage::SqliteStorage;

use crate::mock_provider::MockProvider;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    profiles: Vec<(String, bool)>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            responses: Vec::new(),
            profiles: Vec::new(),
        }
    }

    /// Set mock provider responses.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    /// Seed a profile, optionally with dev mode (the AI entitlement) enabled.
    pub fn with_profile(mut self, id: &str, dev_mode: bool) -> Self {
        self.profiles.push((id.to_string(), dev_mode));
        self
    }

    /// Build the test harness, creating and migrating the temp database.
    pub async fn build(self) -> Result<TestHarness, MoodtaskError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| MoodtaskError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let storage = SqliteStorage::new(StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        });
        storage.initialize().await?;

        let harness = TestHarness {
            mock_provider: Arc::new(MockProvider::with_responses(self.responses)),
            storage: Arc::new(storage),
            _temp_dir: temp_dir,
        };
        for (id, dev_mode) in &self.profiles {
            harness.seed_profile(id, *dev_mode).await?;
        }
        Ok(harness)
    }
}

/// A test environment with a mock provider and temp storage.
pub struct TestHarness {
    /// The mock completion provider.
    pub mock_provider: Arc<MockProvider>,
    /// SQLite storage adapter (temp DB, cleaned up on drop).
    pub storage: Arc<SqliteStorage>,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Storage as the trait object the services take.
    pub fn storage_adapter(&self) -> Arc<dyn StorageAdapter> {
        self.storage.clone()
    }

    /// Creates a profile, enabling dev mode when asked.
    pub async fn seed_profile(&self, id: &str, dev_mode: bool) -> Result<UserProfile, MoodtaskError> {
        self.storage
            .create_profile(&UserProfile::new(id, None, None))
            .await?;
        let patch = ProfilePatch {
            dev_mode_enabled: Some(dev_mode),
            ..ProfilePatch::default()
        };
        self.storage.update_profile(id, &patch).await
    }

    /// Creates a pending task with an explicit creation time.
    pub async fn seed_task(
        &self,
        user_id: &str,
        title: &str,
        description: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> Result<FocusTask, MoodtaskError> {
        let mut task = FocusTask::new(user_id, title, description.map(str::to_string))?;
        task.created_at = created_at;
        self.storage.create_task(&task).await?;
        Ok(task)
    }

    /// Logs a mood at an explicit time.
    pub async fn seed_mood(
        &self,
        user_id: &str,
        mood: Mood,
        at: DateTime<Utc>,
    ) -> Result<EmotionalState, MoodtaskError> {
        let mut state = EmotionalState::new(user_id, mood);
        state.timestamp = at;
        self.storage.insert_emotional_state(&state).await?;
        Ok(state)
    }
}
