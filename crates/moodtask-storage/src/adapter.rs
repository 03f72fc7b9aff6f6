// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;
use tracing::debug;

use moodtask_config::model::StorageConfig;
use moodtask_core::{
    AdapterType, AiTaskAssist, EmotionalState, FocusTask, HealthStatus, MoodtaskError,
    PluginAdapter, ProfilePatch, StorageAdapter, TaskPatch, TaskStatus, UserProfile,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed storage adapter.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`StorageAdapter::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`StorageAdapter::initialize`] is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// The open database handle, once initialized.
    pub fn database(&self) -> Option<&Database> {
        self.db.get()
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, MoodtaskError> {
        self.db.get().ok_or_else(|| MoodtaskError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, MoodtaskError> {
        let Some(db) = self.db.get() else {
            return Ok(HealthStatus::Unhealthy("storage not initialized".into()));
        };
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.query_row("SELECT 1", [], |_| Ok(()))?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MoodtaskError> {
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), MoodtaskError> {
        let path = self.config.database_path.clone();
        let db = Database::open_with_wal(&path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| MoodtaskError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), MoodtaskError> {
        self.db()?.close().await
    }

    // --- Profiles ---

    async fn create_profile(&self, profile: &UserProfile) -> Result<(), MoodtaskError> {
        queries::profiles::create_profile(self.db()?, profile).await
    }

    async fn get_profile(&self, id: &str) -> Result<Option<UserProfile>, MoodtaskError> {
        queries::profiles::get_profile(self.db()?, id).await
    }

    async fn update_profile(
        &self,
        id: &str,
        patch: &ProfilePatch,
    ) -> Result<UserProfile, MoodtaskError> {
        queries::profiles::update_profile(self.db()?, id, patch).await
    }

    // --- Emotional states ---

    async fn insert_emotional_state(&self, state: &EmotionalState) -> Result<(), MoodtaskError> {
        queries::emotional_states::insert_emotional_state(self.db()?, state).await
    }

    async fn list_emotional_states(
        &self,
        user_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<EmotionalState>, MoodtaskError> {
        queries::emotional_states::list_emotional_states(self.db()?, user_id, limit).await
    }

    async fn latest_emotional_state(
        &self,
        user_id: &str,
    ) -> Result<Option<EmotionalState>, MoodtaskError> {
        queries::emotional_states::latest_emotional_state(self.db()?, user_id).await
    }

    async fn emotional_states_between(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<EmotionalState>, MoodtaskError> {
        queries::emotional_states::emotional_states_between(self.db()?, user_id, start, end).await
    }

    // --- Tasks ---

    async fn create_task(&self, task: &FocusTask) -> Result<(), MoodtaskError> {
        queries::tasks::create_task(self.db()?, task).await
    }

    async fn get_task(&self, id: &str) -> Result<Option<FocusTask>, MoodtaskError> {
        queries::tasks::get_task(self.db()?, id).await
    }

    async fn list_tasks(
        &self,
        user_id: &str,
        status: Option<TaskStatus>,
    ) -> Result<Vec<FocusTask>, MoodtaskError> {
        queries::tasks::list_tasks(self.db()?, user_id, status).await
    }

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<FocusTask, MoodtaskError> {
        queries::tasks::update_task(self.db()?, id, patch).await
    }

    async fn delete_task(&self, id: &str) -> Result<(), MoodtaskError> {
        queries::tasks::delete_task(self.db()?, id).await
    }

    // --- AI assists ---

    async fn insert_assist(&self, assist: &AiTaskAssist) -> Result<(), MoodtaskError> {
        queries::assists::insert_assist(self.db()?, assist).await
    }

    async fn list_assists_for_task(
        &self,
        task_id: &str,
    ) -> Result<Vec<AiTaskAssist>, MoodtaskError> {
        queries::assists::list_assists_for_task(self.db()?, task_id).await
    }
}
