// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The user's task list, cached newest first.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use moodtask_core::{FocusTask, MoodtaskError, StorageAdapter, TaskPatch};
use moodtask_engine::Prioritization;
use tokio::sync::Mutex;
use tracing::debug;

pub struct TaskStore {
    storage: Arc<dyn StorageAdapter>,
    tasks: Mutex<Vec<FocusTask>>,
}

impl TaskStore {
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        Self {
            storage,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Replaces the cache with every task of the user, newest first.
    pub async fn fetch_tasks(&self, user_id: &str) -> Result<Vec<FocusTask>, MoodtaskError> {
        let mut tasks = self.tasks.lock().await;
        *tasks = self.storage.list_tasks(user_id, None).await?;
        Ok(tasks.clone())
    }

    pub async fn create_task(
        &self,
        user_id: &str,
        title: &str,
        description: Option<String>,
    ) -> Result<FocusTask, MoodtaskError> {
        let mut tasks = self.tasks.lock().await;
        let task = FocusTask::new(user_id, title, description)?;
        self.storage.create_task(&task).await?;
        debug!(task_id = %task.id, "task created");
        tasks.insert(0, task.clone());
        Ok(task)
    }

    pub async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<FocusTask, MoodtaskError> {
        let mut tasks = self.tasks.lock().await;
        self.apply_update(&mut tasks, id, patch).await
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), MoodtaskError> {
        let mut tasks = self.tasks.lock().await;
        self.storage.delete_task(id).await?;
        tasks.retain(|t| t.id != id);
        Ok(())
    }

    /// Flips a cached task between completed and pending. Returns `None`
    /// without touching storage when `id` is not in the cache.
    pub async fn toggle_status(&self, id: &str) -> Result<Option<FocusTask>, MoodtaskError> {
        let mut tasks = self.tasks.lock().await;
        let Some(current) = tasks.iter().find(|t| t.id == id).map(|t| t.status) else {
            return Ok(None);
        };
        let patch = TaskPatch::status(current.toggled());
        self.apply_update(&mut tasks, id, &patch).await.map(Some)
    }

    /// Ranks the cached tasks with the local heuristic.
    pub async fn prioritize(&self, mood: &str, now: DateTime<Utc>) -> Prioritization {
        let tasks = self.tasks.lock().await;
        moodtask_engine::prioritize(&tasks, mood, now)
    }

    pub async fn tasks(&self) -> Vec<FocusTask> {
        self.tasks.lock().await.clone()
    }

    async fn apply_update(
        &self,
        tasks: &mut [FocusTask],
        id: &str,
        patch: &TaskPatch,
    ) -> Result<FocusTask, MoodtaskError> {
        let updated = self.storage.update_task(id, patch).await?;
        if let Some(slot) = tasks.iter_mut().find(|t| t.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use moodtask_core::TaskStatus;
    use moodtask_test_utils::TestHarness;

    #[tokio::test]
    async fn create_prepends_and_fetch_orders_newest_first() {
        let h = TestHarness::builder().build().await.unwrap();
        let now = Utc::now();
        h.seed_task("u1", "Older", None, now - Duration::days(2)).await.unwrap();
        h.seed_task("u1", "Newer", None, now - Duration::days(1)).await.unwrap();
        let store = TaskStore::new(h.storage_adapter());

        let titles: Vec<String> = store
            .fetch_tasks("u1")
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["Newer", "Older"]);

        store.create_task("u1", "Newest", None).await.unwrap();
        assert_eq!(store.tasks().await[0].title, "Newest");
    }

    #[tokio::test]
    async fn blank_title_is_rejected_without_caching() {
        let h = TestHarness::builder().build().await.unwrap();
        let store = TaskStore::new(h.storage_adapter());
        assert!(store.create_task("u1", "  ", None).await.is_err());
        assert!(store.tasks().await.is_empty());
    }

    #[tokio::test]
    async fn toggle_round_trips_and_ignores_unknown_ids() {
        let h = TestHarness::builder().build().await.unwrap();
        let store = TaskStore::new(h.storage_adapter());
        let task = store.create_task("u1", "Stretch", None).await.unwrap();

        let done = store.toggle_status(&task.id).await.unwrap().unwrap();
        assert_eq!(done.status, TaskStatus::Completed);
        let stored = h.storage.get_task(&task.id).await.unwrap().unwrap();
        assert_eq!(stored.status, TaskStatus::Completed);

        let reopened = store.toggle_status(&task.id).await.unwrap().unwrap();
        assert_eq!(reopened.status, TaskStatus::Pending);

        assert!(store.toggle_status("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_from_cache_and_storage() {
        let h = TestHarness::builder().build().await.unwrap();
        let store = TaskStore::new(h.storage_adapter());
        let task = store.create_task("u1", "Bin day", None).await.unwrap();

        store.delete_task(&task.id).await.unwrap();
        assert!(store.tasks().await.is_empty());
        assert!(h.storage.get_task(&task.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_of_missing_task_is_not_found() {
        let h = TestHarness::builder().build().await.unwrap();
        let store = TaskStore::new(h.storage_adapter());
        let err = store
            .update_task("nope", &TaskPatch::status(TaskStatus::Completed))
            .await
            .unwrap_err();
        assert!(matches!(err, MoodtaskError::NotFound { .. }));
    }

    #[tokio::test]
    async fn local_prioritization_skips_completed() {
        let h = TestHarness::builder().build().await.unwrap();
        let store = TaskStore::new(h.storage_adapter());
        store.create_task("u1", "Buy milk", None).await.unwrap();
        let done = store.create_task("u1", "Done already", None).await.unwrap();
        store.toggle_status(&done.id).await.unwrap();

        let ranking = store.prioritize("overwhelmed", Utc::now()).await;
        assert_eq!(ranking.total_tasks, 1);
        assert_eq!(ranking.prioritized_tasks[0].task.title, "Buy milk");
        assert_eq!(ranking.prioritized_tasks[0].priority, 6);
    }
}
