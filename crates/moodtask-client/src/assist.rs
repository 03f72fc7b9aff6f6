// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI results: calls the gateway, tracks loading/error, and caches the
//! last breakdown per task and the last prioritization.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use moodtask_assist::{
    AssistTaskInput, BreakdownRequest, BreakdownSuggestion, PrioritizationRequest,
    PrioritizationSuggestion,
};
use moodtask_core::{AiTaskAssist, FocusTask, Mood, MoodtaskError, StorageAdapter};
use tokio::sync::{Mutex, watch};
use tracing::warn;

use crate::api::GatewayClient;

/// Observable request status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssistStatus {
    pub loading: bool,
    pub error: Option<String>,
}

/// Breakdowns kept in memory; the oldest task's entry is dropped first.
pub const MAX_CACHED_BREAKDOWNS: usize = 50;

#[derive(Debug, Default)]
struct AssistCache {
    breakdowns: HashMap<String, BreakdownSuggestion>,
    order: VecDeque<String>,
    last_prioritization: Option<PrioritizationSuggestion>,
}

impl AssistCache {
    fn remember_breakdown(&mut self, task_id: &str, suggestion: BreakdownSuggestion) {
        if self
            .breakdowns
            .insert(task_id.to_string(), suggestion)
            .is_some()
        {
            self.order.retain(|id| id != task_id);
        }
        self.order.push_back(task_id.to_string());
        while self.order.len() > MAX_CACHED_BREAKDOWNS {
            if let Some(oldest) = self.order.pop_front() {
                self.breakdowns.remove(&oldest);
            }
        }
    }
}

/// AI request state. Requests are serialized by `in_flight`, held for the
/// gateway round trip; `cache` is only locked to read or store a result.
pub struct AssistStore {
    client: GatewayClient,
    storage: Arc<dyn StorageAdapter>,
    in_flight: Mutex<()>,
    cache: Mutex<AssistCache>,
    status: watch::Sender<AssistStatus>,
}

impl AssistStore {
    pub fn new(client: GatewayClient, storage: Arc<dyn StorageAdapter>) -> Self {
        Self {
            client,
            storage,
            in_flight: Mutex::new(()),
            cache: Mutex::new(AssistCache::default()),
            status: watch::Sender::new(AssistStatus::default()),
        }
    }

    /// Requests a breakdown of `task` and caches it under the task id.
    pub async fn task_breakdown(
        &self,
        task: &FocusTask,
        mood: Mood,
        user_id: &str,
    ) -> Result<BreakdownSuggestion, MoodtaskError> {
        let _guard = self.in_flight.lock().await;
        self.begin();
        let request = BreakdownRequest {
            task_id: Some(task.id.clone()),
            user_id: Some(user_id.to_string()),
            mood: Some(mood.to_string()),
            task_title: Some(task.title.clone()),
            task_description: task.description.clone(),
        };
        let response = self.finish(self.client.task_breakdown(&request).await)?;
        self.cache
            .lock()
            .await
            .remember_breakdown(&task.id, response.suggestion.clone());
        Ok(response.suggestion)
    }

    /// Requests an AI ordering of `tasks` and caches it.
    pub async fn task_prioritization(
        &self,
        tasks: &[FocusTask],
        mood: Mood,
        user_id: &str,
    ) -> Result<PrioritizationSuggestion, MoodtaskError> {
        let _guard = self.in_flight.lock().await;
        self.begin();
        let request = PrioritizationRequest {
            user_id: Some(user_id.to_string()),
            mood: Some(mood.to_string()),
            tasks: Some(
                tasks
                    .iter()
                    .map(|t| AssistTaskInput {
                        id: Some(t.id.clone()),
                        title: t.title.clone(),
                        description: t.description.clone(),
                    })
                    .collect(),
            ),
        };
        let response = self.finish(self.client.task_prioritization(&request).await)?;
        self.cache.lock().await.last_prioritization = Some(response.suggestion.clone());
        Ok(response.suggestion)
    }

    /// Recorded breakdowns for a task, newest first. Storage failures are
    /// logged and read as an empty log.
    pub async fn task_assists(&self, task_id: &str) -> Vec<AiTaskAssist> {
        match self.storage.list_assists_for_task(task_id).await {
            Ok(assists) => assists,
            Err(e) => {
                warn!(error = %e, task_id, "error fetching task assists");
                Vec::new()
            }
        }
    }

    pub async fn cached_breakdown(&self, task_id: &str) -> Option<BreakdownSuggestion> {
        self.cache.lock().await.breakdowns.get(task_id).cloned()
    }

    pub async fn last_prioritization(&self) -> Option<PrioritizationSuggestion> {
        self.cache.lock().await.last_prioritization.clone()
    }

    pub fn status(&self) -> AssistStatus {
        self.status.borrow().clone()
    }

    /// A receiver that observes every loading/error transition.
    pub fn subscribe(&self) -> watch::Receiver<AssistStatus> {
        self.status.subscribe()
    }

    fn begin(&self) {
        self.status.send_replace(AssistStatus {
            loading: true,
            error: None,
        });
    }

    fn finish<T>(&self, result: Result<T, MoodtaskError>) -> Result<T, MoodtaskError> {
        let error = result.as_ref().err().map(MoodtaskError::public_message);
        self.status.send_replace(AssistStatus {
            loading: false,
            error,
        });
        result
    }
}
