// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The AI endpoint pipeline: entitlement, validation, prompt, one provider
//! call, parse-or-degrade, persist.

use std::sync::Arc;

use chrono::Utc;
use moodtask_core::types::CompletionRequest;
use moodtask_core::{AiTaskAssist, Mood, MoodtaskError, ProviderAdapter, StorageAdapter};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::prompt::{breakdown_prompt, prioritization_prompt};
use crate::request::{BreakdownRequest, MISSING_FIELDS, PrioritizationRequest};
use crate::suggestion::{BreakdownSuggestion, PrioritizationSuggestion};

/// Error message returned to callers without dev mode.
pub const ENTITLEMENT_REQUIRED: &str = "AI features require subscription or dev mode";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownResponse {
    pub success: bool,
    pub suggestion: BreakdownSuggestion,
    /// `None` when the assist could not be recorded.
    pub assist_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizationResponse {
    pub success: bool,
    pub suggestion: PrioritizationSuggestion,
    pub mood: Mood,
}

/// Runs the AI breakdown and prioritization requests against a storage
/// backend and a completion provider.
#[derive(Clone)]
pub struct AssistService {
    storage: Arc<dyn StorageAdapter>,
    provider: Arc<dyn ProviderAdapter>,
}

impl AssistService {
    pub fn new(storage: Arc<dyn StorageAdapter>, provider: Arc<dyn ProviderAdapter>) -> Self {
        Self { storage, provider }
    }

    /// Breaks a task into subtasks and appends the result to the assist log.
    ///
    /// `body` is the raw request JSON; anything that is not an object is
    /// treated as an empty payload.
    pub async fn breakdown(&self, body: &Value) -> Result<BreakdownResponse, MoodtaskError> {
        self.ensure_entitled(body).await?;
        let req = decode::<BreakdownRequest>(body)?.validate()?;

        let prompt = breakdown_prompt(req.mood, &req.task_title, req.task_description.as_deref());
        let raw = self.complete(prompt).await?;
        let suggestion = BreakdownSuggestion::parse_or_fallback(&raw);

        let assist_id = self
            .record_assist(&req.user_id, &req.task_id, req.mood, &suggestion)
            .await;
        info!(
            user_id = %req.user_id,
            task_id = %req.task_id,
            mood = %req.mood,
            subtasks = suggestion.subtasks.len(),
            "task breakdown generated"
        );

        Ok(BreakdownResponse {
            success: true,
            suggestion,
            assist_id,
        })
    }

    /// Orders the given tasks for the user's mood. Nothing is persisted.
    pub async fn prioritize(&self, body: &Value) -> Result<PrioritizationResponse, MoodtaskError> {
        self.ensure_entitled(body).await?;
        let req = decode::<PrioritizationRequest>(body)?.validate()?;

        let prompt = prioritization_prompt(req.mood, &req.tasks);
        let raw = self.complete(prompt).await?;
        let suggestion = PrioritizationSuggestion::parse_or_fallback(&raw, &req.tasks);
        info!(
            user_id = %req.user_id,
            mood = %req.mood,
            tasks = req.tasks.len(),
            "task prioritization generated"
        );

        Ok(PrioritizationResponse {
            success: true,
            suggestion,
            mood: req.mood,
        })
    }

    /// Rejects callers whose profile is missing or lacks dev mode. Runs
    /// before any field validation.
    async fn ensure_entitled(&self, body: &Value) -> Result<(), MoodtaskError> {
        let user_id = body
            .get("userId")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty());
        let entitled = match user_id {
            Some(id) => self
                .storage
                .get_profile(id)
                .await?
                .is_some_and(|p| p.dev_mode_enabled),
            None => false,
        };
        if !entitled {
            debug!(user_id = ?user_id, "AI request rejected: dev mode not enabled");
            return Err(MoodtaskError::Entitlement(ENTITLEMENT_REQUIRED.to_string()));
        }
        Ok(())
    }

    async fn complete(&self, prompt: String) -> Result<String, MoodtaskError> {
        let response = self
            .provider
            .complete(CompletionRequest { prompt })
            .await
            .inspect_err(|e| warn!(error = %e, "completion failed"))?;
        debug!(model = %response.model, chars = response.text.len(), "completion received");
        Ok(response.text)
    }

    async fn record_assist(
        &self,
        user_id: &str,
        task_id: &str,
        mood: Mood,
        suggestion: &BreakdownSuggestion,
    ) -> Option<String> {
        let serialized = match serde_json::to_string(suggestion) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "failed to serialize assist suggestion");
                return None;
            }
        };
        let assist = AiTaskAssist {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            task_id: task_id.to_string(),
            suggestion: serialized,
            mood,
            timestamp: Utc::now(),
        };
        match self.storage.insert_assist(&assist).await {
            Ok(()) => Some(assist.id),
            Err(e) => {
                warn!(error = %e, task_id, "failed to store AI assist");
                None
            }
        }
    }
}

fn decode<T: DeserializeOwned + Default>(body: &Value) -> Result<T, MoodtaskError> {
    if !body.is_object() {
        return Ok(T::default());
    }
    serde_json::from_value(body.clone())
        .map_err(|_| MoodtaskError::Validation(MISSING_FIELDS.to_string()))
}
