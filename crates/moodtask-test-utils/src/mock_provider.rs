// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider adapter for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with pre-configured replies,
//! enabling fast, CI-runnable tests without calling the Gemini API.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use moodtask_core::traits::{PluginAdapter, ProviderAdapter};
use moodtask_core::types::{AdapterType, CompletionRequest, CompletionResponse, HealthStatus};
use moodtask_core::MoodtaskError;

/// Model name reported on every mock completion.
pub const MOCK_MODEL: &str = "mock-model";

/// A mock provider that replays scripted completions and errors.
///
/// Replies are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" text is returned. Every prompt received is
/// recorded for later assertions.
#[derive(Clone)]
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty reply queue.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock provider pre-loaded with the given completions.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(responses.into_iter().map(Ok).collect())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a completion to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.replies.lock().await.push_back(Ok(text.into()));
    }

    /// Queue a provider failure carrying `message`.
    pub async fn add_error(&self, message: impl Into<String>) {
        self.replies.lock().await.push_back(Err(message.into()));
    }

    /// All prompts received so far, oldest first.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    /// Number of completion calls made.
    pub async fn call_count(&self) -> usize {
        self.prompts.lock().await.len()
    }

    async fn next_reply(&self) -> Result<String, String> {
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok("mock response".to_string()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, MoodtaskError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MoodtaskError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, MoodtaskError> {
        self.prompts.lock().await.push(request.prompt);
        match self.next_reply().await {
            Ok(text) => Ok(CompletionResponse {
                text,
                model: MOCK_MODEL.to_string(),
            }),
            Err(message) => Err(MoodtaskError::Provider {
                message,
                source: None,
            }),
        }
    }
}
