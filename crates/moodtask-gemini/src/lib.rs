// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini provider adapter for Moodtask.
//!
//! This crate implements [`ProviderAdapter`] for the Gemini `generateContent`
//! API: one prompt in, one completion text out.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use moodtask_config::model::GeminiConfig;
use moodtask_core::error::MoodtaskError;
use moodtask_core::traits::{PluginAdapter, ProviderAdapter};
use moodtask_core::types::{AdapterType, CompletionRequest, CompletionResponse, HealthStatus};
use tracing::{debug, info, warn};

use crate::client::GeminiClient;

/// Environment variable consulted when the config carries no API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const MISSING_KEY: &str = "Gemini API key not configured";

/// Gemini provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config -> `GEMINI_API_KEY` env var. A provider
/// without a key still starts; each completion then fails with
/// `Gemini API key not configured`.
pub struct GeminiProvider {
    client: Option<GeminiClient>,
    model: String,
}

impl GeminiProvider {
    /// Creates a provider from the `[gemini]` config section.
    pub fn new(config: &GeminiConfig) -> Result<Self, MoodtaskError> {
        Self::with_api_key(config, resolve_api_key(&config.api_key))
    }

    /// Creates a provider with an explicit key, bypassing env lookup.
    pub fn with_api_key(
        config: &GeminiConfig,
        api_key: Option<String>,
    ) -> Result<Self, MoodtaskError> {
        let client = match api_key {
            Some(key) => Some(GeminiClient::new(
                &key,
                config.model.clone(),
                config.base_url.clone(),
                Duration::from_secs(config.timeout_secs),
            )?),
            None => {
                warn!("no Gemini API key configured; AI endpoints will fail");
                None
            }
        };

        info!(model = %config.model, "Gemini provider initialized");
        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl PluginAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, MoodtaskError> {
        // No upstream call: a probe would spend quota.
        Ok(match self.client {
            Some(_) => HealthStatus::Healthy,
            None => HealthStatus::Degraded(MISSING_KEY.into()),
        })
    }

    async fn shutdown(&self) -> Result<(), MoodtaskError> {
        debug!("Gemini provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for GeminiProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, MoodtaskError> {
        let client = self.client.as_ref().ok_or_else(|| MoodtaskError::Provider {
            message: MISSING_KEY.into(),
            source: None,
        })?;
        let text = client.generate(&request.prompt).await?;
        Ok(CompletionResponse {
            text,
            model: self.model.clone(),
        })
    }
}

/// Resolves the API key: a non-empty config value wins, then the env var.
fn resolve_api_key(config_key: &Option<String>) -> Option<String> {
    if let Some(key) = config_key
        && !key.trim().is_empty()
    {
        return Some(key.clone());
    }
    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|k| !k.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(base_url: &str) -> GeminiConfig {
        GeminiConfig {
            api_key: None,
            model: "gemini-pro".into(),
            base_url: base_url.into(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn config_key_wins_over_env() {
        assert_eq!(
            resolve_api_key(&Some("from-config".into())).as_deref(),
            Some("from-config")
        );
    }

    #[test]
    fn blank_config_key_is_ignored() {
        // Falls through to the env var, which may or may not be set here.
        if let Some(key) = resolve_api_key(&Some("   ".into())) {
            assert!(!key.trim().is_empty());
        }
    }

    #[tokio::test]
    async fn missing_key_fails_each_completion() {
        let provider = GeminiProvider::with_api_key(&config_for("http://unused"), None).unwrap();
        assert_eq!(
            provider.health_check().await.unwrap(),
            HealthStatus::Degraded(MISSING_KEY.into())
        );
        let err = provider
            .complete(CompletionRequest {
                prompt: "hello".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.public_message(), "Gemini API key not configured");
    }

    #[tokio::test]
    async fn complete_returns_text_and_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-pro:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "Start small."}]}}]
            })))
            .mount(&server)
            .await;

        let provider =
            GeminiProvider::with_api_key(&config_for(&server.uri()), Some("k".into())).unwrap();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.adapter_type(), AdapterType::Provider);

        let response = provider
            .complete(CompletionRequest {
                prompt: "help".into(),
            })
            .await
            .unwrap();
        assert_eq!(response.text, "Start small.");
        assert_eq!(response.model, "gemini-pro");
    }
}
