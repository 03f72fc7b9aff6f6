// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Moodtask gateway's AI endpoints.

use std::time::Duration;

use moodtask_assist::{
    BreakdownRequest, BreakdownResponse, PrioritizationRequest, PrioritizationResponse,
};
use moodtask_core::MoodtaskError;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Default bound on one gateway round trip. AI calls wait on the model.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Calls the gateway's `/ai-task-breakdown` and `/ai-task-prioritization`.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MoodtaskError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MoodtaskError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn task_breakdown(
        &self,
        request: &BreakdownRequest,
    ) -> Result<BreakdownResponse, MoodtaskError> {
        self.post("/ai-task-breakdown", request, "Failed to get AI breakdown")
            .await
    }

    pub async fn task_prioritization(
        &self,
        request: &PrioritizationRequest,
    ) -> Result<PrioritizationResponse, MoodtaskError> {
        self.post(
            "/ai-task-prioritization",
            request,
            "Failed to get AI prioritization",
        )
        .await
    }

    /// Posts `body` and decodes a 2xx answer. Error answers are mapped back
    /// onto the variant the gateway derived the status from, carrying the
    /// server's `error` message or `fallback` when it has none.
    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<T, MoodtaskError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| MoodtaskError::Internal(format!("gateway request failed: {e}")))?;

        let status = response.status();
        debug!(%status, %url, "gateway response received");
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| fallback.to_string());
            return Err(match status {
                StatusCode::BAD_REQUEST => MoodtaskError::Validation(message),
                StatusCode::FORBIDDEN => MoodtaskError::Entitlement(message),
                _ => MoodtaskError::Provider {
                    message,
                    source: None,
                },
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| MoodtaskError::Internal(format!("invalid gateway response: {e}")))
    }
}
