// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` API.
//!
//! Provides [`GeminiClient`] which handles request construction and
//! authentication. Exactly one upstream round trip is made per call; there
//! is no retry.

use std::time::Duration;

use moodtask_core::MoodtaskError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// HTTP client for Gemini API communication.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// * `api_key` - sent as the `x-goog-api-key` header
    /// * `model` - model identifier used in the request path
    /// * `base_url` - API root, e.g. `https://generativelanguage.googleapis.com`
    /// * `timeout` - bound on one full request/response exchange
    pub fn new(
        api_key: &str,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, MoodtaskError> {
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| MoodtaskError::Config(format!("invalid API key header value: {e}")))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", key);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| MoodtaskError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            model: model.into(),
            base_url: base_url.into(),
        })
    }

    /// Returns the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Sends `prompt` and returns the first candidate's text.
    ///
    /// Non-2xx answers become `Gemini API error: {status}`; a response without
    /// text becomes `No response from Gemini API`.
    pub async fn generate(&self, prompt: &str) -> Result<String, MoodtaskError> {
        let request = GenerateContentRequest::from_prompt(prompt);

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| MoodtaskError::Provider {
                message: format!("Gemini request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %self.model, "generateContent response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => warn!(
                    status = %status,
                    code = api_err.error.code,
                    api_status = %api_err.error.status,
                    message = %api_err.error.message,
                    "Gemini API returned an error"
                ),
                Err(_) => warn!(status = %status, body = %body, "Gemini API returned an error"),
            }
            return Err(MoodtaskError::Provider {
                message: format!("Gemini API error: {}", status.as_u16()),
                source: None,
            });
        }

        let body = response.text().await.map_err(|e| MoodtaskError::Provider {
            message: format!("failed to read Gemini response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| MoodtaskError::Provider {
                message: format!("failed to parse Gemini response: {e}"),
                source: Some(Box::new(e)),
            })?;

        parsed
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| MoodtaskError::Provider {
                message: "No response from Gemini API".into(),
                source: None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GENERATE_PATH: &str = "/v1beta/models/gemini-pro:generateContent";

    fn test_client(base_url: &str) -> GeminiClient {
        GeminiClient::new("test-api-key", "gemini-pro", base_url, Duration::from_secs(5)).unwrap()
    }

    fn text_response(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}]
        })
    }

    #[tokio::test]
    async fn generate_returns_first_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "test-api-key"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "contents": [{"parts": [{"text": "Break this down"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response("{\"tips\":[]}")))
            .expect(1)
            .mount(&server)
            .await;

        let text = test_client(&server.uri())
            .generate("Break this down")
            .await
            .unwrap();
        assert_eq!(text, "{\"tips\":[]}");
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_tolerated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response("ok")))
            .mount(&server)
            .await;

        let client = test_client(&format!("{}/", server.uri()));
        assert_eq!(client.generate("x").await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn non_success_status_is_reported_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
                "error": {"code": 503, "message": "overloaded", "status": "UNAVAILABLE"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).generate("x").await.unwrap_err();
        assert_eq!(err.public_message(), "Gemini API error: 503");
    }

    #[tokio::test]
    async fn missing_text_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": []
            })))
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).generate("x").await.unwrap_err();
        assert_eq!(err.public_message(), "No response from Gemini API");
    }

    #[tokio::test]
    async fn stalled_upstream_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(text_response("late"))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client =
            GeminiClient::new("k", "gemini-pro", server.uri(), Duration::from_millis(200)).unwrap();
        let err = client.generate("x").await.unwrap_err();
        assert!(matches!(err, MoodtaskError::Provider { .. }));
    }

    #[test]
    fn invalid_key_header_is_a_config_error() {
        let err = GeminiClient::new("bad\nkey", "gemini-pro", "http://x", Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, MoodtaskError::Config(_)));
    }
}
