// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Request bodies are read as raw bytes and decoded leniently: a body that
//! is not JSON is treated as an empty payload so every route answers with
//! its own validation message rather than a generic 400/415.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{Duration, Local, Utc};
use moodtask_assist::{BreakdownResponse, PrioritizationResponse};
use moodtask_core::{Mood, MoodtaskError, TaskStatus};
use moodtask_engine::analysis::DEFAULT_DAYS;
use moodtask_engine::{MoodAnalysis, Prioritization, QuoteSelection, analyze, prioritize};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::server::AppState;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Maps a [`MoodtaskError`] onto an HTTP status and `{ "error": ... }` body.
#[derive(Debug)]
pub struct ApiError(pub MoodtaskError);

impl From<MoodtaskError> for ApiError {
    fn from(e: MoodtaskError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            MoodtaskError::Validation(_) => StatusCode::BAD_REQUEST,
            MoodtaskError::Entitlement(_) => StatusCode::FORBIDDEN,
            MoodtaskError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = ErrorResponse {
            error: self.0.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

fn lenient_json(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

fn decode<T: for<'de> Deserialize<'de> + Default>(body: &Bytes, invalid: &str) -> Result<T, ApiError> {
    match lenient_json(body) {
        Value::Object(map) => serde_json::from_value(Value::Object(map))
            .map_err(|_| ApiError(MoodtaskError::Validation(invalid.to_string()))),
        _ => Ok(T::default()),
    }
}

fn require_user(user_id: Option<String>) -> Result<String, ApiError> {
    user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError(MoodtaskError::Validation("User ID is required".to_string())))
}

/// POST /ai-task-breakdown
pub async fn post_ai_task_breakdown(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BreakdownResponse>, ApiError> {
    let resp = state.assist.breakdown(&lenient_json(&body)).await?;
    Ok(Json(resp))
}

/// POST /ai-task-prioritization
pub async fn post_ai_task_prioritization(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PrioritizationResponse>, ApiError> {
    let resp = state.assist.prioritize(&lenient_json(&body)).await?;
    Ok(Json(resp))
}

/// Request body for POST /task-prioritization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPrioritizationRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub current_mood: Option<String>,
}

/// POST /task-prioritization
///
/// Ranks the user's pending tasks with the local heuristic. An absent or
/// unrecognized mood still ranks, using the neutral adjustment.
pub async fn post_task_prioritization(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Prioritization>, ApiError> {
    let req: TaskPrioritizationRequest = decode(&body, "User ID is required")?;
    let user_id = require_user(req.user_id)?;
    let tasks = state
        .storage
        .list_tasks(&user_id, Some(TaskStatus::Pending))
        .await?;
    let mood = req.current_mood.unwrap_or_default();
    let result = prioritize(&tasks, &mood, Utc::now());
    tracing::debug!(%user_id, mood = %mood, total = result.total_tasks, "heuristic prioritization");
    Ok(Json(result))
}

/// Request body for POST /mood-analysis.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodAnalysisRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub days: Option<i64>,
}

/// POST /mood-analysis
pub async fn post_mood_analysis(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MoodAnalysis>, ApiError> {
    let req: MoodAnalysisRequest = decode(&body, "User ID is required")?;
    let user_id = require_user(req.user_id)?;
    let days = req.days.unwrap_or(DEFAULT_DAYS);
    if days <= 0 {
        return Err(ApiError(MoodtaskError::Validation(
            "Days must be a positive number".to_string(),
        )));
    }

    let end = Utc::now();
    let start = end - Duration::days(days);
    let states = state
        .storage
        .emotional_states_between(&user_id, start, end)
        .await?;
    Ok(Json(analyze(&states, days)))
}

/// Request body for POST /quote-selection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSelectionRequest {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub previous_quotes: Vec<String>,
}

/// POST /quote-selection
///
/// The time bucket comes from `context` when given, else from the server's
/// local clock.
pub async fn post_quote_selection(body: Bytes) -> Result<Json<QuoteSelection>, ApiError> {
    let req: QuoteSelectionRequest = decode(&body, "Mood is required")?;
    let mood = req
        .mood
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError(MoodtaskError::Validation("Mood is required".to_string())))?;
    let mood = Mood::parse(&mood)
        .ok_or_else(|| ApiError(MoodtaskError::Validation("Invalid mood provided".to_string())))?;

    let selection = moodtask_engine::select_for_context(
        mood,
        req.context.as_deref(),
        &req.previous_quotes,
        &Local::now(),
        &mut rand::thread_rng(),
    );
    Ok(Json(selection))
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok", or "degraded" when storage is not healthy.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Seconds since the gateway state was created.
    pub uptime_secs: u64,
}

/// GET /health
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = match state.storage.health_check().await {
        Ok(moodtask_core::HealthStatus::Healthy) => "ok",
        _ => "degraded",
    };
    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::build_router;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use moodtask_test_utils::TestHarness;
    use moodtask_core::StorageAdapter;
    use tower::ServiceExt;

    async fn harness() -> TestHarness {
        TestHarness::builder()
            .with_profile("dev", true)
            .with_profile("free", false)
            .build()
            .await
            .unwrap()
    }

    async fn post(h: &TestHarness, path: &str, body: &str) -> (StatusCode, Value) {
        let app = build_router(AppState::new(h.storage_adapter(), h.mock_provider.clone()));
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[test]
    fn error_statuses() {
        let cases = [
            (MoodtaskError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (MoodtaskError::Entitlement("no".into()), StatusCode::FORBIDDEN),
            (
                MoodtaskError::NotFound {
                    entity: "task",
                    id: "t".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                MoodtaskError::Provider {
                    message: "Gemini API error: 500".into(),
                    source: None,
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn breakdown_requires_dev_mode() {
        let h = harness().await;
        let (status, body) = post(
            &h,
            "/ai-task-breakdown",
            r#"{"taskId":"t1","userId":"free","mood":"focused","taskTitle":"Essay"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "AI features require subscription or dev mode");

        let (status, _) = post(&h, "/ai-task-breakdown", "garbage").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(h.mock_provider.call_count().await, 0);
    }

    #[tokio::test]
    async fn breakdown_degrades_on_prose() {
        let h = harness().await;
        h.mock_provider.add_response("Try ten minutes at a time.").await;
        let (status, body) = post(
            &h,
            "/ai-task-breakdown",
            r#"{"taskId":"t1","userId":"dev","mood":"lowenergy","taskTitle":"Essay"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["suggestion"]["tips"][0], "Try ten minutes at a time.");
        assert_eq!(body["suggestion"]["subtasks"], serde_json::json!([]));
        assert!(body["assistId"].is_string());
    }

    #[tokio::test]
    async fn ai_prioritization_validation_and_provider_errors() {
        let h = harness().await;
        let (status, body) = post(
            &h,
            "/ai-task-prioritization",
            r#"{"userId":"dev","mood":"focused"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields");

        h.mock_provider.add_error("Gemini API key not configured").await;
        let (status, body) = post(
            &h,
            "/ai-task-prioritization",
            r#"{"userId":"dev","mood":"focused","tasks":[{"title":"A"}]}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Gemini API key not configured");
    }

    #[tokio::test]
    async fn heuristic_prioritization_ranks_pending_tasks() {
        let h = harness().await;
        let now = Utc::now();
        h.seed_task("u1", "URGENT: fix this", Some(&"x".repeat(60)), now - Duration::days(10))
            .await
            .unwrap();
        h.seed_task("u1", "Buy milk", None, now).await.unwrap();
        let done = h.seed_task("u1", "Old thing", None, now).await.unwrap();
        h.storage
            .update_task(&done.id, &moodtask_core::TaskPatch::status(TaskStatus::Completed))
            .await
            .unwrap();

        let (status, body) = post(
            &h,
            "/task-prioritization",
            r#"{"userId":"u1","currentMood":"focused"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalTasks"], 2);
        assert_eq!(body["currentMood"], "focused");
        assert_eq!(body["prioritizedTasks"][0]["title"], "URGENT: fix this");
        assert_eq!(body["prioritizedTasks"][0]["priority"], 10);
        assert_eq!(
            body["moodStrategy"],
            "Maximize productivity with challenging work"
        );

        let (status, body) = post(&h, "/task-prioritization", r#"{"currentMood":"focused"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "User ID is required");
    }

    #[tokio::test]
    async fn mood_analysis_over_window() {
        let h = harness().await;
        let now = Utc::now();
        h.seed_mood("u1", Mood::Focused, now - Duration::days(30)).await.unwrap();
        h.seed_mood("u1", Mood::Focused, now - Duration::hours(5)).await.unwrap();
        h.seed_mood("u1", Mood::Focused, now - Duration::hours(3)).await.unwrap();
        h.seed_mood("u1", Mood::Overwhelmed, now - Duration::hours(1)).await.unwrap();

        let (status, body) = post(&h, "/mood-analysis", r#"{"userId":"u1"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["period"], "7 days");
        assert_eq!(body["totalEntries"], 3);
        assert_eq!(body["dominantMood"], "focused");
        assert_eq!(body["moodChanges"], 1);

        let (status, body) = post(&h, "/mood-analysis", r#"{"userId":"u1","days":60}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalEntries"], 4);

        let (status, _) = post(&h, "/mood-analysis", "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn quote_selection_validates_mood() {
        let h = harness().await;
        let (status, body) = post(&h, "/quote-selection", "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Mood is required");

        let (status, body) = post(&h, "/quote-selection", r#"{"mood":"sleepy"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid mood provided");

        let (status, body) = post(
            &h,
            "/quote-selection",
            r#"{"mood":"focused","context":"weekend"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["context"], "weekend");
        assert_eq!(body["mood"], "focused");
        assert!(body["quote"]["text"].is_string());
        assert!(body["insight"]["technique"].as_str().unwrap().contains("Pomodoro"));
    }

    #[tokio::test]
    async fn health_reports_ok_with_initialized_storage() {
        let h = harness().await;
        let app = build_router(AppState::new(h.storage_adapter(), h.mock_provider.clone()));
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
