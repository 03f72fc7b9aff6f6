// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    http::{HeaderName, header},
    routing::{get, post},
};
use moodtask_assist::AssistService;
use moodtask_core::{MoodtaskError, ProviderAdapter, StorageAdapter};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway for profiles, tasks, and moods.
    pub storage: Arc<dyn StorageAdapter>,
    /// AI breakdown and prioritization pipeline.
    pub assist: AssistService,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(storage: Arc<dyn StorageAdapter>, provider: Arc<dyn ProviderAdapter>) -> Self {
        Self {
            assist: AssistService::new(storage.clone(), provider),
            storage,
            start_time: Instant::now(),
        }
    }
}

/// Gateway server configuration (mirrors `[server]` from moodtask-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the router with every endpoint, permissive CORS, and request tracing.
///
/// Routes:
/// - POST /ai-task-breakdown
/// - POST /ai-task-prioritization
/// - POST /task-prioritization
/// - POST /mood-analysis
/// - POST /quote-selection
/// - GET /health
pub fn build_router(state: AppState) -> Router {
    // Any OPTIONS request is answered by the CORS layer itself.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ]);

    Router::new()
        .route("/ai-task-breakdown", post(handlers::post_ai_task_breakdown))
        .route(
            "/ai-task-prioritization",
            post(handlers::post_ai_task_prioritization),
        )
        .route("/task-prioritization", post(handlers::post_task_prioritization))
        .route("/mood-analysis", post(handlers::post_mood_analysis))
        .route("/quote-selection", post(handlers::post_quote_selection))
        .route("/health", get(handlers::get_health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Binds to the configured host:port and serves until `shutdown` resolves.
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), MoodtaskError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| MoodtaskError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;
    serve_listener(listener, state, shutdown).await
}

/// Serves on an already-bound listener. Useful with port 0 in tests.
pub async fn serve_listener(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), MoodtaskError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "gateway server listening");
    }

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| MoodtaskError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("gateway server stopped");
    Ok(())
}
