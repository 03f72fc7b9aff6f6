// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for Moodtask.
//!
//! One axum service exposes the AI proxy endpoints (breakdown and
//! prioritization via [`moodtask_assist`]), the heuristic prioritization,
//! mood analysis, and quote selection endpoints, and a health probe. Every
//! route answers CORS preflight permissively.

pub mod handlers;
pub mod server;

pub use handlers::{ApiError, ErrorResponse, HealthResponse};
pub use server::{AppState, ServerConfig, build_router, serve_listener, start_server};
