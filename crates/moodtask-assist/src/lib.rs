// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI-backed task assistance for Moodtask.
//!
//! [`AssistService`] gates each request on the caller's dev-mode flag, builds
//! a mood-conditioned prompt, makes one provider call, and parses the
//! completion into a typed suggestion. Completions that are not the expected
//! JSON degrade to a fallback suggestion instead of failing.

pub mod prompt;
pub mod request;
pub mod service;
pub mod suggestion;

pub use request::{AssistTaskInput, BreakdownRequest, PrioritizationRequest};
pub use service::{AssistService, BreakdownResponse, ENTITLEMENT_REQUIRED, PrioritizationResponse};
pub use suggestion::{BreakdownSuggestion, Level, PrioritizationSuggestion, RankedTask, Subtask};
