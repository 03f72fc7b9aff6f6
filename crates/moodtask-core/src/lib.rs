// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Moodtask.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the Moodtask workspace. Storage and provider
//! adapters implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::MoodtaskError;
pub use types::{
    AdapterType, AiTaskAssist, EmotionalState, FocusTask, HealthStatus, Mood, ProfilePatch,
    TaskPatch, TaskStatus, UserProfile,
};

pub use traits::{PluginAdapter, ProviderAdapter, StorageAdapter};
