// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across adapter traits and services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::MoodtaskError;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Storage,
}

/// The user's emotional state, the single axis driving prioritization,
/// theming, quotes, and AI prompting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mood {
    Overwhelmed,
    Focused,
    LowEnergy,
}

impl Mood {
    /// All moods in their canonical order.
    pub const ALL: [Mood; 3] = [Mood::Overwhelmed, Mood::Focused, Mood::LowEnergy];

    /// Parses a wire mood string, returning `None` for anything unrecognized.
    pub fn parse(value: &str) -> Option<Mood> {
        value.parse().ok()
    }
}

/// Lifecycle status of a [`FocusTask`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// The status a completion toggle moves to: completed tasks reopen,
    /// everything else completes.
    pub fn toggled(self) -> TaskStatus {
        match self {
            TaskStatus::Completed => TaskStatus::Pending,
            TaskStatus::Pending | TaskStatus::InProgress => TaskStatus::Completed,
        }
    }
}

/// One logged mood selection. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalState {
    pub id: String,
    pub user_id: String,
    pub mood: Mood,
    pub timestamp: DateTime<Utc>,
}

impl EmotionalState {
    /// A new state for `user_id` stamped with the current time.
    pub fn new(user_id: impl Into<String>, mood: Mood) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            mood,
            timestamp: Utc::now(),
        }
    }
}

/// A task on the user's personal list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusTask {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

impl FocusTask {
    /// Creates a pending task, rejecting blank titles.
    ///
    /// A blank description is stored as no description.
    pub fn new(
        user_id: impl Into<String>,
        title: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, MoodtaskError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(MoodtaskError::Validation(
                "task title must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            title: title.trim().to_string(),
            description: normalize_description(description),
            status: TaskStatus::Pending,
            created_at: Utc::now(),
        })
    }

    /// Description length in characters; a missing description counts as zero.
    pub fn description_len(&self) -> usize {
        self.description
            .as_deref()
            .map(|d| d.chars().count())
            .unwrap_or(0)
    }

    /// Title length in characters.
    pub fn title_len(&self) -> usize {
        self.title.chars().count()
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|d| !d.trim().is_empty())
}

/// Partial update for a [`FocusTask`]. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// A patch that only changes the status.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Applies the patch in place, rejecting a blank replacement title.
    pub fn apply(&self, task: &mut FocusTask) -> Result<(), MoodtaskError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(MoodtaskError::Validation(
                    "task title must not be empty".to_string(),
                ));
            }
            task.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            task.description = normalize_description(description.clone());
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        Ok(())
    }
}

/// Per-user profile. `dev_mode_enabled` gates the AI-backed features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
    pub neurodivergent_status: Option<String>,
    pub dev_mode_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// A fresh profile created at sign-up. Dev mode starts disabled.
    pub fn new(
        id: impl Into<String>,
        display_name: Option<String>,
        neurodivergent_status: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            display_name,
            neurodivergent_status,
            dev_mode_enabled: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a [`UserProfile`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub neurodivergent_status: Option<String>,
    #[serde(default)]
    pub dev_mode_enabled: Option<bool>,
}

impl ProfilePatch {
    /// Applies the patch and refreshes `updated_at`.
    pub fn apply(&self, profile: &mut UserProfile, now: DateTime<Utc>) {
        if let Some(name) = &self.display_name {
            profile.display_name = Some(name.clone());
        }
        if let Some(status) = &self.neurodivergent_status {
            profile.neurodivergent_status = Some(status.clone());
        }
        if let Some(enabled) = self.dev_mode_enabled {
            profile.dev_mode_enabled = enabled;
        }
        profile.updated_at = now;
    }
}

/// Append-only record of one AI-generated task breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiTaskAssist {
    pub id: String,
    pub user_id: String,
    pub task_id: String,
    /// The structured suggestion, serialized as JSON.
    pub suggestion: String,
    pub mood: Mood,
    pub timestamp: DateTime<Utc>,
}

/// A single-shot completion request to a generative-language provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
}

/// The text completion returned by a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub text: String,
    pub model: String,
}
