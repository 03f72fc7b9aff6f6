// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request bodies for the AI endpoints.
//!
//! Every field is optional on the wire so that a partial body decodes and
//! is rejected by [`BreakdownRequest::validate`] with the uniform
//! "Missing required fields" message instead of a serde error.

use moodtask_core::{Mood, MoodtaskError};
use serde::{Deserialize, Serialize};

pub(crate) const MISSING_FIELDS: &str = "Missing required fields";
pub(crate) const INVALID_MOOD: &str = "Invalid mood provided";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_description: Option<String>,
}

/// A breakdown request with every required field present.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidBreakdown {
    pub task_id: String,
    pub user_id: String,
    pub mood: Mood,
    pub task_title: String,
    pub task_description: Option<String>,
}

impl BreakdownRequest {
    pub fn validate(self) -> Result<ValidBreakdown, MoodtaskError> {
        let (Some(task_id), Some(user_id), Some(mood), Some(task_title)) = (
            present(self.task_id),
            present(self.user_id),
            present(self.mood),
            present(self.task_title),
        ) else {
            return Err(MoodtaskError::Validation(MISSING_FIELDS.to_string()));
        };
        Ok(ValidBreakdown {
            task_id,
            user_id,
            mood: parse_mood(&mood)?,
            task_title,
            task_description: present(self.task_description),
        })
    }
}

/// A task as sent to the prioritization endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistTaskInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<AssistTaskInput>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidPrioritization {
    pub user_id: String,
    pub mood: Mood,
    pub tasks: Vec<AssistTaskInput>,
}

impl PrioritizationRequest {
    /// An empty task array is accepted; only a missing one is rejected.
    pub fn validate(self) -> Result<ValidPrioritization, MoodtaskError> {
        let (Some(user_id), Some(mood), Some(tasks)) =
            (present(self.user_id), present(self.mood), self.tasks)
        else {
            return Err(MoodtaskError::Validation(MISSING_FIELDS.to_string()));
        };
        Ok(ValidPrioritization {
            user_id,
            mood: parse_mood(&mood)?,
            tasks,
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_mood(value: &str) -> Result<Mood, MoodtaskError> {
    Mood::parse(value).ok_or_else(|| MoodtaskError::Validation(INVALID_MOOD.to_string()))
}
