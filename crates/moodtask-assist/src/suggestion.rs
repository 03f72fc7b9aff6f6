// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed model output for the AI endpoints, and the fallbacks used when the
//! model answers with something that does not parse.

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use tracing::warn;

use crate::request::AssistTaskInput;

const BREAKDOWN_FALLBACK_ADVICE: &str = "AI provided general guidance for this task.";
const RANKED_FALLBACK_REASONING: &str = "AI provided general guidance";
const ENERGY_FALLBACK: &str = "Take breaks as needed and listen to your body.";

/// Three-level rating used for subtask priority and mood fit.
///
/// Read case-insensitively; a value outside the three levels reads as
/// `Medium`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Level {
    High,
    #[default]
    Medium,
    Low,
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.trim().parse().unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub priority: Level,
}

/// A task broken into subtasks, tuned to the user's mood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownSuggestion {
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub mood_specific_advice: String,
}

impl BreakdownSuggestion {
    /// Parses the model's completion, degrading to a tips-only suggestion
    /// carrying the raw text. Only `subtasks` is required; the other fields
    /// default when the model leaves them out.
    pub fn parse_or_fallback(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "breakdown completion is not a usable suggestion, using fallback");
                Self::fallback(raw)
            }
        }
    }

    pub fn fallback(raw: &str) -> Self {
        Self {
            subtasks: Vec::new(),
            tips: vec![raw.to_string()],
            mood_specific_advice: BREAKDOWN_FALLBACK_ADVICE.to_string(),
        }
    }
}

/// One entry in an AI ordering. `priority` is a rank: 1 is most urgent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedTask {
    pub title: String,
    pub priority: u32,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub mood_fit: Level,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizationSuggestion {
    pub prioritized_tasks: Vec<RankedTask>,
    #[serde(default)]
    pub general_advice: String,
    #[serde(default)]
    pub energy_management: String,
}

impl PrioritizationSuggestion {
    /// Parses the model's completion; only `prioritizedTasks` is required.
    /// On failure the request's tasks are returned in their original order
    /// with the raw text as general advice.
    pub fn parse_or_fallback(raw: &str, tasks: &[AssistTaskInput]) -> Self {
        match serde_json::from_str(raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "prioritization completion is not a usable suggestion, using fallback");
                Self::fallback(raw, tasks)
            }
        }
    }

    pub fn fallback(raw: &str, tasks: &[AssistTaskInput]) -> Self {
        let prioritized_tasks = tasks
            .iter()
            .zip(1u32..)
            .map(|(task, rank)| RankedTask {
                title: task.title.clone(),
                priority: rank,
                reasoning: RANKED_FALLBACK_REASONING.to_string(),
                mood_fit: Level::Medium,
            })
            .collect();
        Self {
            prioritized_tasks,
            general_advice: raw.to_string(),
            energy_management: ENERGY_FALLBACK.to_string(),
        }
    }
}
