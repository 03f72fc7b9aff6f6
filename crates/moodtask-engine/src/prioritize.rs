// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mood-driven task prioritization heuristic.
//!
//! Each pending task accumulates an integer score from its age plus a
//! mood-specific rule table. Higher scores are more urgent. The function is
//! pure and total: the only clock is the `now` argument.

use chrono::{DateTime, Utc};
use moodtask_core::{FocusTask, Mood, TaskStatus};
use serde::Serialize;
use strum::{Display, EnumString};

/// Maximum number of ranked tasks returned.
pub const MAX_RANKED: usize = 10;

const MS_PER_DAY: i64 = 86_400_000;

/// Why a task received (or lost) score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ReasonTag {
    Overdue,
    Aging,
    Recent,
    SimpleTask,
    MinimalDescription,
    ComplexTask,
    DetailedTask,
    HighImportance,
    MaintenanceTask,
    QuickTask,
    AvoidComplexity,
}

/// A pending task with its score and the tags explaining it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrioritizedTask {
    #[serde(flatten)]
    pub task: FocusTask,
    pub priority: i32,
    pub reasoning: Vec<ReasonTag>,
}

/// The ranked result for one invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prioritization {
    /// The mood exactly as supplied, recognized or not.
    pub current_mood: String,
    /// Number of pending tasks scored, before truncation.
    pub total_tasks: usize,
    pub prioritized_tasks: Vec<PrioritizedTask>,
    pub recommendations: Vec<&'static str>,
    pub mood_strategy: &'static str,
}

struct Rule {
    delta: i32,
    tag: ReasonTag,
    applies: fn(&FocusTask) -> bool,
}

fn title_has_any(task: &FocusTask, needles: &[&str]) -> bool {
    let title = task.title.to_lowercase();
    needles.iter().any(|n| title.contains(n))
}

const OVERWHELMED_RULES: &[Rule] = &[
    Rule {
        delta: 3,
        tag: ReasonTag::SimpleTask,
        applies: |t| t.title_len() < 30,
    },
    Rule {
        delta: 2,
        tag: ReasonTag::MinimalDescription,
        applies: |t| t.description_len() < 50,
    },
    Rule {
        delta: -2,
        tag: ReasonTag::ComplexTask,
        applies: |t| t.description_len() > 100,
    },
];

const FOCUSED_RULES: &[Rule] = &[
    Rule {
        delta: 3,
        tag: ReasonTag::DetailedTask,
        applies: |t| t.description_len() > 50,
    },
    Rule {
        delta: 4,
        tag: ReasonTag::HighImportance,
        applies: |t| title_has_any(t, &["important", "urgent"]),
    },
];

const LOW_ENERGY_RULES: &[Rule] = &[
    Rule {
        delta: 3,
        tag: ReasonTag::MaintenanceTask,
        applies: |t| title_has_any(t, &["review", "check", "update"]),
    },
    Rule {
        delta: 2,
        tag: ReasonTag::QuickTask,
        applies: |t| t.title_len() < 25,
    },
    Rule {
        delta: -1,
        tag: ReasonTag::AvoidComplexity,
        applies: |t| t.description_len() > 80,
    },
];

fn rules_for(mood: Mood) -> &'static [Rule] {
    match mood {
        Mood::Overwhelmed => OVERWHELMED_RULES,
        Mood::Focused => FOCUSED_RULES,
        Mood::LowEnergy => LOW_ENERGY_RULES,
    }
}

/// The one-line strategy shown with a ranking.
pub fn mood_strategy(mood: Option<Mood>) -> &'static str {
    match mood {
        Some(Mood::Overwhelmed) => "Simplify and reduce cognitive load",
        Some(Mood::Focused) => "Maximize productivity with challenging work",
        Some(Mood::LowEnergy) => "Conserve energy with easy wins",
        None => "Maintain balanced approach",
    }
}

/// Fixed advice for a mood; empty for an unrecognized one.
pub fn recommendations(mood: Option<Mood>) -> Vec<&'static str> {
    match mood {
        Some(Mood::Overwhelmed) => vec![
            "Focus on completing 1-2 simple tasks to build momentum",
            "Break complex tasks into smaller, manageable steps",
        ],
        Some(Mood::Focused) => vec![
            "This is a great time to tackle your most challenging tasks",
            "Consider batching similar tasks together for efficiency",
        ],
        Some(Mood::LowEnergy) => vec![
            "Start with quick wins to preserve energy",
            "Consider delegating or postponing complex tasks",
        ],
        None => Vec::new(),
    }
}

/// Whole days elapsed since `created_at`, floored. Future timestamps give
/// negative values, which still score as recent.
pub fn days_since_created(task: &FocusTask, now: DateTime<Utc>) -> i64 {
    (now - task.created_at)
        .num_milliseconds()
        .div_euclid(MS_PER_DAY)
}

/// Scores one task under `mood`.
pub fn score_task(task: &FocusTask, mood: Option<Mood>, now: DateTime<Utc>) -> PrioritizedTask {
    let mut priority = 0;
    let mut reasoning = Vec::new();

    let days = days_since_created(task, now);
    let (age_delta, age_tag) = if days > 7 {
        (3, ReasonTag::Overdue)
    } else if days > 3 {
        (2, ReasonTag::Aging)
    } else {
        (1, ReasonTag::Recent)
    };
    priority += age_delta;
    reasoning.push(age_tag);

    match mood {
        Some(mood) => {
            for rule in rules_for(mood) {
                if (rule.applies)(task) {
                    priority += rule.delta;
                    reasoning.push(rule.tag);
                }
            }
        }
        None => priority += 1,
    }

    PrioritizedTask {
        task: task.clone(),
        priority,
        reasoning,
    }
}

/// Ranks the pending tasks in `tasks` for the raw `mood` string.
///
/// Non-pending tasks are ignored. Equal scores keep their input order. An
/// unrecognized mood is not an error: every task gets a flat +1.
pub fn prioritize(tasks: &[FocusTask], mood: &str, now: DateTime<Utc>) -> Prioritization {
    let parsed = Mood::parse(mood);

    let mut ranked: Vec<PrioritizedTask> = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Pending)
        .map(|t| score_task(t, parsed, now))
        .collect();
    let total_tasks = ranked.len();

    // sort_by is stable, so ties keep encounter order.
    ranked.sort_by(|a, b| b.priority.cmp(&a.priority));
    ranked.truncate(MAX_RANKED);

    Prioritization {
        current_mood: mood.to_string(),
        total_tasks,
        prioritized_tasks: ranked,
        recommendations: recommendations(parsed),
        mood_strategy: mood_strategy(parsed),
    }
}
