// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mood-conditioned prompt templates.

use std::fmt::Write;

use moodtask_core::Mood;

use crate::request::AssistTaskInput;

fn breakdown_guidance(mood: Mood) -> &'static str {
    match mood {
        Mood::Overwhelmed => {
            "The user is feeling overwhelmed. Break this task into very small, manageable steps. Focus on reducing cognitive load and making each step feel achievable. Use calming, supportive language."
        }
        Mood::Focused => {
            "The user is in a focused state. Provide detailed, structured subtasks that maximize productivity. Include time estimates and prioritization suggestions."
        }
        Mood::LowEnergy => {
            "The user has low energy. Suggest gentle, low-effort subtasks. Focus on what can be done with minimal energy while still making progress."
        }
    }
}

fn prioritization_guidance(mood: Mood) -> &'static str {
    match mood {
        Mood::Overwhelmed => {
            "The user is overwhelmed. Prioritize simple, quick wins that will reduce stress. Avoid complex or high-pressure tasks."
        }
        Mood::Focused => {
            "The user is highly focused. Prioritize challenging, important tasks that require deep concentration and can make significant progress."
        }
        Mood::LowEnergy => {
            "The user has low energy. Prioritize easy, low-effort tasks that still provide a sense of accomplishment."
        }
    }
}

const BREAKDOWN_SCHEMA: &str = r#"Please break down this task into 3-5 specific, actionable subtasks. Format your response as a JSON object with this structure:
{
  "subtasks": [
    {
      "title": "Subtask title",
      "description": "Brief description",
      "estimatedTime": "5-10 minutes",
      "priority": "high|medium|low"
    }
  ],
  "tips": ["Helpful tip 1", "Helpful tip 2"],
  "moodSpecificAdvice": "Advice tailored to current mood"
}

Keep subtasks concrete and specific. Avoid vague instructions."#;

const PRIORITIZATION_SCHEMA: &str = r#"Please analyze these tasks and provide prioritization advice. Format your response as a JSON object:
{
  "prioritizedTasks": [
    {
      "title": "Task title",
      "priority": 1,
      "reasoning": "Why this task should be prioritized given the current mood",
      "moodFit": "high|medium|low"
    }
  ],
  "generalAdvice": "Overall strategy for tackling these tasks in current mood",
  "energyManagement": "Tips for managing energy while working on these tasks"
}

Order tasks by priority (1 = highest priority)."#;

/// Prompt asking for a 3-5 step breakdown of one task.
pub fn breakdown_prompt(mood: Mood, title: &str, description: Option<&str>) -> String {
    let description = description.unwrap_or("No description provided");
    format!(
        "You are an AI assistant helping neurodivergent individuals manage tasks effectively.\n\n\
         Current context:\n\
         - User mood: {mood}\n\
         - Task: \"{title}\"\n\
         - Description: \"{description}\"\n\n\
         {guidance}\n\n\
         {BREAKDOWN_SCHEMA}\n",
        guidance = breakdown_guidance(mood),
    )
}

/// Prompt asking for an ordering of `tasks`, one `- "title" (description)`
/// line per task.
pub fn prioritization_prompt(mood: Mood, tasks: &[AssistTaskInput]) -> String {
    let mut listing = String::new();
    for task in tasks {
        if !listing.is_empty() {
            listing.push('\n');
        }
        let _ = write!(listing, "- \"{}\"", task.title);
        if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = write!(listing, " ({description})");
        }
    }
    format!(
        "You are an AI assistant helping neurodivergent individuals prioritize their tasks effectively.\n\n\
         Current context:\n\
         - User mood: {mood}\n\
         - {guidance}\n\n\
         Tasks to prioritize:\n\
         {listing}\n\n\
         {PRIORITIZATION_SCHEMA}\n",
        guidance = prioritization_guidance(mood),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_prompt_carries_context() {
        let p = breakdown_prompt(Mood::Overwhelmed, "Clean kitchen", None);
        assert!(p.contains("- User mood: overwhelmed"));
        assert!(p.contains("- Task: \"Clean kitchen\""));
        assert!(p.contains("- Description: \"No description provided\""));
        assert!(p.contains("very small, manageable steps"));
        assert!(p.contains("\"moodSpecificAdvice\""));
        assert!(p.trim_end().ends_with("Avoid vague instructions."));
    }

    #[test]
    fn guidance_differs_per_mood() {
        let prompts: Vec<String> = Mood::ALL
            .iter()
            .map(|m| breakdown_prompt(*m, "t", Some("d")))
            .collect();
        assert_ne!(prompts[0], prompts[1]);
        assert_ne!(prompts[1], prompts[2]);
        assert!(prompts[2].contains("gentle, low-effort subtasks"));
    }

    #[test]
    fn prioritization_prompt_lists_tasks() {
        let tasks = vec![
            AssistTaskInput {
                id: Some("1".into()),
                title: "Write report".into(),
                description: Some("Q3 numbers".into()),
            },
            AssistTaskInput {
                id: Some("2".into()),
                title: "Water plants".into(),
                description: None,
            },
        ];
        let p = prioritization_prompt(Mood::Focused, &tasks);
        assert!(p.contains("Tasks to prioritize:\n- \"Write report\" (Q3 numbers)\n- \"Water plants\"\n\n"));
        assert!(p.contains("- The user is highly focused."));
        assert!(p.contains("Order tasks by priority (1 = highest priority)."));
    }
}
