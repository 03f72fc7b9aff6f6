// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mood pattern summary over a window of emotional states.

use moodtask_core::{EmotionalState, Mood};
use serde::Serialize;

/// Look-back window used when the caller does not give one.
pub const DEFAULT_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodShare {
    pub mood: Mood,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodAnalysis {
    pub period: String,
    pub total_entries: usize,
    /// Per-mood shares in order of first appearance.
    pub mood_breakdown: Vec<MoodShare>,
    pub dominant_mood: Option<Mood>,
    pub stability_score: i64,
    pub insights: Vec<String>,
    pub mood_changes: usize,
}

/// Rounds half away from zero; `{:.1}` alone rounds exact ties to even.
fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Summarizes `states`, which must be in ascending time order.
pub fn analyze(states: &[EmotionalState], days: i64) -> MoodAnalysis {
    let total = states.len();

    let mut breakdown: Vec<MoodShare> = Vec::new();
    for state in states {
        match breakdown.iter_mut().find(|s| s.mood == state.mood) {
            Some(share) => share.count += 1,
            None => breakdown.push(MoodShare {
                mood: state.mood,
                count: 1,
                percentage: 0.0,
            }),
        }
    }
    for share in &mut breakdown {
        share.percentage = share.count as f64 / total as f64 * 100.0;
    }

    // A later-seen mood replaces the leader on a tie.
    let dominant = breakdown
        .iter()
        .fold(None::<&MoodShare>, |best, share| match best {
            Some(b) if b.count > share.count => Some(b),
            _ => Some(share),
        })
        .map(|s| (s.mood, s.percentage));

    let mood_changes = states
        .windows(2)
        .filter(|pair| pair[0].mood != pair[1].mood)
        .count();

    let stability = if total > 1 {
        (total - mood_changes) as f64 / (total - 1) as f64 * 100.0
    } else {
        100.0
    };

    let mut insights = Vec::new();
    match dominant {
        Some((mood, percentage)) if percentage > 60.0 => insights.push(format!(
            "You've been consistently {mood} ({:.1}% of the time)",
            round_tenths(percentage)
        )),
        _ => insights.push("Your moods have been quite varied lately".to_string()),
    }
    if stability > 70.0 {
        insights.push("Your mood has been relatively stable".to_string());
    } else if stability < 40.0 {
        insights.push("Your mood has been fluctuating frequently".to_string());
    }

    MoodAnalysis {
        period: format!("{days} days"),
        total_entries: total,
        mood_breakdown: breakdown,
        dominant_mood: dominant.map(|(mood, _)| mood),
        stability_score: stability.round() as i64,
        insights,
        mood_changes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(moods: &[Mood]) -> Vec<EmotionalState> {
        moods.iter().map(|m| EmotionalState::new("u1", *m)).collect()
    }

    #[test]
    fn empty_window_has_no_dominant_mood() {
        let analysis = analyze(&[], DEFAULT_DAYS);
        assert_eq!(analysis.total_entries, 0);
        assert!(analysis.mood_breakdown.is_empty());
        assert_eq!(analysis.dominant_mood, None);
        assert_eq!(analysis.stability_score, 100);
        assert_eq!(
            analysis.insights,
            vec![
                "Your moods have been quite varied lately",
                "Your mood has been relatively stable"
            ]
        );
        assert_eq!(analysis.period, "7 days");
    }

    #[test]
    fn consistent_mood_is_called_out() {
        use Mood::*;
        let analysis = analyze(&states(&[Focused, Focused, Focused, LowEnergy]), 7);
        assert_eq!(analysis.dominant_mood, Some(Focused));
        assert_eq!(analysis.mood_changes, 1);
        assert_eq!(analysis.mood_breakdown[0].count, 3);
        assert_eq!(analysis.mood_breakdown[0].percentage, 75.0);
        assert_eq!(analysis.insights[0], "You've been consistently focused (75.0% of the time)");
        // (4 - 1) / 3 * 100
        assert_eq!(analysis.stability_score, 100);
    }

    #[test]
    fn insight_percentage_rounds_half_up() {
        let mut moods = vec![Mood::Focused; 13];
        moods.extend([Mood::LowEnergy; 3]);
        let analysis = analyze(&states(&moods), 7);
        assert_eq!(analysis.mood_breakdown[0].percentage, 81.25);
        assert_eq!(
            analysis.insights[0],
            "You've been consistently focused (81.3% of the time)"
        );
    }

    #[test]
    fn alternating_moods_are_fluctuating() {
        use Mood::*;
        let analysis = analyze(
            &states(&[Overwhelmed, Focused, Overwhelmed, Focused, LowEnergy]),
            3,
        );
        assert_eq!(analysis.mood_changes, 4);
        // (5 - 4) / 4 * 100 = 25
        assert_eq!(analysis.stability_score, 25);
        assert_eq!(
            analysis.insights,
            vec![
                "Your moods have been quite varied lately",
                "Your mood has been fluctuating frequently"
            ]
        );
        assert_eq!(analysis.period, "3 days");
    }

    #[test]
    fn tie_goes_to_the_later_seen_mood() {
        use Mood::*;
        let analysis = analyze(&states(&[LowEnergy, Overwhelmed, Overwhelmed, LowEnergy]), 7);
        let order: Vec<Mood> = analysis.mood_breakdown.iter().map(|s| s.mood).collect();
        assert_eq!(order, vec![LowEnergy, Overwhelmed]);
        assert_eq!(analysis.dominant_mood, Some(Overwhelmed));
    }

    #[test]
    fn serializes_camel_case_with_lowercase_moods() {
        let analysis = analyze(&states(&[Mood::LowEnergy]), 7);
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["dominantMood"], "lowenergy");
        assert_eq!(json["totalEntries"], 1);
        assert_eq!(json["moodBreakdown"][0]["percentage"], 100.0);
        assert_eq!(json["stabilityScore"], 100);
    }
}
