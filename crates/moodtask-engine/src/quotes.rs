// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Quote selector: a static (mood x time-of-day) quote table with repetition
//! avoidance, plus a fixed coping insight per mood.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc, Weekday};
use moodtask_core::Mood;
use rand::Rng;
use serde::Serialize;
use strum::{Display, EnumString};

/// Time-of-day bucket used to pick the quote list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TimeBucket {
    Morning,
    Afternoon,
    Evening,
    Weekend,
}

impl TimeBucket {
    /// Saturday and Sunday are weekend at any hour; otherwise before 12 is
    /// morning, before 17 afternoon, and the rest evening.
    pub fn from_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        if matches!(at.weekday(), Weekday::Sat | Weekday::Sun) {
            return TimeBucket::Weekend;
        }
        match at.hour() {
            h if h < 12 => TimeBucket::Morning,
            h if h < 17 => TimeBucket::Afternoon,
            _ => TimeBucket::Evening,
        }
    }

    /// Parses an explicit context; anything unrecognized means morning.
    pub fn parse_or_morning(context: &str) -> Self {
        context.parse().unwrap_or(TimeBucket::Morning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub text: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<&'static str>,
}

const fn q(text: &'static str) -> Quote {
    Quote { text, author: None }
}

const fn qa(text: &'static str, author: &'static str) -> Quote {
    Quote {
        text,
        author: Some(author),
    }
}

/// A practical tip and a coping technique for a mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub tip: &'static str,
    pub technique: &'static str,
}

const OVERWHELMED_MORNING: &[Quote] = &[
    qa("Start where you are. Use what you have. Do what you can.", "Arthur Ashe"),
    qa(
        "You are braver than you believe, stronger than you seem, and smarter than you think.",
        "A.A. Milne",
    ),
    q("One day at a time. One breath at a time. One step at a time."),
];
const OVERWHELMED_AFTERNOON: &[Quote] = &[
    q("It's okay to take breaks. Your mental health matters."),
    q("Progress, not perfection. You're doing better than you think."),
    q("Breathe in calm, breathe out chaos."),
];
const OVERWHELMED_EVENING: &[Quote] = &[
    q("Rest is not a luxury, it's a necessity."),
    q("You survived today. That's enough."),
    qa("Tomorrow is a fresh start with no mistakes in it yet.", "L.M. Montgomery"),
];
const OVERWHELMED_WEEKEND: &[Quote] = &[
    q("Weekends are for recharging your soul."),
    q("It's okay to do nothing today. Rest is productive too."),
    q("Your worth is not determined by your productivity."),
];

const FOCUSED_MORNING: &[Quote] = &[
    qa("The way to get started is to quit talking and begin doing.", "Walt Disney"),
    q("Focus on what you can control, let go of what you can't."),
    qa("Your focus determines your reality.", "George Lucas"),
];
const FOCUSED_AFTERNOON: &[Quote] = &[
    qa("Success is the sum of small efforts repeated day in and day out.", "Robert Collier"),
    q("The expert in anything was once a beginner."),
    q("Great things never come from comfort zones."),
];
const FOCUSED_EVENING: &[Quote] = &[
    q("Reflect on your progress. Every step forward counts."),
    q("What you accomplished today brings you closer to your goals."),
    q("Consistency is the mother of mastery."),
];
const FOCUSED_WEEKEND: &[Quote] = &[
    q("Weekends are perfect for pursuing passion projects."),
    q("Use this energy to create something meaningful."),
    q("Focused effort on weekends can accelerate your dreams."),
];

const LOW_ENERGY_MORNING: &[Quote] = &[
    q("Be gentle with yourself. You're doing the best you can."),
    q("Even flowers need time to bloom. Give yourself grace."),
    q("Low energy doesn't mean low value. You matter."),
];
const LOW_ENERGY_AFTERNOON: &[Quote] = &[
    qa("Sometimes the most productive thing you can do is relax.", "Mark Black"),
    q("Rest when you're weary. Refresh and renew yourself."),
    q("It's okay to move slowly. Movement is still progress."),
];
const LOW_ENERGY_EVENING: &[Quote] = &[
    q("You don't have to be 'on' all the time. Rest is healing."),
    q("Self-compassion is the best gift you can give yourself."),
    q("Tomorrow's energy starts with tonight's rest."),
];
const LOW_ENERGY_WEEKEND: &[Quote] = &[
    q("Weekends are for restoration and gentle self-care."),
    q("Slow weekends create space for inner peace."),
    q("There's beauty in stillness and quiet moments."),
];

/// The full quote list for a (mood, bucket) cell. Never empty.
pub fn quotes_for(mood: Mood, bucket: TimeBucket) -> &'static [Quote] {
    use TimeBucket::*;
    match (mood, bucket) {
        (Mood::Overwhelmed, Morning) => OVERWHELMED_MORNING,
        (Mood::Overwhelmed, Afternoon) => OVERWHELMED_AFTERNOON,
        (Mood::Overwhelmed, Evening) => OVERWHELMED_EVENING,
        (Mood::Overwhelmed, Weekend) => OVERWHELMED_WEEKEND,
        (Mood::Focused, Morning) => FOCUSED_MORNING,
        (Mood::Focused, Afternoon) => FOCUSED_AFTERNOON,
        (Mood::Focused, Evening) => FOCUSED_EVENING,
        (Mood::Focused, Weekend) => FOCUSED_WEEKEND,
        (Mood::LowEnergy, Morning) => LOW_ENERGY_MORNING,
        (Mood::LowEnergy, Afternoon) => LOW_ENERGY_AFTERNOON,
        (Mood::LowEnergy, Evening) => LOW_ENERGY_EVENING,
        (Mood::LowEnergy, Weekend) => LOW_ENERGY_WEEKEND,
    }
}

pub fn insight_for(mood: Mood) -> Insight {
    match mood {
        Mood::Overwhelmed => Insight {
            tip: "When overwhelmed, focus on one small task at a time. Breaking things down makes them manageable.",
            technique: "Try the 5-4-3-2-1 grounding technique: 5 things you can see, 4 you can touch, 3 you can hear, 2 you can smell, 1 you can taste.",
        },
        Mood::Focused => Insight {
            tip: "Channel this focused energy into your most important tasks. This is prime time for deep work.",
            technique: "Use the Pomodoro Technique: 25 minutes of focused work followed by a 5-minute break.",
        },
        Mood::LowEnergy => Insight {
            tip: "Honor your low energy by choosing gentle, nurturing activities. Rest is productive too.",
            technique: "Practice self-compassion. Ask yourself: 'What would I tell a good friend feeling this way?'",
        },
    }
}

/// Picks a quote uniformly from the bucket, skipping any whose text is in
/// `previous`. When every quote is excluded the whole bucket is eligible.
pub fn select_quote_with_rng<R: Rng + ?Sized>(
    mood: Mood,
    bucket: TimeBucket,
    previous: &[String],
    rng: &mut R,
) -> Quote {
    let all = quotes_for(mood, bucket);
    let fresh: Vec<&Quote> = all
        .iter()
        .filter(|quote| !previous.iter().any(|p| p == quote.text))
        .collect();
    if fresh.is_empty() {
        all[rng.gen_range(0..all.len())]
    } else {
        *fresh[rng.gen_range(0..fresh.len())]
    }
}

/// [`select_quote_with_rng`] with the thread-local generator.
pub fn select_quote(mood: Mood, bucket: TimeBucket, previous: &[String]) -> Quote {
    select_quote_with_rng(mood, bucket, previous, &mut rand::thread_rng())
}

/// A selected quote with the context it was drawn from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteSelection {
    pub quote: Quote,
    pub mood: Mood,
    /// The caller's explicit context verbatim, or the bucket derived from
    /// the clock when none was given.
    pub context: String,
    pub insight: Insight,
    pub timestamp: DateTime<Utc>,
}

/// Resolves the bucket from `context` (or from `local_now` when absent or
/// empty) and selects a quote from it.
pub fn select_for_context<Tz: TimeZone, R: Rng + ?Sized>(
    mood: Mood,
    context: Option<&str>,
    previous: &[String],
    local_now: &DateTime<Tz>,
    rng: &mut R,
) -> QuoteSelection {
    let (bucket, context) = match context.filter(|c| !c.is_empty()) {
        Some(explicit) => (TimeBucket::parse_or_morning(explicit), explicit.to_string()),
        None => {
            let bucket = TimeBucket::from_datetime(local_now);
            (bucket, bucket.to_string())
        }
    };
    QuoteSelection {
        quote: select_quote_with_rng(mood, bucket, previous, rng),
        mood,
        context,
        insight: insight_for(mood),
        timestamp: local_now.with_timezone(&Utc),
    }
}
