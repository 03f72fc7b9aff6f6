// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure mood-driven logic for Moodtask.
//!
//! Nothing in this crate performs I/O or reads the clock; callers pass
//! `now` explicitly so every result is reproducible.

pub mod analysis;
pub mod prioritize;
pub mod quotes;
pub mod theme;

pub use analysis::{MoodAnalysis, analyze};
pub use prioritize::{Prioritization, PrioritizedTask, ReasonTag, prioritize};
pub use quotes::{Insight, Quote, QuoteSelection, TimeBucket, select_for_context, select_quote};
pub use theme::{AnimationProfile, ThemeColors, animation_for, theme_for};
