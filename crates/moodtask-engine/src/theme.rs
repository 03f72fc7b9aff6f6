// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mood theme resolver: static color palettes and animation timing per mood.

use moodtask_core::Mood;
use serde::Serialize;

/// Color palette for one mood, as CSS hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
    pub accent: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpringConfig {
    pub damping: u32,
    pub stiffness: u32,
}

/// Animation timing for one mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationProfile {
    pub duration_ms: u32,
    pub easing: &'static str,
    pub spring: SpringConfig,
}

const OVERWHELMED_THEME: ThemeColors = ThemeColors {
    primary: "#0ea5e9",
    secondary: "#38bdf8",
    background: "#f0f9ff",
    surface: "#ffffff",
    text: "#0c4a6e",
    text_secondary: "#075985",
    border: "#bae6fd",
    accent: "#7dd3fc",
};

const FOCUSED_THEME: ThemeColors = ThemeColors {
    primary: "#f59e0b",
    secondary: "#fbbf24",
    background: "#fffbeb",
    surface: "#ffffff",
    text: "#78350f",
    text_secondary: "#92400e",
    border: "#fde68a",
    accent: "#fcd34d",
};

const LOW_ENERGY_THEME: ThemeColors = ThemeColors {
    primary: "#d946ef",
    secondary: "#e879f9",
    background: "#fdf4ff",
    surface: "#ffffff",
    text: "#701a75",
    text_secondary: "#86198f",
    border: "#f5d0fe",
    accent: "#f0abfc",
};

/// Palette for `mood`; no mood means the focused palette.
pub fn theme_for(mood: Option<Mood>) -> ThemeColors {
    match mood.unwrap_or(Mood::Focused) {
        Mood::Overwhelmed => OVERWHELMED_THEME,
        Mood::Focused => FOCUSED_THEME,
        Mood::LowEnergy => LOW_ENERGY_THEME,
    }
}

/// Animation timing for `mood`; no mood means the focused profile.
pub fn animation_for(mood: Option<Mood>) -> AnimationProfile {
    match mood.unwrap_or(Mood::Focused) {
        Mood::Overwhelmed => AnimationProfile {
            duration_ms: 800,
            easing: "ease-out",
            spring: SpringConfig {
                damping: 20,
                stiffness: 100,
            },
        },
        Mood::Focused => AnimationProfile {
            duration_ms: 300,
            easing: "ease-in-out",
            spring: SpringConfig {
                damping: 15,
                stiffness: 200,
            },
        },
        Mood::LowEnergy => AnimationProfile {
            duration_ms: 1200,
            easing: "ease-in",
            spring: SpringConfig {
                damping: 25,
                stiffness: 80,
            },
        },
    }
}
