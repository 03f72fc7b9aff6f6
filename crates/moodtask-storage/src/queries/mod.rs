// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules, one per table.

pub mod assists;
pub mod emotional_states;
pub mod profiles;
pub mod tasks;
