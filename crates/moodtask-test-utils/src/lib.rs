// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Moodtask integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock completion provider with scripted replies
//! - [`TestHarness`] - Temp SQLite storage plus a mock provider, with seeding helpers

pub mod harness;
pub mod mock_provider;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_provider::MockProvider;
