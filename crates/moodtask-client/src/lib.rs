// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-side state for Moodtask.
//!
//! Four independent stores cache session, mood, task, and AI state on top
//! of a [`StorageAdapter`]. Each store serializes its own mutations behind
//! a mutex held for the full storage round trip; there are no cross-store
//! transactions. AI requests go through the gateway via [`GatewayClient`].

pub mod api;
pub mod assist;
pub mod mood;
pub mod session;
pub mod tasks;

use std::sync::Arc;

use moodtask_core::StorageAdapter;

pub use api::GatewayClient;
pub use assist::{AssistStatus, AssistStore};
pub use mood::{MoodState, MoodStore};
pub use session::{SessionState, SessionStore};
pub use tasks::TaskStore;

/// The stores an application instance works with, built over one storage
/// backend.
pub struct AppStores {
    pub session: SessionStore,
    pub mood: MoodStore,
    pub tasks: TaskStore,
    pub assist: AssistStore,
}

impl AppStores {
    pub fn new(storage: Arc<dyn StorageAdapter>, client: GatewayClient) -> Self {
        Self {
            session: SessionStore::new(storage.clone()),
            mood: MoodStore::new(storage.clone()),
            tasks: TaskStore::new(storage.clone()),
            assist: AssistStore::new(client, storage),
        }
    }
}
