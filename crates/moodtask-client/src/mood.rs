// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Current mood and recent mood history.

use std::sync::Arc;

use moodtask_core::{EmotionalState, Mood, MoodtaskError, StorageAdapter};
use tokio::sync::Mutex;
use tracing::debug;

/// Number of states kept by [`MoodStore::fetch_history`].
pub const HISTORY_LIMIT: i64 = 50;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoodState {
    pub current_mood: Option<Mood>,
    /// Newest first.
    pub history: Vec<EmotionalState>,
}

pub struct MoodStore {
    storage: Arc<dyn StorageAdapter>,
    state: Mutex<MoodState>,
}

impl MoodStore {
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        Self {
            storage,
            state: Mutex::new(MoodState::default()),
        }
    }

    /// Logs `mood` for the user and makes it current.
    pub async fn set_mood(&self, mood: Mood, user_id: &str) -> Result<EmotionalState, MoodtaskError> {
        let mut state = self.state.lock().await;
        let entry = EmotionalState::new(user_id, mood);
        self.storage.insert_emotional_state(&entry).await?;
        debug!(user_id, %mood, "mood logged");
        state.current_mood = Some(mood);
        state.history.insert(0, entry.clone());
        Ok(entry)
    }

    /// Reloads the latest [`HISTORY_LIMIT`] states; the newest becomes current.
    pub async fn fetch_history(&self, user_id: &str) -> Result<Vec<EmotionalState>, MoodtaskError> {
        let mut state = self.state.lock().await;
        let history = self
            .storage
            .list_emotional_states(user_id, Some(HISTORY_LIMIT))
            .await?;
        state.current_mood = history.first().map(|s| s.mood);
        state.history = history.clone();
        Ok(history)
    }

    /// Reads only the single latest state and updates the current mood.
    pub async fn current_mood(&self, user_id: &str) -> Result<Option<Mood>, MoodtaskError> {
        let mut state = self.state.lock().await;
        let mood = self
            .storage
            .latest_emotional_state(user_id)
            .await?
            .map(|s| s.mood);
        state.current_mood = mood;
        Ok(mood)
    }

    pub async fn snapshot(&self) -> MoodState {
        self.state.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use moodtask_test_utils::TestHarness;

    #[tokio::test]
    async fn set_mood_prepends_and_becomes_current() {
        let h = TestHarness::builder().build().await.unwrap();
        let store = MoodStore::new(h.storage_adapter());

        store.set_mood(Mood::Focused, "u1").await.unwrap();
        store.set_mood(Mood::LowEnergy, "u1").await.unwrap();

        let snap = store.snapshot().await;
        assert_eq!(snap.current_mood, Some(Mood::LowEnergy));
        let moods: Vec<Mood> = snap.history.iter().map(|s| s.mood).collect();
        assert_eq!(moods, [Mood::LowEnergy, Mood::Focused]);
    }

    #[tokio::test]
    async fn history_is_capped_and_newest_first() {
        let h = TestHarness::builder().build().await.unwrap();
        let start = Utc::now() - Duration::days(10);
        for i in 0..55 {
            let mood = if i == 54 { Mood::Overwhelmed } else { Mood::Focused };
            h.seed_mood("u1", mood, start + Duration::minutes(i)).await.unwrap();
        }
        let store = MoodStore::new(h.storage_adapter());

        let history = store.fetch_history("u1").await.unwrap();
        assert_eq!(history.len(), 50);
        assert_eq!(history[0].mood, Mood::Overwhelmed);
        assert!(history.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
        assert_eq!(store.snapshot().await.current_mood, Some(Mood::Overwhelmed));
    }

    #[tokio::test]
    async fn current_mood_for_new_user_is_none() {
        let h = TestHarness::builder().build().await.unwrap();
        let store = MoodStore::new(h.storage_adapter());
        assert_eq!(store.current_mood("fresh").await.unwrap(), None);

        h.seed_mood("fresh", Mood::Focused, Utc::now()).await.unwrap();
        assert_eq!(store.current_mood("fresh").await.unwrap(), Some(Mood::Focused));
    }
}
