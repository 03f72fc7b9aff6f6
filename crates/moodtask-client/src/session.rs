// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signed-in user and profile state.

use std::sync::Arc;

use moodtask_core::{MoodtaskError, ProfilePatch, StorageAdapter, UserProfile};
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user_id: Option<String>,
    pub profile: Option<UserProfile>,
}

/// Holds the current user id and their profile.
///
/// Credential checks happen outside this crate; a session is established
/// by handing in an already-authenticated user id.
pub struct SessionStore {
    storage: Arc<dyn StorageAdapter>,
    state: Mutex<SessionState>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        Self {
            storage,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Starts a session for `user_id` and loads its profile, if one exists.
    pub async fn initialize(&self, user_id: &str) -> Result<Option<UserProfile>, MoodtaskError> {
        let mut state = self.state.lock().await;
        let profile = self.storage.get_profile(user_id).await?;
        debug!(user_id, has_profile = profile.is_some(), "session initialized");
        state.user_id = Some(user_id.to_string());
        state.profile = profile.clone();
        Ok(profile)
    }

    /// Creates the profile for a newly registered user and signs them in.
    pub async fn sign_up(
        &self,
        user_id: &str,
        display_name: Option<String>,
        neurodivergent_status: Option<String>,
    ) -> Result<UserProfile, MoodtaskError> {
        let mut state = self.state.lock().await;
        let profile = UserProfile::new(user_id, display_name, neurodivergent_status);
        self.storage.create_profile(&profile).await?;
        info!(user_id, "profile created");
        state.user_id = Some(user_id.to_string());
        state.profile = Some(profile.clone());
        Ok(profile)
    }

    /// Applies `patch` to the signed-in user's profile.
    pub async fn update_profile(&self, patch: &ProfilePatch) -> Result<UserProfile, MoodtaskError> {
        let mut state = self.state.lock().await;
        let Some(user_id) = state.user_id.clone() else {
            return Err(MoodtaskError::Validation("No user found".to_string()));
        };
        let profile = self.storage.update_profile(&user_id, patch).await?;
        state.profile = Some(profile.clone());
        Ok(profile)
    }

    pub async fn sign_out(&self) {
        *self.state.lock().await = SessionState::default();
    }

    pub async fn user_id(&self) -> Option<String> {
        self.state.lock().await.user_id.clone()
    }

    pub async fn profile(&self) -> Option<UserProfile> {
        self.state.lock().await.profile.clone()
    }

    /// Whether the signed-in user may call the AI endpoints.
    pub async fn ai_enabled(&self) -> bool {
        self.state
            .lock()
            .await
            .profile
            .as_ref()
            .is_some_and(|p| p.dev_mode_enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodtask_test_utils::TestHarness;

    #[tokio::test]
    async fn update_requires_signed_in_user() {
        let h = TestHarness::builder().build().await.unwrap();
        let store = SessionStore::new(h.storage_adapter());
        let err = store
            .update_profile(&ProfilePatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No user found");
    }

    #[tokio::test]
    async fn sign_up_then_enable_dev_mode() {
        let h = TestHarness::builder().build().await.unwrap();
        let store = SessionStore::new(h.storage_adapter());

        store
            .sign_up("u1", Some("Ari".into()), Some("adhd".into()))
            .await
            .unwrap();
        assert!(!store.ai_enabled().await);

        let patch = ProfilePatch {
            dev_mode_enabled: Some(true),
            ..ProfilePatch::default()
        };
        let updated = store.update_profile(&patch).await.unwrap();
        assert!(updated.dev_mode_enabled);
        assert_eq!(updated.display_name.as_deref(), Some("Ari"));
        assert!(store.ai_enabled().await);

        store.sign_out().await;
        assert!(store.profile().await.is_none());
        assert!(store.user_id().await.is_none());
    }

    #[tokio::test]
    async fn initialize_loads_existing_profile() {
        let h = TestHarness::builder()
            .with_profile("dev", true)
            .build()
            .await
            .unwrap();
        let store = SessionStore::new(h.storage_adapter());

        let profile = store.initialize("dev").await.unwrap().unwrap();
        assert!(profile.dev_mode_enabled);
        assert!(store.initialize("nobody").await.unwrap().is_none());
        assert_eq!(store.user_id().await.as_deref(), Some("nobody"));
    }
}
