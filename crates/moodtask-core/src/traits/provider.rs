// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for generative-language APIs.

use async_trait::async_trait;

use crate::error::MoodtaskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for an external text-completion oracle.
///
/// Implementations make exactly one upstream round trip per call. A missing
/// or empty completion is reported as [`MoodtaskError::Provider`].
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends a prompt and returns the completion text.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, MoodtaskError>;
}
