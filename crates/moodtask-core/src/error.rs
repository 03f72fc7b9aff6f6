// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Moodtask.

use thiserror::Error;

/// The primary error type used across all Moodtask adapter traits and services.
#[derive(Debug, Error)]
pub enum MoodtaskError {
    /// Configuration errors (invalid TOML, missing API key, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Generative-language provider errors (non-2xx, empty completion, transport).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A request or entity failed validation (missing field, blank title).
    #[error("{0}")]
    Validation(String),

    /// The caller is not entitled to a gated feature.
    #[error("{0}")]
    Entitlement(String),

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MoodtaskError {
    /// Message suitable for returning to an API caller.
    ///
    /// Provider errors surface their raw upstream message without the
    /// `provider error:` prefix.
    pub fn public_message(&self) -> String {
        match self {
            MoodtaskError::Provider { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
