// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid bind hosts, non-empty paths, and usable API endpoints.

use crate::diagnostic::ConfigError;
use crate::model::MoodtaskConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &MoodtaskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if !LOG_LEVELS.contains(&config.app.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level `{}` must be one of {}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let base_url = config.gemini.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(ConfigError::Validation {
            message: format!("gemini.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if config.gemini.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.model must not be empty".to_string(),
        });
    }

    if config.gemini.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gemini.timeout_secs must be at least 1".to_string(),
        });
    }

    if let Some(key) = &config.gemini.api_key
        && key.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "gemini.api_key must not be blank when set".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
