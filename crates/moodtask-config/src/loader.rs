// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./moodtask.toml` > `~/.config/moodtask/moodtask.toml` > `/etc/moodtask/moodtask.toml`
//! with environment variable overrides via `MOODTASK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::MoodtaskConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/moodtask/moodtask.toml` (system-wide)
/// 3. `~/.config/moodtask/moodtask.toml` (user XDG config)
/// 4. `./moodtask.toml` (local directory)
/// 5. `MOODTASK_*` environment variables
pub fn load_config() -> Result<MoodtaskConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<MoodtaskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MoodtaskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MoodtaskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MoodtaskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(MoodtaskConfig::default()))
        .merge(Toml::file("/etc/moodtask/moodtask.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("moodtask/moodtask.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("moodtask.toml"))
        .merge(env_provider())
}

/// Environment provider with explicit section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that
/// `MOODTASK_STORAGE_DATABASE_PATH` maps to `storage.database_path`,
/// not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("MOODTASK_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name to its dotted config key.
pub(crate) fn map_env_key(key: &str) -> String {
    key.replacen("app_", "app.", 1)
        .replacen("server_", "server.", 1)
        .replacen("storage_", "storage.", 1)
        .replacen("gemini_", "gemini.", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("storage_database_path"), "storage.database_path");
        assert_eq!(map_env_key("gemini_api_key"), "gemini.api_key");
        assert_eq!(map_env_key("server_port"), "server.port");
        assert_eq!(map_env_key("app_log_level"), "app.log_level");
    }

    #[test]
    fn string_overrides_defaults() {
        let config = load_config_from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }
}
