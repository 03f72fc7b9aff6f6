// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Moodtask configuration system.

use moodtask_config::diagnostic::ConfigError;
use moodtask_config::model::MoodtaskConfig;
use moodtask_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

#[test]
fn valid_toml_deserializes_into_moodtask_config() {
    let toml = r#"
[app]
name = "moodtask-dev"
log_level = "debug"

[server]
host = "0.0.0.0"
port = 9090

[storage]
database_path = "/tmp/test.db"
wal_mode = false

[gemini]
api_key = "g-123"
model = "gemini-1.5-flash"
base_url = "http://localhost:4000"
timeout_secs = 5
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.app.name, "moodtask-dev");
    assert_eq!(config.app.log_level, "debug");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.storage.database_path, "/tmp/test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.gemini.api_key.as_deref(), Some("g-123"));
    assert_eq!(config.gemini.model, "gemini-1.5-flash");
    assert_eq!(config.gemini.base_url, "http://localhost:4000");
    assert_eq!(config.gemini.timeout_secs, 5);
}

#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.app.name, "moodtask");
    assert_eq!(config.app.log_level, "info");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8787);
    assert!(config.storage.database_path.ends_with("moodtask.db"));
    assert!(config.storage.wal_mode);
    assert!(config.gemini.api_key.is_none());
    assert_eq!(config.gemini.model, "gemini-pro");
    assert_eq!(
        config.gemini.base_url,
        "https://generativelanguage.googleapis.com"
    );
    assert_eq!(config.gemini.timeout_secs, 60);
}

#[test]
fn unknown_field_in_gemini_produces_error() {
    let toml = r#"
[gemini]
modle = "gemini-pro"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("modle"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

#[test]
fn unknown_key_diagnostic_suggests_correction() {
    let toml = r#"
[server]
prot = 8080
"#;

    let errors = load_and_validate_str(toml).expect_err("unknown key should fail");
    let suggestion = errors.iter().find_map(|e| match e {
        ConfigError::UnknownKey { key, suggestion, .. } if key == "prot" => suggestion.clone(),
        _ => None,
    });
    assert_eq!(suggestion.as_deref(), Some("port"));
}

#[test]
fn wrong_type_is_reported() {
    let toml = r#"
[server]
port = "eighty"
"#;
    let errors = load_and_validate_str(toml).expect_err("string port should fail");
    assert!(!errors.is_empty());
}

#[test]
fn semantic_validation_runs_after_parse() {
    let toml = r#"
[storage]
database_path = ""
"#;
    let errors = load_and_validate_str(toml).expect_err("empty path should fail");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))
    ));
}

/// `MOODTASK_GEMINI_API_KEY` maps to `gemini.api_key`, not `gemini.api.key`.
#[test]
fn dotted_override_sets_gemini_api_key() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: MoodtaskConfig = Figment::new()
        .merge(Serialized::defaults(MoodtaskConfig::default()))
        .merge(Toml::string("[gemini]\napi_key = \"from-toml\"\n"))
        .merge(("gemini.api_key", "from-env"))
        .extract()
        .expect("should merge env override");

    assert_eq!(config.gemini.api_key.as_deref(), Some("from-env"));
}

#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: MoodtaskConfig = Figment::new()
        .merge(Serialized::defaults(MoodtaskConfig::default()))
        .merge(Toml::file("/nonexistent/path/moodtask.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.app.name, "moodtask");
}

#[test]
fn explicit_path_is_loaded_and_validated() {
    let dir = std::env::temp_dir().join(format!("moodtask-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("moodtask.toml");
    std::fs::write(&path, "[server]\nport = 7001\n").unwrap();

    let config = load_and_validate_path(&path).expect("file config should load");
    assert_eq!(config.server.port, 7001);

    std::fs::remove_dir_all(&dir).ok();
}
