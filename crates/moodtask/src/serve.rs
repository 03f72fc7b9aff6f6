// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `moodtask serve` command implementation.
//!
//! Opens SQLite storage, builds the Gemini provider, and runs the HTTP
//! gateway until SIGINT/SIGTERM, then checkpoints the database.

use std::sync::Arc;

use moodtask_config::model::MoodtaskConfig;
use moodtask_core::{MoodtaskError, PluginAdapter, StorageAdapter};
use moodtask_gateway::{AppState, ServerConfig, start_server};
use moodtask_gemini::GeminiProvider;
use moodtask_storage::SqliteStorage;
use tracing::{info, warn};

use crate::shutdown;

/// Opens and migrates the configured SQLite database.
pub async fn open_storage(config: &MoodtaskConfig) -> Result<Arc<SqliteStorage>, MoodtaskError> {
    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await?;
    Ok(Arc::new(storage))
}

/// Runs the `moodtask serve` command.
pub async fn run_serve(config: MoodtaskConfig) -> Result<(), MoodtaskError> {
    info!(app = %config.app.name, "starting moodtask serve");

    let storage = open_storage(&config).await?;
    let provider = Arc::new(GeminiProvider::new(&config.gemini)?);

    let state = AppState::new(storage.clone(), provider.clone());
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    let cancel = shutdown::install_signal_handler();
    let result = start_server(&server_config, state, async move {
        cancel.cancelled().await;
    })
    .await;

    if let Err(e) = provider.shutdown().await {
        warn!(error = %e, "provider shutdown failed");
    }
    if let Err(e) = storage.close().await {
        warn!(error = %e, "storage close failed");
    }
    info!("moodtask stopped");
    result
}

/// Initializes the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence when set. Output goes to stderr so command
/// output on stdout stays machine-readable.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("moodtask={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
