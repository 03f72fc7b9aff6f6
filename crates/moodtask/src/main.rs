// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Moodtask - mood-adaptive task management backend.
//!
//! This is the binary entry point: the HTTP gateway plus a few offline
//! commands that run the heuristic engine against local storage.

mod commands;
mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use moodtask_config::model::MoodtaskConfig;

/// Moodtask - mood-adaptive task management backend.
#[derive(Parser, Debug)]
#[command(name = "moodtask", version, about, long_about = None)]
struct Cli {
    /// Path to a config file, replacing the XDG lookup.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway.
    Serve,
    /// Rank a user's pending tasks for a mood.
    Prioritize {
        #[arg(long)]
        user: String,
        /// Current mood; unknown values rank neutrally.
        #[arg(long, default_value = "")]
        mood: String,
    },
    /// Pick a motivational quote.
    Quote {
        mood: String,
        /// Time context (morning, afternoon, evening, weekend).
        #[arg(long)]
        context: Option<String>,
    },
    /// Show the theme colors and animation profile for a mood.
    Theme { mood: Option<String> },
    /// Summarize a user's recent moods.
    Analyze {
        #[arg(long)]
        user: String,
        #[arg(long, default_value_t = moodtask_engine::analysis::DEFAULT_DAYS)]
        days: i64,
    },
    /// Print the effective configuration.
    Config,
}

fn load_config(path: Option<&PathBuf>) -> MoodtaskConfig {
    let loaded = match path {
        Some(path) => moodtask_config::load_and_validate_path(path),
        None => moodtask_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            moodtask_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());
    serve::init_tracing(&config.app.log_level);

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await.map(|()| None),
        Some(Commands::Prioritize { user, mood }) => {
            commands::run_prioritize(&config, &user, &mood).await.map(Some)
        }
        Some(Commands::Quote { mood, context }) => {
            commands::run_quote(&mood, context.as_deref()).map(Some)
        }
        Some(Commands::Theme { mood }) => commands::run_theme(mood.as_deref()).map(Some),
        Some(Commands::Analyze { user, days }) => {
            commands::run_analyze(&config, &user, days).await.map(Some)
        }
        Some(Commands::Config) => commands::run_config(&config).map(Some),
        None => {
            println!("moodtask: use --help for available commands");
            Ok(None)
        }
    };

    match result {
        Ok(Some(output)) => println!("{output}"),
        Ok(None) => {}
        Err(e) => {
            eprintln!("moodtask: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = moodtask_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.app.name, "moodtask");
    }

    #[test]
    fn analyze_days_defaults_to_a_week() {
        let cli = Cli::parse_from(["moodtask", "analyze", "--user", "u1"]);
        match cli.command {
            Some(Commands::Analyze { user, days }) => {
                assert_eq!(user, "u1");
                assert_eq!(days, 7);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
