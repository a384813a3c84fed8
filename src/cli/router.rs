//! Command routing and execution

use crate::cli::args::Commands;
use crate::cli::commands::*;
use crate::config::Config;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Load configuration and apply the global overrides
pub fn load_config(config_path: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<Config> {
    let mut config = Config::load(config_path.as_deref()).context("Failed to load configuration")?;
    if let Some(data_dir) = data_dir {
        config.data_dir = data_dir;
    }
    Ok(config)
}

/// Execute a CLI command based on the parsed arguments
pub async fn execute_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Summarize {
            pattern,
            workers,
            max_replays,
            rebuild_corrupt,
            quiet,
            overrides,
        } => {
            run_summarize_command(
                config,
                SummarizeParams {
                    pattern,
                    workers,
                    max_replays,
                    rebuild_corrupt,
                    quiet,
                    overrides,
                },
            )
            .await
        }
        Commands::Vectorize { race } => run_vectorize_command(config, race).await,
        Commands::Find {
            replay_id,
            output_directory,
            pattern,
            workers,
        } => {
            run_find_command(
                config,
                FindParams {
                    replay_id,
                    output_directory,
                    pattern,
                    workers,
                },
            )
            .await
        }
    }
}
