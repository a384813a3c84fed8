//! Find command implementation

use crate::batch::{discover_replays, find_replay};
use crate::config::Config;
use crate::core::parse_seat_replay_id;
use crate::error::Error;
use crate::replay::JsonReplayLoader;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

pub struct FindParams {
    pub replay_id: String,
    pub output_directory: PathBuf,
    pub pattern: Option<String>,
    pub workers: Option<usize>,
}

pub async fn run_find_command(config: Config, params: FindParams) -> Result<()> {
    let (base_id, seat) = parse_seat_replay_id(&params.replay_id).ok_or_else(|| {
        Error::config(format!(
            "replay id '{}' is not of the form <hash>_<seat>",
            params.replay_id
        ))
    })?;

    let files = discover_replays(&config, params.pattern.as_deref())?;
    println!("Searching {} replays", files.len());

    let workers = params.workers.unwrap_or(config.batch.workers);
    let Some(found) = find_replay(files, Arc::new(JsonReplayLoader), base_id, seat, workers).await
    else {
        println!("No replay matches {}", params.replay_id);
        return Ok(());
    };

    fs::create_dir_all(&params.output_directory).with_context(|| {
        format!(
            "Failed to create output directory {}",
            params.output_directory.display()
        )
    })?;
    let file_name = found
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let target = params
        .output_directory
        .join(format!("{}-{}-{}", base_id, seat, file_name));
    fs::copy(&found.path, &target)
        .with_context(|| format!("Failed to copy {}", found.path.display()))?;

    println!("Found replay for {}. Placed in {}", found.player, target.display());
    Ok(())
}
