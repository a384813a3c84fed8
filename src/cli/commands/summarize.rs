//! Summarize command implementation

use crate::batch::run_summarize;
use crate::cli::args::SummaryOverrides;
use crate::config::{Config, CorruptStorePolicy};
use crate::replay::JsonReplayLoader;
use anyhow::{Context, Result};
use std::sync::Arc;

pub struct SummarizeParams {
    pub pattern: Option<String>,
    pub workers: Option<usize>,
    pub max_replays: Option<usize>,
    pub rebuild_corrupt: bool,
    pub quiet: bool,
    pub overrides: SummaryOverrides,
}

/// Apply command-line overrides on top of the loaded configuration
pub fn apply_overrides(mut config: Config, params: &SummarizeParams) -> crate::Result<Config> {
    if let Some(workers) = params.workers {
        config.batch.workers = workers;
    }
    if let Some(max_replays) = params.max_replays {
        config.batch.max_replays = max_replays;
    }
    if let Some(half_life) = params.overrides.half_life {
        config.summary.half_life_seconds = half_life;
    }
    if let Some(window) = params.overrides.window {
        config.summary.initial_window_seconds = window;
    }
    if params.rebuild_corrupt {
        config.store.on_corrupt = CorruptStorePolicy::Rebuild;
    }
    config.validate()?;
    Ok(config)
}

pub async fn run_summarize_command(config: Config, params: SummarizeParams) -> Result<()> {
    let config = apply_overrides(config, &params).context("Invalid summarize options")?;

    let report = run_summarize(
        &config,
        Arc::new(JsonReplayLoader),
        params.pattern.as_deref(),
        !params.quiet,
    )
    .await
    .context("Failed to build summaries")?;

    println!(
        "Processed {} replays: {} summarized, {} skipped, {} failed",
        report.files, report.summarized_matches, report.skipped_matches, report.failed_files
    );
    for merge in &report.merges {
        if let Some(race) = merge.race {
            println!(
                "  {}: {} new, {} already stored, {} duplicates",
                race, merge.added, merge.existing, merge.duplicates
            );
        }
        if let Some(backup) = &merge.backup {
            println!("  unreadable collection moved to {}", backup.display());
        }
    }
    Ok(())
}
