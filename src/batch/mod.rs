//! Batch driver: parallel summarization followed by a serialized merge
//!
//! Each replay file is one unit of work, run on a blocking worker and
//! bounded by a semaphore. A failing file never affects its siblings.
//! Only after every task has finished are the summaries merged into the
//! store, one race at a time.

use crate::config::{Config, SummaryConfig};
use crate::core::{build_replay_id, summarize_match, MatchSummary, Race, Skip};
use crate::error::{Error, Result};
use crate::replay::{directory_pattern, replay_files, ReplayLoader};
use crate::storage::{MergeReport, SummaryStore};
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// What one replay file produced
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Summarized(Vec<MatchSummary>),
    Skipped(Skip),
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub files: usize,
    pub summarized_matches: usize,
    pub skipped_matches: usize,
    pub failed_files: usize,
    pub summaries: usize,
    pub merges: Vec<MergeReport>,
}

/// Summarize a single replay file
pub fn summarize_file(loader: &dyn ReplayLoader, path: &Path, config: &SummaryConfig) -> FileOutcome {
    let replay = match loader.load(path) {
        Ok(replay) => replay,
        Err(e) => return FileOutcome::Failed(e.to_string()),
    };
    match summarize_match(&replay, config) {
        Ok(summaries) => FileOutcome::Summarized(summaries),
        Err(skip) => FileOutcome::Skipped(skip),
    }
}

fn create_progress_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ "),
    );
    pb
}

/// Summarize files concurrently, `workers` at a time
///
/// Outcomes are returned in input order.
pub async fn summarize_files(
    files: Vec<PathBuf>,
    loader: Arc<dyn ReplayLoader>,
    config: Arc<SummaryConfig>,
    workers: usize,
    show_progress: bool,
) -> Vec<(PathBuf, FileOutcome)> {
    let progress = create_progress_bar(files.len(), show_progress);
    progress.set_message("Summarizing replays");
    let semaphore = Arc::new(Semaphore::new(workers.max(1)));

    let futures = files.into_iter().map(|path| {
        let semaphore = semaphore.clone();
        let loader = loader.clone();
        let config = config.clone();
        let progress = progress.clone();

        async move {
            let outcome = match semaphore.acquire_owned().await {
                Ok(_permit) => {
                    let task_path = path.clone();
                    tokio::task::spawn_blocking(move || {
                        summarize_file(loader.as_ref(), &task_path, &config)
                    })
                    .await
                    .unwrap_or_else(|e| FileOutcome::Failed(Error::from(e).to_string()))
                }
                Err(e) => FileOutcome::Failed(e.to_string()),
            };
            progress.inc(1);
            (path, outcome)
        }
    });

    let outcomes = join_all(futures).await;
    progress.finish_with_message("Done");
    outcomes
}

/// Tally outcomes and group summaries by self race
pub fn collect_outcomes(
    outcomes: Vec<(PathBuf, FileOutcome)>,
) -> (BatchReport, BTreeMap<Race, Vec<MatchSummary>>) {
    let mut report = BatchReport {
        files: outcomes.len(),
        ..BatchReport::default()
    };
    let mut by_race: BTreeMap<Race, Vec<MatchSummary>> = BTreeMap::new();

    for (path, outcome) in outcomes {
        match outcome {
            FileOutcome::Summarized(summaries) => {
                debug!("{}: {} summaries", path.display(), summaries.len());
                report.summarized_matches += 1;
                report.summaries += summaries.len();
                for summary in summaries {
                    by_race
                        .entry(summary.self_player.race)
                        .or_default()
                        .push(summary);
                }
            }
            FileOutcome::Skipped(skip) => {
                match &skip {
                    Skip::NotOneVsOne { .. } => debug!("Skipping {}: {}", path.display(), skip),
                    _ => warn!("Skipping {}: {}", path.display(), skip),
                }
                report.skipped_matches += 1;
            }
            FileOutcome::Failed(message) => {
                warn!("Failed to summarize {}: {}", path.display(), message);
                report.failed_files += 1;
            }
        }
    }

    (report, by_race)
}

/// Replay files for a run: an explicit glob or everything under `raw/replays`
pub fn discover_replays(config: &Config, pattern: Option<&str>) -> Result<Vec<PathBuf>> {
    let pattern = match pattern {
        Some(pattern) => pattern.to_string(),
        None => directory_pattern(&config.replays_dir()),
    };
    let mut files = replay_files(&pattern)?;
    let max_replays = config.batch.max_replays;
    if files.len() > max_replays {
        info!(
            "Found {} replays, processing the first {}",
            files.len(),
            max_replays
        );
        files.truncate(max_replays);
    }
    Ok(files)
}

/// Summarize every replay and merge the results into the store
pub async fn run_summarize(
    config: &Config,
    loader: Arc<dyn ReplayLoader>,
    pattern: Option<&str>,
    show_progress: bool,
) -> Result<BatchReport> {
    let files = discover_replays(config, pattern)?;
    info!(
        "Processing {} replays with {} workers",
        files.len(),
        config.batch.workers
    );

    let outcomes = summarize_files(
        files,
        loader,
        Arc::new(config.summary.clone()),
        config.batch.workers,
        show_progress,
    )
    .await;
    let (mut report, by_race) = collect_outcomes(outcomes);

    // All collections are checked up front so a corrupt one leaves every
    // race untouched.
    let store = SummaryStore::new(config.interim_dir(), config.store.on_corrupt);
    store.ensure_readable(by_race.keys().copied())?;
    for (race, summaries) in by_race {
        report.merges.push(store.merge(race, summaries)?);
    }

    info!(
        "Summarized {} of {} replays ({} skipped, {} failed)",
        report.summarized_matches, report.files, report.skipped_matches, report.failed_files
    );
    Ok(report)
}

/// A replay file matching a summary id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundReplay {
    pub path: PathBuf,
    pub seat: usize,
    /// Identity string of the player in the requested seat
    pub player: String,
}

fn match_replay(loader: &dyn ReplayLoader, path: &Path, base_id: &str, seat: usize) -> Option<FoundReplay> {
    let replay = match loader.load(path) {
        Ok(replay) => replay,
        Err(e) => {
            warn!("{}", e);
            return None;
        }
    };
    if !replay.is_one_vs_one() || build_replay_id(&replay) != base_id {
        return None;
    }
    let player = replay.player(seat as u32 + 1)?.to_string();
    Some(FoundReplay {
        path: path.to_path_buf(),
        seat,
        player,
    })
}

/// Search replay files for the match a summary id was computed from
pub async fn find_replay(
    files: Vec<PathBuf>,
    loader: Arc<dyn ReplayLoader>,
    base_id: &str,
    seat: usize,
    workers: usize,
) -> Option<FoundReplay> {
    let base_id: Arc<str> = Arc::from(base_id);
    let mut searches = stream::iter(files)
        .map(|path| {
            let loader = loader.clone();
            let base_id = base_id.clone();
            tokio::task::spawn_blocking(move || match_replay(loader.as_ref(), &path, &base_id, seat))
        })
        .buffer_unordered(workers.max(1));

    while let Some(result) = searches.next().await {
        match result {
            Ok(Some(found)) => return Some(found),
            Ok(None) => {}
            Err(e) => warn!("Search task failed: {}", e),
        }
    }
    None
}
