//! Per-race summary collections persisted as JSON

use crate::config::CorruptStorePolicy;
use crate::core::{MatchSummary, Race};
use crate::error::{Error, Result};
use chrono::Utc;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Outcome of merging a batch into a stored collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub race: Option<Race>,
    /// Summaries already in the collection before the merge
    pub existing: usize,
    pub added: usize,
    /// Incoming summaries skipped because their replay id was known
    pub duplicates: usize,
    /// Where an unreadable collection was moved before rebuilding
    pub backup: Option<PathBuf>,
}

/// Append-only store of summaries, one file per self race
///
/// Merging is a single-writer operation; callers must not merge into the
/// same store from several tasks at once.
#[derive(Debug, Clone)]
pub struct SummaryStore {
    root: PathBuf,
    on_corrupt: CorruptStorePolicy,
}

impl SummaryStore {
    pub fn new(root: impl Into<PathBuf>, on_corrupt: CorruptStorePolicy) -> Self {
        Self {
            root: root.into(),
            on_corrupt,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, race: Race) -> PathBuf {
        self.root.join(format!("summaries_{}.json", race))
    }

    /// Races with a stored collection
    pub fn races(&self) -> Vec<Race> {
        Race::ALL
            .into_iter()
            .filter(|&race| self.path_for(race).exists())
            .collect()
    }

    /// Read a collection; a missing file is an empty collection
    pub fn load(&self, race: Race) -> Result<Vec<MatchSummary>> {
        let path = self.path_for(race);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| Error::CorruptStore {
            path,
            message: e.to_string(),
        })
    }

    /// Fail if any of `races` has a collection that cannot be read back
    ///
    /// Lets a multi-race merge abort before writing anything. Under
    /// [`CorruptStorePolicy::Rebuild`] unreadable collections are recovered
    /// by [`merge`](Self::merge), so nothing is checked.
    pub fn ensure_readable(&self, races: impl IntoIterator<Item = Race>) -> Result<()> {
        if self.on_corrupt == CorruptStorePolicy::Rebuild {
            return Ok(());
        }
        for race in races {
            self.load(race)?;
        }
        Ok(())
    }

    /// Append summaries whose replay id is not stored yet
    pub fn merge(&self, race: Race, summaries: Vec<MatchSummary>) -> Result<MergeReport> {
        let mut report = MergeReport {
            race: Some(race),
            ..MergeReport::default()
        };

        let mut all = match self.load(race) {
            Ok(existing) => existing,
            Err(Error::CorruptStore { path, message }) => match self.on_corrupt {
                CorruptStorePolicy::Fail => return Err(Error::CorruptStore { path, message }),
                CorruptStorePolicy::Rebuild => {
                    let backup = backup_path(&path);
                    fs::rename(&path, &backup)?;
                    warn!(
                        "Summary store {} corrupted ({}), backed up to {}",
                        path.display(),
                        message,
                        backup.display()
                    );
                    report.backup = Some(backup);
                    Vec::new()
                }
            },
            Err(e) => return Err(e),
        };
        report.existing = all.len();

        let mut known: HashSet<String> = all.iter().map(|s| s.replay_id.clone()).collect();
        for summary in summaries {
            if known.insert(summary.replay_id.clone()) {
                all.push(summary);
                report.added += 1;
            } else {
                debug!("Skipping known replay {}", summary.replay_id);
                report.duplicates += 1;
            }
        }

        self.write(race, &all)?;
        info!(
            "Wrote {} ({} new, {} total)",
            self.path_for(race).display(),
            report.added,
            all.len()
        );
        Ok(report)
    }

    fn write(&self, race: Race, summaries: &[MatchSummary]) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        let final_file = self.path_for(race);
        let temp_file = final_file.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(summaries)?;
        fs::write(&temp_file, json)?;
        fs::rename(&temp_file, &final_file)?;
        Ok(())
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".corrupted.{}", Utc::now().timestamp()));
    path.with_file_name(name)
}
