//! Configuration for summarization, vectorization and batch runs
//!
//! Every tunable that shapes the feature set lives here and is passed
//! explicitly into the pipeline. Values come from defaults, an optional
//! TOML file, and finally CLI overrides.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "replay-summaries.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the `raw/replays`, `interim` and `processed` directories
    pub data_dir: PathBuf,
    pub summary: SummaryConfig,
    pub vectorize: VectorizeConfig,
    pub batch: BatchConfig,
    pub store: StoreConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            summary: SummaryConfig::default(),
            vectorize: VectorizeConfig::default(),
            batch: BatchConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

/// Parameters of the filter, aggregate and weight stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Seconds after which a repeat counts half as much as the first instance
    pub half_life_seconds: f64,
    /// Latest first occurrence (inclusive) for an action to be admitted
    pub initial_window_seconds: u32,
    /// Ability prefixes that mark production or tech commands
    pub action_prefixes: Vec<String>,
    /// Canonical names that never produce a rollup
    pub banned_actions: BTreeSet<String>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            half_life_seconds: 120.0,
            initial_window_seconds: 450,
            action_prefixes: ["Train", "Build", "Morph", "Upgrade", "Research"]
                .into_iter()
                .map(String::from)
                .collect(),
            banned_actions: ["CreepTumor", "ToOverseer"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizeConfig {
    /// Start time assumed for actions a player never performed
    pub infinity_seconds: f64,
    /// Floor applied to start times before inverting them
    pub epsilon_seconds: f64,
}

impl Default for VectorizeConfig {
    fn default() -> Self {
        Self {
            infinity_seconds: 3600.0,
            epsilon_seconds: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Replay files processed concurrently
    pub workers: usize,
    /// Hard ceiling on replay files processed per run
    pub max_replays: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        let cpus = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            workers: cpus.saturating_sub(2).max(1),
            max_replays: 10_000,
        }
    }
}

/// What to do when a persisted collection cannot be read back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptStorePolicy {
    /// Abort the merge and leave the file untouched
    #[default]
    Fail,
    /// Move the unreadable file aside and start a fresh collection
    Rebuild,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub on_corrupt: CorruptStorePolicy,
}

impl Config {
    /// Load configuration from an explicit file, the default file, or defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.summary.half_life_seconds > 0.0) {
            return Err(Error::config(format!(
                "half_life_seconds must be positive, got {}",
                self.summary.half_life_seconds
            )));
        }
        if !(self.vectorize.infinity_seconds > 0.0) || !(self.vectorize.epsilon_seconds > 0.0) {
            return Err(Error::config(
                "infinity_seconds and epsilon_seconds must be positive",
            ));
        }
        if self.batch.workers == 0 {
            return Err(Error::config("workers must be at least 1"));
        }
        Ok(())
    }

    pub fn replays_dir(&self) -> PathBuf {
        self.data_dir.join("raw").join("replays")
    }

    pub fn interim_dir(&self) -> PathBuf {
        self.data_dir.join("interim")
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.data_dir.join("processed")
    }
}
