//! CLI argument structures

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Turn replays into opening build-order features
#[derive(Parser)]
#[command(name = "replay-summaries")]
#[command(about = "replay-summaries - Summarize replays into opening build-order features", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory holding raw/replays, interim and processed
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the summarization parameters
#[derive(Args, Debug, Clone, Default)]
pub struct SummaryOverrides {
    /// Seconds after which a repeated action counts half
    #[arg(long, value_name = "SECONDS")]
    pub half_life: Option<f64>,

    /// Latest first occurrence for an action to be part of the opening
    #[arg(long, value_name = "SECONDS")]
    pub window: Option<u32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize replays and merge them into the per-race collections
    Summarize {
        /// Glob of replay files (defaults to <data-dir>/raw/replays/*)
        #[arg(long, value_name = "PATTERN")]
        pattern: Option<String>,

        /// Number of replays processed concurrently
        #[arg(short = 'j', long)]
        workers: Option<usize>,

        /// Maximum number of replays to process
        #[arg(short = 'n', long)]
        max_replays: Option<usize>,

        /// Move an unreadable collection aside and rebuild it instead of failing
        #[arg(long)]
        rebuild_corrupt: bool,

        /// Hide the progress bar
        #[arg(short, long)]
        quiet: bool,

        #[command(flatten)]
        overrides: SummaryOverrides,
    },

    /// Build feature tables from the stored summaries
    Vectorize {
        /// Only vectorize this race
        #[arg(long)]
        race: Option<String>,
    },

    /// Locate the replay file a summary id came from
    Find {
        /// Summary id in the form <hash>_<seat>
        #[arg(long)]
        replay_id: String,

        /// Directory the replay is copied into
        #[arg(long)]
        output_directory: PathBuf,

        /// Glob of replay files (defaults to <data-dir>/raw/replays/*)
        #[arg(long, value_name = "PATTERN")]
        pattern: Option<String>,

        /// Number of replays searched concurrently
        #[arg(short = 'j', long)]
        workers: Option<usize>,
    },
}
