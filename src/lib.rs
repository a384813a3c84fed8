//! # replay-summaries
//!
//! Turns recorded real-time strategy matches into per-player summaries of
//! their opening build order, and those summaries into feature tables for
//! machine-learning analysis.
//!
//! ## Usage
//!
//! ```bash
//! replay-summaries summarize [--pattern "data/raw/replays/*.json"] [-j workers]
//! replay-summaries vectorize [--race zerg]
//! replay-summaries find --replay-id <hash>_<seat> --output-directory out/
//! ```
//!
//! ## Modules
//!
//! - `core` - Pure summarization: event filter, action aggregation, decay weights, summaries, vectorization
//! - `replay` - Replay data model and loaders for parser dumps
//! - `storage` - Per-race summary collections with append-only merge
//! - `export` - CSV output of feature tables
//! - `batch` - Parallel batch driver and replay search
//! - `config` - Configuration management
//! - `cli` - Command-line interface
pub mod batch;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod replay;
pub mod storage;

pub use error::{Error, Result};
