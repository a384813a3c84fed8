//! Loading replay dumps from disk

use super::types::Replay;
use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Source of parsed replays
///
/// Implementations wrap whatever produces [`Replay`] values; the batch
/// driver only ever sees this trait.
pub trait ReplayLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Replay>;
}

/// Reads replay dumps written as JSON, optionally gzip-compressed
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReplayLoader;

impl ReplayLoader for JsonReplayLoader {
    fn load(&self, path: &Path) -> Result<Replay> {
        let file = File::open(path).map_err(|e| Error::replay(path, e))?;
        let reader: Box<dyn Read> = if is_gzip(path) {
            Box::new(GzDecoder::new(BufReader::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };
        serde_json::from_reader(reader).map_err(|e| Error::replay(path, e))
    }
}

fn is_gzip(path: &Path) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(".gz")
}
