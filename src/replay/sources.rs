//! Discovery of replay inputs

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const REPLAY_SUFFIXES: [&str; 2] = [".json", ".json.gz"];

/// Whether a file looks like a loadable replay dump
pub fn is_replay_file(path: &Path) -> bool {
    let name = path.to_string_lossy().to_lowercase();
    REPLAY_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Expand a glob into replay files, sorted for stable batch order
pub fn replay_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in glob::glob(pattern)? {
        match entry {
            Ok(path) if path.is_file() && is_replay_file(&path) => files.push(path),
            Ok(path) => debug!("Ignoring non-replay input {}", path.display()),
            Err(e) => warn!("Cannot read replay input: {}", e),
        }
    }
    files.sort();
    Ok(files)
}

/// Glob matching every entry directly under a replay directory
pub fn directory_pattern(dir: &Path) -> String {
    dir.join("*").to_string_lossy().into_owned()
}
