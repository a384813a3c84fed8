//! CSV export of feature frames

use crate::core::FeatureFrame;
use crate::error::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Column holding the row index in written files
pub const INDEX_COL: &str = "replay_id";

/// Write a frame with a leading replay id column
pub fn write_frame<W: Write>(frame: &FeatureFrame, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(frame.columns.len() + 1);
    header.push(INDEX_COL);
    header.extend(frame.columns.iter().map(String::as_str));
    csv.write_record(&header)?;

    for (replay_id, row) in frame.index.iter().zip(&frame.rows) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(replay_id.clone());
        record.extend(row.iter().map(|cell| cell.to_string()));
        csv.write_record(&record)?;
    }
    csv.flush()?;
    Ok(())
}

/// File a frame is written to under the processed directory
pub fn frame_path(processed_dir: &Path, frame: &FeatureFrame) -> PathBuf {
    let race = frame.race.map(|r| r.as_str()).unwrap_or("unknown");
    processed_dir.join(format!("summaries_{}.csv", race))
}

pub fn write_frame_file(frame: &FeatureFrame, processed_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(processed_dir)?;
    let path = frame_path(processed_dir, frame);
    write_frame(frame, fs::File::create(&path)?)?;
    Ok(path)
}
