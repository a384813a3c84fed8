//! Vectorize command implementation

use crate::config::Config;
use crate::core::{vectorize, Race};
use crate::export::write_frame_file;
use crate::storage::SummaryStore;
use anyhow::{anyhow, Context, Result};
use tracing::info;

pub async fn run_vectorize_command(config: Config, race: Option<String>) -> Result<()> {
    let store = SummaryStore::new(config.interim_dir(), config.store.on_corrupt);

    let races = match race {
        Some(race) => vec![race
            .parse::<Race>()
            .map_err(|e| anyhow!("Cannot vectorize: {}", e))?],
        None => store.races(),
    };
    if races.is_empty() {
        println!(
            "No summaries found in {}; run `summarize` first",
            store.root().display()
        );
        return Ok(());
    }

    for race in races {
        let summaries = store
            .load(race)
            .with_context(|| format!("Failed to load {} summaries", race))?;
        let mut frame = vectorize(&summaries, &config.vectorize)?;
        frame.race.get_or_insert(race);
        let path = write_frame_file(&frame, &config.processed_dir())
            .with_context(|| format!("Failed to write {} features", race))?;
        info!(
            "Vectorized {} {} summaries into {} columns",
            frame.rows.len(),
            race,
            frame.columns.len()
        );
        println!("Wrote {} ({} rows)", path.display(), frame.rows.len());
    }
    Ok(())
}
