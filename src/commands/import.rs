//! `import`: load a snapshot JSON file into the database.

use anyhow::{Context, Result};
use std::path::Path;

use crate::{
    config::ForecastConfig,
    storage::{ImportSummary, PlayerDatabase, SnapshotFile},
    Season,
};

pub fn read_snapshot(path: &Path) -> Result<SnapshotFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing snapshot {}", path.display()))
}

pub fn handle_import(
    config: &ForecastConfig,
    file: &Path,
    clear_db: bool,
    season: Option<Season>,
) -> Result<ImportSummary> {
    let season = season.unwrap_or(config.season);
    let snapshot = read_snapshot(file)?;

    let mut db = PlayerDatabase::open(&config.db_path)?;
    if clear_db {
        println!("Clearing all database data...");
        db.clear_all()?;
    }

    let summary = db.import_snapshot(&snapshot, season)?;
    println!("✓ Imported {} for season {}", summary, season);
    Ok(summary)
}
