//! Common utilities and helper functions shared across commands.

use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    config::ForecastConfig,
    engine::DataContext,
    model::ModelRegistry,
    service::Forecaster,
    storage::{PlayerDatabase, SharedDatabase},
};

/// Resources needed by every `get` command
pub struct CommandContext {
    pub config: ForecastConfig,
    pub forecaster: Forecaster,
}

impl CommandContext {
    /// Load the configured season from the database, load models, and wire the
    /// database in as the live history source.
    pub fn new(config: ForecastConfig) -> Result<Self> {
        let db = PlayerDatabase::open(&config.db_path)
            .with_context(|| format!("opening database {}", config.db_path.display()))?;
        let snapshot = db.load_snapshot(config.season)?;
        tracing::debug!(
            season = %config.season,
            profiles = snapshot.profiles.len(),
            stats = snapshot.stats.len(),
            "Loaded snapshot from database"
        );

        let models = ModelRegistry::load_dir(&config.model_dir);
        let context = DataContext::new(snapshot, models);
        let live = Arc::new(SharedDatabase::new(db, config.season));
        let forecaster = Forecaster::new(context, config.engine.clone(), config.cache_capacity)
            .with_live_history(live);

        Ok(Self { config, forecaster })
    }
}

/// Pretty JSON for `--json` output.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
