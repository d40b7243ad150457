//! Runtime configuration.
//!
//! Values are resolved in three layers: built-in defaults, an optional JSON
//! file (`<config_dir>/ffl-forecast/config.json`), then environment overrides.
//! CLI flags are applied on top by `main`.
//!
//! The usage-vacuum thresholds and boost sizes are empirically chosen; the
//! defaults here are the production values and should not be retuned casually.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cli::types::{Position, Season};
use crate::error::{ForecastError, Result};


pub const SEASON_ENV_VAR: &str = "FFL_FORECAST_SEASON";
pub const DB_ENV_VAR: &str = "FFL_FORECAST_DB";
pub const MODEL_DIR_ENV_VAR: &str = "FFL_FORECAST_MODEL_DIR";

/// Feature whose stored value is replaced by freshly computed recent form.
pub const SEASON_AVG_FEATURE: &str = "player_season_avg_points";

/// Status returned when no injury record exists.
pub const DEFAULT_INJURY_STATUS: &str = "Active";

/// Knobs for the reconciler and its components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of most recent non-zero games averaged for recent form
    pub recent_form_window: usize,
    /// Row cap for the targeted live history fetch
    pub live_history_limit: usize,
    /// Multiplier in `sign(d) * scale * ln(1 + |d|)`
    pub dampening_scale: f64,
    /// Floor of the prediction band as a fraction of the final score
    pub floor_factor: f64,
    /// Mean absolute error of each position model; width of the ceiling band
    pub position_mae: HashMap<Position, f64>,
    pub usage: UsageVacuumConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            recent_form_window: 4,
            live_history_limit: 12,
            dampening_scale: 5.0,
            floor_factor: 0.8,
            position_mae: HashMap::from([
                (Position::QB, 4.30),
                (Position::RB, 5.19),
                (Position::WR, 4.33),
                (Position::TE, 4.34),
            ]),
            usage: UsageVacuumConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn mae_for(&self, position: Position) -> f64 {
        self.position_mae.get(&position).copied().unwrap_or(0.0)
    }
}

/// Rule parameters for the teammate-injury usage boost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageVacuumConfig {
    /// Case-insensitive substrings that mark a teammate as unavailable
    pub injured_markers: Vec<String>,
    pub min_snap_pct: f64,
    pub backfield_min_points: f64,
    pub receiver_min_points: f64,
    pub backfield_boost: f64,
    pub receiver_boost: f64,
    /// Ignore teammates who have already been missing for the two prior weeks
    pub skip_long_term_absences: bool,
    /// Markers that count as "definitely did not play" for the long-term check
    pub strict_markers: Vec<String>,
    /// Offensive snaps above which a teammate counts as having played
    pub played_snap_threshold: u32,
}

impl Default for UsageVacuumConfig {
    fn default() -> Self {
        Self {
            injured_markers: ["IR", "Out", "Doubtful", "Inactive", "PUP"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            min_snap_pct: 20.0,
            backfield_min_points: 6.0,
            receiver_min_points: 8.0,
            backfield_boost: 2.5,
            receiver_boost: 1.5,
            skip_long_term_absences: false,
            strict_markers: ["IR", "Out", "Inactive", "PUP"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            played_snap_threshold: 5,
        }
    }
}

impl UsageVacuumConfig {
    pub fn min_points_for(&self, position: Position) -> f64 {
        if position.is_backfield() {
            self.backfield_min_points
        } else {
            self.receiver_min_points
        }
    }

    pub fn boost_for(&self, position: Position) -> f64 {
        if position.is_backfield() {
            self.backfield_boost
        } else {
            self.receiver_boost
        }
    }
}

/// Top-level configuration for the CLI and the forecaster service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub season: Season,
    pub db_path: PathBuf,
    pub model_dir: PathBuf,
    /// Entries kept in the in-memory prediction cache
    pub cache_capacity: usize,
    pub engine: EngineConfig,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            season: Season::default(),
            db_path: default_db_path(),
            model_dir: app_dir(dirs::data_dir()).join("models"),
            cache_capacity: 512,
            engine: EngineConfig::default(),
        }
    }
}

impl ForecastConfig {
    /// Defaults, then `path` (or the default config file) if it exists, then env.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply overrides from an environment lookup function.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(season) = lookup(SEASON_ENV_VAR) {
            self.season = season.parse().map_err(|_| ForecastError::Config {
                message: format!("{} must be a year, got {:?}", SEASON_ENV_VAR, season),
            })?;
        }
        if let Some(db) = lookup(DB_ENV_VAR) {
            self.db_path = PathBuf::from(db);
        }
        if let Some(dir) = lookup(MODEL_DIR_ENV_VAR) {
            self.model_dir = PathBuf::from(dir);
        }
        Ok(())
    }
}

fn app_dir(base: Option<PathBuf>) -> PathBuf {
    let base = base.unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("ffl-forecast")
}

/// Path: <cache_dir>/ffl-forecast/players.db
pub fn default_db_path() -> PathBuf {
    app_dir(dirs::cache_dir()).join("players.db")
}

/// Path: <config_dir>/ffl-forecast/config.json
pub fn default_config_path() -> PathBuf {
    app_dir(dirs::config_dir()).join("config.json")
}
