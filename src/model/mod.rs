//! Per-position deviation models and their feature lists.
//!
//! Each position is served by one model trained to predict the *difference*
//! from a player's baseline average. A model is paired with the ordered list of
//! feature names it was trained on; that list is the only source of truth for
//! which inputs the model receives and in what order.
//!
//! Models are loaded once at start from a directory laid out as:
//!
//! - `xgboost_{POS}_deviation.json` (see [`tree`])
//! - `feature_names_{POS}_deviation.json` (JSON array of strings)
//!
//! A position whose files are missing or invalid is logged and left out of the
//! registry; predictions for it fall back to the baseline alone.

pub mod tree;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::cli::types::Position;
use crate::error::{ForecastError, Result};

pub use tree::TreeEnsemble;

#[cfg(test)]
mod tests;

/// Anything that maps one ordered feature row to a raw deviation.
pub trait DeviationModel: Send + Sync {
    fn predict(&self, row: &[f64]) -> Result<f64>;
}

/// A loaded model together with the feature order it expects
#[derive(Clone)]
pub struct PositionModel {
    pub model: Arc<dyn DeviationModel>,
    pub features: Vec<String>,
}

impl PositionModel {
    pub fn new(model: Arc<dyn DeviationModel>, features: Vec<String>) -> Self {
        Self { model, features }
    }
}

impl fmt::Debug for PositionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionModel")
            .field("features", &self.features)
            .finish_non_exhaustive()
    }
}

pub fn model_file_name(position: Position) -> String {
    format!("xgboost_{}_deviation.json", position)
}

pub fn feature_file_name(position: Position) -> String {
    format!("feature_names_{}_deviation.json", position)
}

/// Immutable set of loaded models, keyed by position
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: HashMap<Position, PositionModel>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, position: Position, model: PositionModel) {
        self.models.insert(position, model);
    }

    pub fn get(&self, position: Position) -> Option<&PositionModel> {
        self.models.get(&position)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Load every position found in `dir`; failures are logged, not returned.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let mut registry = Self::new();

        for position in Position::ALL {
            match load_position(dir, position) {
                Ok(model) => {
                    info!(
                        %position,
                        features = model.features.len(),
                        "Loaded deviation model"
                    );
                    registry.insert(position, model);
                }
                Err(e) => warn!(%position, error = %e, "Deviation model unavailable"),
            }
        }

        registry
    }
}

/// Load the model and feature list for a single position.
pub fn load_position(dir: &Path, position: Position) -> Result<PositionModel> {
    let wrap = |message: String| ForecastError::ModelLoad {
        position: position.to_string(),
        message,
    };

    let features_path = dir.join(feature_file_name(position));
    let content = std::fs::read_to_string(&features_path)
        .map_err(|e| wrap(format!("{}: {}", features_path.display(), e)))?;
    let features: Vec<String> = serde_json::from_str(&content)
        .map_err(|e| wrap(format!("{}: {}", features_path.display(), e)))?;
    if features.is_empty() {
        return Err(wrap("feature list is empty".to_string()));
    }

    let model_path = dir.join(model_file_name(position));
    let ensemble = TreeEnsemble::from_file(&model_path, &features).map_err(|e| match e {
        ForecastError::Prediction { message } => wrap(message),
        other => wrap(format!("{}: {}", model_path.display(), other)),
    })?;

    Ok(PositionModel::new(Arc::new(ensemble), features))
}
