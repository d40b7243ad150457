//! Feature assembly and raw deviation prediction.

use tracing::warn;

use crate::config::SEASON_AVG_FEATURE;
use crate::model::PositionModel;
use crate::storage::FeatureRow;


/// Ordered `name -> value` input for one model call.
///
/// The key set and order come from the model's feature list, never from the
/// feature row, so models trained on different feature sets share this code.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    entries: Vec<(String, f64)>,
}

impl FeatureVector {
    /// Build the vector for `names`. The season-average feature carries the
    /// freshly computed recent form instead of the stored column; any other
    /// name missing from the row is 0.0.
    pub fn assemble(names: &[String], row: &FeatureRow, recent_form: f64) -> Self {
        let entries = names
            .iter()
            .map(|name| {
                let value = if name == SEASON_AVG_FEATURE {
                    recent_form
                } else {
                    row.get_or_zero(name)
                };
                (name.clone(), value)
            })
            .collect();
        Self { entries }
    }

    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, v)| *v).collect()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Raw deviation from the position model; a failed or non-finite prediction
/// counts as no deviation.
pub fn predict_deviation(model: &PositionModel, row: &FeatureRow, recent_form: f64) -> f64 {
    let input = FeatureVector::assemble(&model.features, row, recent_form);

    match model.model.predict(&input.values()) {
        Ok(deviation) if deviation.is_finite() => deviation,
        Ok(deviation) => {
            warn!(player_id = %row.player_id, deviation, "Non-finite model output");
            0.0
        }
        Err(e) => {
            warn!(player_id = %row.player_id, error = %e, "Model prediction failed");
            0.0
        }
    }
}
