//! Top-level prediction: baseline, dampened model deviation and usage boost.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::context::{DataContext, HistoryFetch};
use super::deviation::predict_deviation;
use super::recent_form::recent_form;
use super::usage::UsageVacuumDetector;
use crate::cli::types::{PlayerId, Position, Week};
use crate::config::{EngineConfig, SEASON_AVG_FEATURE};
use crate::error::{ForecastError, Result};
use crate::storage::WeeklyStatRow;


/// Everything a caller needs to display or audit one prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub final_score: f64,
    pub is_boosted: bool,
    /// Feature row values exactly as stored, nulls included
    pub raw_features_used: BTreeMap<String, Option<f64>>,
    pub recent_form_baseline: f64,
    pub raw_deviation: f64,
    pub amplified_deviation: f64,
    pub injury_boost: f64,
    pub floor: f64,
    pub ceiling: f64,
}

impl PredictionResult {
    /// Degraded result: zero score, no boost, no features.
    pub fn unavailable() -> Self {
        Self {
            final_score: 0.0,
            is_boosted: false,
            raw_features_used: BTreeMap::new(),
            recent_form_baseline: 0.0,
            raw_deviation: 0.0,
            amplified_deviation: 0.0,
            injury_boost: 0.0,
            floor: 0.0,
            ceiling: 0.0,
        }
    }
}

/// `sign(d) * scale * ln(1 + |d|)`; zero and non-finite input give 0.0.
pub fn dampen_deviation(raw: f64, scale: f64) -> f64 {
    if raw == 0.0 || !raw.is_finite() {
        return 0.0;
    }
    raw.signum() * scale * raw.abs().ln_1p()
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Combines the engine components against one immutable [`DataContext`].
pub struct Reconciler<'a> {
    pub(crate) ctx: &'a DataContext,
    pub(crate) config: &'a EngineConfig,
    pub(crate) live: Option<&'a dyn HistoryFetch>,
}

impl<'a> Reconciler<'a> {
    pub fn new(ctx: &'a DataContext, config: &'a EngineConfig) -> Self {
        Self {
            ctx,
            config,
            live: None,
        }
    }

    /// Fall back to `live` for history when the in-memory stats table is empty.
    pub fn with_live_history(mut self, live: Option<&'a dyn HistoryFetch>) -> Self {
        self.live = live;
        self
    }

    /// Predict `player_id` at `position` for `week`.
    ///
    /// Never fails: any error inside the pipeline degrades to
    /// [`PredictionResult::unavailable`].
    pub fn reconcile(&self, player_id: &PlayerId, position: Position, week: Week) -> PredictionResult {
        match self.try_reconcile(player_id, position, week) {
            Ok(result) => result,
            Err(e) => {
                warn!(%player_id, %position, %week, error = %e, "Prediction unavailable");
                PredictionResult::unavailable()
            }
        }
    }

    fn try_reconcile(
        &self,
        player_id: &PlayerId,
        position: Position,
        week: Week,
    ) -> Result<PredictionResult> {
        let feature_row = self.ctx.feature_row(player_id, week);
        let profile = self.ctx.profile(player_id);
        if feature_row.is_none() && profile.is_none() {
            return Err(ForecastError::PlayerNotFound {
                player_id: player_id.to_string(),
            });
        }

        let team = feature_row
            .and_then(|row| row.team.clone())
            .or_else(|| profile.and_then(|p| p.team.clone()));

        let history = self.player_history(player_id, week);
        let season_avg = feature_row.and_then(|row| row.get(SEASON_AVG_FEATURE));
        let baseline = recent_form(&history, week, self.config.recent_form_window, season_avg);

        let raw_deviation = match (feature_row, self.ctx.models().get(position)) {
            (Some(row), Some(model)) => predict_deviation(model, row, baseline),
            (None, _) => {
                debug!(%player_id, %week, "No feature row; baseline only");
                0.0
            }
            (_, None) => {
                debug!(%player_id, %position, "No model for position; baseline only");
                0.0
            }
        };
        let amplified = dampen_deviation(raw_deviation, self.config.dampening_scale);

        let boost = match &team {
            Some(team) => UsageVacuumDetector::new(self.ctx, &self.config.usage)
                .with_live_history(self.live)
                .usage_boost(player_id, position, team, week),
            None => 0.0,
        };

        let total = baseline + amplified + boost;
        if !total.is_finite() {
            return Err(ForecastError::NonFiniteScore {
                player_id: player_id.to_string(),
            });
        }
        let final_score = round2(total.max(0.0));

        Ok(PredictionResult {
            final_score,
            is_boosted: boost > 0.0,
            raw_features_used: feature_row.map(|r| r.values.clone()).unwrap_or_default(),
            recent_form_baseline: baseline,
            raw_deviation,
            amplified_deviation: amplified,
            injury_boost: boost,
            floor: round2(final_score * self.config.floor_factor),
            ceiling: round2(final_score + self.config.mae_for(position)),
        })
    }

    /// History before `week`: the in-memory table, else the capped live fetch.
    /// In-memory rows before `week`, or the capped live fetch when this player
    /// has none.
    pub(crate) fn player_history(&self, player_id: &PlayerId, week: Week) -> Vec<WeeklyStatRow> {
        let rows = self.ctx.history_before(player_id, week);
        if !rows.is_empty() {
            return rows.into_iter().cloned().collect();
        }
        self.live_history(player_id, week)
    }

    pub(crate) fn live_history(&self, player_id: &PlayerId, week: Week) -> Vec<WeeklyStatRow> {
        let Some(live) = self.live else {
            return Vec::new();
        };
        match live.player_history(player_id, week, Some(self.config.live_history_limit)) {
            Ok(rows) => rows.into_iter().filter(|r| r.week < week).collect(),
            Err(e) => {
                debug!(%player_id, error = %e, "Live history fetch failed");
                Vec::new()
            }
        }
    }
}
