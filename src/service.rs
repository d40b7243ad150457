//! Long-lived forecasting service.
//!
//! Owns the swappable data context, the engine configuration, the prediction
//! cache and the optional live history source. Every public call takes one
//! snapshot up front and reads only that snapshot.

use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

use crate::cli::types::{PlayerId, Position, TeamAbbr, Week};
use crate::config::EngineConfig;
use crate::core::{PredictionCache, PredictionCacheKey};
use crate::engine::{
    ContextHandle, DataContext, HistoryFetch, InjuryResolver, PlayerCard, PredictionResult,
    Reconciler, UsageBoostReport, UsageVacuumDetector,
};
use crate::error::{ForecastError, Result};


/// Cards per position on a team page, in display order
pub const ROSTER_COMPOSITION: [(Position, usize); 4] = [
    (Position::QB, 4),
    (Position::RB, 8),
    (Position::WR, 8),
    (Position::TE, 5),
];

pub struct Forecaster {
    handle: ContextHandle,
    config: EngineConfig,
    cache: PredictionCache,
    live: Option<Arc<dyn HistoryFetch>>,
}

impl Forecaster {
    pub fn new(context: DataContext, config: EngineConfig, cache_capacity: usize) -> Self {
        Self {
            handle: ContextHandle::new(context),
            config,
            cache: PredictionCache::new(cache_capacity),
            live: None,
        }
    }

    pub fn with_live_history(mut self, live: Arc<dyn HistoryFetch>) -> Self {
        self.live = Some(live);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Publish a freshly loaded context. Cached predictions from earlier
    /// generations stop matching immediately.
    pub fn refresh(&self, context: DataContext) -> u64 {
        let generation = self.handle.swap(context);
        info!(generation, "Data context refreshed");
        generation
    }

    pub fn generation(&self) -> u64 {
        self.handle.generation()
    }

    fn reconciler<'a>(&'a self, ctx: &'a DataContext) -> Reconciler<'a> {
        Reconciler::new(ctx, &self.config).with_live_history(self.live.as_deref())
    }

    /// Reconciled prediction, served from the cache when possible.
    pub fn predict(&self, player_id: &PlayerId, position: Position, week: Week) -> PredictionResult {
        let snapshot = self.handle.snapshot();
        let key = PredictionCacheKey {
            player_id: player_id.clone(),
            position,
            week,
            generation: snapshot.generation,
        };
        self.cache.get_or_insert_with(key, || {
            debug!(%player_id, %week, "Prediction cache miss");
            self.reconciler(&snapshot.context)
                .reconcile(player_id, position, week)
        })
    }

    /// Predict using the position on file for `player_id`.
    pub fn predict_player(&self, player_id: &PlayerId, week: Week) -> Result<PredictionResult> {
        let position = self
            .handle
            .snapshot()
            .context
            .profile(player_id)
            .map(|p| p.position)
            .ok_or_else(|| ForecastError::PlayerNotFound {
                player_id: player_id.to_string(),
            })?;
        Ok(self.predict(player_id, position, week))
    }

    pub fn player_card(&self, player_id: &PlayerId, week: Week) -> Result<PlayerCard> {
        let snapshot = self.handle.snapshot();
        let profile = snapshot
            .context
            .profile(player_id)
            .ok_or_else(|| ForecastError::PlayerNotFound {
                player_id: player_id.to_string(),
            })?;
        Ok(self.reconciler(&snapshot.context).player_card(profile, week))
    }

    /// Cards for the active players of `team`, QB first, each position
    /// capped at its [`ROSTER_COMPOSITION`] slot count.
    pub fn roster_cards(&self, team: &TeamAbbr, week: Week) -> Vec<PlayerCard> {
        let snapshot = self.handle.snapshot();
        let ctx: &DataContext = &snapshot.context;

        let profiles: Vec<_> = ROSTER_COMPOSITION
            .iter()
            .flat_map(move |&(position, slots)| {
                ctx.profiles()
                    .iter()
                    .filter(move |p| {
                        p.position == position && p.team.as_ref() == Some(team) && p.is_active()
                    })
                    .take(slots)
            })
            .collect();

        let mut cards: Vec<PlayerCard> = profiles
            .par_iter()
            .map(|profile| self.reconciler(ctx).player_card(profile, week))
            .collect();

        cards.sort_by_key(|c| c.position.display_order());
        debug!(%team, %week, count = cards.len(), "Built roster cards");
        cards
    }

    pub fn usage_boost_report(&self, player_id: &PlayerId, week: Week) -> Result<UsageBoostReport> {
        let snapshot = self.handle.snapshot();
        UsageVacuumDetector::new(&snapshot.context, &self.config.usage)
            .with_live_history(self.live.as_deref())
            .explain(player_id, week)
    }

    pub fn injury_status(&self, player_id: &PlayerId, week: Week) -> String {
        self.handle
            .snapshot()
            .context
            .injuries()
            .resolve(player_id, week)
    }

    /// (cached predictions, capacity)
    pub fn cache_stats(&self) -> (usize, usize) {
        self.cache.stats()
    }
}
