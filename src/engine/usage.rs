//! Usage-vacuum boost: reacts to an injured same-position teammate.
//!
//! The boost is a trigger, not a magnitude model. The first injured teammate
//! who was a real contributor (snap share and scoring average both over the
//! position threshold) switches it on, and its size depends only on the
//! subject's own position.

use serde::Serialize;
use tracing::{debug, info};

use super::context::{DataContext, HistoryFetch};
use super::injury::{matches_any, InjuryResolver};
use super::scoring::fantasy_points;
use crate::cli::types::{PlayerId, Position, TeamAbbr, Week};
use crate::config::UsageVacuumConfig;
use crate::error::{ForecastError, Result};
use crate::storage::{SnapCountRow, WeeklyStatRow};


/// Largest plausible snap percentage; anything above is a bad feed.
const MAX_SNAP_PCT: f64 = 200.0;

/// Scale a mean snap share to percent and reject implausible values.
///
/// Sources disagree on units: a mean below 1.0 is read as a fraction.
pub fn normalize_snap_pct(mean: f64) -> f64 {
    let pct = if mean < 1.0 { mean * 100.0 } else { mean };
    if pct.is_nan() || !(0.0..=MAX_SNAP_PCT).contains(&pct) {
        0.0
    } else {
        pct
    }
}

/// Mean offensive snap percentage across rows, normalized; 0.0 with no data.
pub fn mean_snap_pct(rows: &[&SnapCountRow]) -> f64 {
    let values: Vec<f64> = rows.iter().filter_map(|r| r.offense_pct).collect();
    if values.is_empty() {
        return 0.0;
    }
    normalize_snap_pct(values.iter().sum::<f64>() / values.len() as f64)
}

/// Straight mean of fantasy points, zero games included.
pub fn mean_points(rows: &[&WeeklyStatRow]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(|r| fantasy_points(r)).sum::<f64>() / rows.len() as f64
}

/// Whether an absent teammate's production is large enough to redistribute.
pub fn is_contributor(
    position: Position,
    avg_snaps: f64,
    avg_points: f64,
    config: &UsageVacuumConfig,
) -> bool {
    avg_snaps >= config.min_snap_pct && avg_points >= config.min_points_for(position)
}

/// The injured teammate that triggered a boost
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VacancySource {
    pub teammate_id: PlayerId,
    pub teammate_status: String,
    pub teammate_avg_points: f64,
    pub teammate_avg_snaps: f64,
}

/// Diagnostic answer to "would this player be boosted, and why"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageBoostReport {
    pub player_id: PlayerId,
    pub position: Position,
    pub team: Option<TeamAbbr>,
    pub week: Week,
    pub boosted: bool,
    pub boost: f64,
    pub source: Option<VacancySource>,
}

pub struct UsageVacuumDetector<'a> {
    ctx: &'a DataContext,
    config: &'a UsageVacuumConfig,
    live: Option<&'a dyn HistoryFetch>,
}

impl<'a> UsageVacuumDetector<'a> {
    pub fn new(ctx: &'a DataContext, config: &'a UsageVacuumConfig) -> Self {
        Self {
            ctx,
            config,
            live: None,
        }
    }

    pub fn with_live_history(mut self, live: Option<&'a dyn HistoryFetch>) -> Self {
        self.live = live;
        self
    }

    /// Flat boost for `player_id`: 0.0, or the position's boost size.
    pub fn usage_boost(
        &self,
        player_id: &PlayerId,
        position: Position,
        team: &TeamAbbr,
        week: Week,
    ) -> f64 {
        if self.find_source(player_id, position, team, week).is_some() {
            self.config.boost_for(position)
        } else {
            0.0
        }
    }

    /// First injured, meaningful teammate, if any.
    pub fn find_source(
        &self,
        player_id: &PlayerId,
        position: Position,
        team: &TeamAbbr,
        week: Week,
    ) -> Option<VacancySource> {
        let injuries = self.ctx.injuries();

        for mate in self.ctx.teammates(player_id, position, team) {
            let mate_id = &mate.player_id;

            let status = injuries.resolve(mate_id, week);
            if !matches_any(&status, &self.config.injured_markers) {
                continue;
            }

            if self.config.skip_long_term_absences {
                if let Some(reason) = self.long_term_absence(mate_id, week) {
                    info!(%player_id, teammate = %mate_id, %reason, "Skipping usage boost");
                    continue;
                }
            }

            let history = self.teammate_history(mate_id, week);
            if history.is_empty() {
                debug!(teammate = %mate_id, "Injured teammate has no prior games");
                continue;
            }
            let history_refs: Vec<&WeeklyStatRow> = history.iter().collect();
            let avg_points = mean_points(&history_refs);
            let avg_snaps = mean_snap_pct(&self.ctx.snaps_before(mate_id, week));

            if is_contributor(position, avg_snaps, avg_points, self.config) {
                info!(
                    %player_id,
                    teammate = %mate_id,
                    %status,
                    avg_points,
                    avg_snaps,
                    "Usage boost applied"
                );
                return Some(VacancySource {
                    teammate_id: mate_id.clone(),
                    teammate_status: status,
                    teammate_avg_points: avg_points,
                    teammate_avg_snaps: avg_snaps,
                });
            }
        }

        None
    }

    /// Full report for `player_id`, using the profile for team and position.
    pub fn explain(&self, player_id: &PlayerId, week: Week) -> Result<UsageBoostReport> {
        let profile = self
            .ctx
            .profile(player_id)
            .ok_or_else(|| ForecastError::PlayerNotFound {
                player_id: player_id.to_string(),
            })?;

        let source = profile
            .team
            .as_ref()
            .and_then(|team| self.find_source(player_id, profile.position, team, week));
        let boost = if source.is_some() {
            self.config.boost_for(profile.position)
        } else {
            0.0
        };

        Ok(UsageBoostReport {
            player_id: player_id.clone(),
            position: profile.position,
            team: profile.team.clone(),
            week,
            boosted: source.is_some(),
            boost,
            source,
        })
    }

    fn teammate_history(&self, mate_id: &PlayerId, week: Week) -> Vec<WeeklyStatRow> {
        if self.ctx.has_stats() {
            return self
                .ctx
                .history_before(mate_id, week)
                .into_iter()
                .cloned()
                .collect();
        }
        let Some(live) = self.live else {
            return Vec::new();
        };
        match live.player_history(mate_id, week, None) {
            Ok(rows) => rows.into_iter().filter(|r| r.week < week).collect(),
            Err(e) => {
                debug!(teammate = %mate_id, error = %e, "Live teammate history failed");
                Vec::new()
            }
        }
    }

    /// Reason to believe the team has already adapted to this absence.
    fn long_term_absence(&self, mate_id: &PlayerId, week: Week) -> Option<String> {
        let prev1 = week.checked_back(1)?;
        let prev2 = week.checked_back(2)?;

        let injuries = self.ctx.injuries();
        let status1 = injuries.resolve(mate_id, prev1);
        let status2 = injuries.resolve(mate_id, prev2);
        if matches_any(&status1, &self.config.strict_markers)
            && matches_any(&status2, &self.config.strict_markers)
        {
            return Some(format!(
                "teammate out for 2+ weeks (W{}: {}, W{}: {})",
                prev1, status1, prev2, status2
            ));
        }

        let snaps = self.ctx.snaps_before(mate_id, week);
        let recent: Vec<&&SnapCountRow> = snaps
            .iter()
            .filter(|s| s.week == prev1 || s.week == prev2)
            .collect();

        if recent.is_empty() {
            let last_played = snaps.iter().map(|s| s.week).max()?;
            let weeks_since = week.as_u16() - last_played.as_u16();
            if weeks_since > 2 {
                return Some(format!(
                    "teammate has not played in {} weeks (last: W{})",
                    weeks_since, last_played
                ));
            }
            return None;
        }

        let played = recent
            .iter()
            .any(|s| s.offense_snaps.unwrap_or(0) > self.config.played_snap_threshold);
        if !played {
            return Some("teammate logged no meaningful snaps in the last 2 weeks".to_string());
        }
        None
    }
}
