//! Display card for one player: prediction plus the context shown next to it.

use serde::Serialize;
use tracing::debug;

use super::injury::InjuryResolver;
use super::recent_form::{recent_form, season_average};
use super::reconcile::{round2, Reconciler};
use crate::cli::types::{PlayerId, Position, TeamAbbr, Week};
use crate::config::SEASON_AVG_FEATURE;
use crate::storage::{FeatureRow, PlayerProfile};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerCard {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Position,
    pub team: Option<TeamAbbr>,
    pub week: Week,
    pub prediction: f64,
    pub floor: f64,
    pub ceiling: f64,
    pub is_boosted: bool,
    pub season_average: f64,
    pub rolling_average: f64,
    pub injury_status: String,
    pub snap_count: u32,
    pub snap_percentage: f64,
    pub draft_info: String,
    pub age: Option<f64>,
}

impl Reconciler<'_> {
    /// Reconcile `profile` for `week` and dress the result for display.
    ///
    /// A zero prediction is replaced by the season average, or by the rolling
    /// average when the season average is also zero.
    pub fn player_card(&self, profile: &PlayerProfile, week: Week) -> PlayerCard {
        let player_id = &profile.player_id;
        let result = self.reconcile(player_id, profile.position, week);
        let feature_row = self.ctx.feature_row(player_id, week);

        let season_avg = match feature_row.and_then(|row| row.get(SEASON_AVG_FEATURE)) {
            Some(avg) if avg > 0.0 => avg,
            _ => {
                let history = self.player_history(player_id, week);
                season_average(&history, &self.ctx.snaps_before(player_id, week), week)
            }
        };

        let mut rolling_avg = result.recent_form_baseline;
        let mut prediction = result.final_score;
        if prediction == 0.0 {
            if rolling_avg == 0.0 {
                let live = self.live_history(player_id, week);
                rolling_avg = recent_form(&live, week, self.config.recent_form_window, None);
            }
            prediction = if season_avg > 0.0 { season_avg } else { rolling_avg };
            debug!(%player_id, %week, prediction, "Zero prediction replaced by average");
        }
        let prediction = round2(prediction);

        let (snap_count, snap_percentage) = self.snap_line(player_id, feature_row, week);

        PlayerCard {
            player_id: player_id.clone(),
            name: profile.name.clone(),
            position: profile.position,
            team: profile.team.clone(),
            week,
            prediction,
            floor: round2(prediction * self.config.floor_factor),
            ceiling: round2(prediction + self.config.mae_for(profile.position)),
            is_boosted: result.is_boosted,
            season_average: round2(season_avg),
            rolling_average: round2(rolling_avg),
            injury_status: self.ctx.injuries().resolve(player_id, week),
            snap_count,
            snap_percentage,
            draft_info: profile.draft_info(),
            age: profile.age,
        }
    }

    /// Snap count and percent: the feature row, else the last game before `week`.
    fn snap_line(&self, player_id: &PlayerId, row: Option<&FeatureRow>, week: Week) -> (u32, f64) {
        let mut count = row
            .and_then(|r| r.get("offense_snaps"))
            .map(|v| v.max(0.0) as u32)
            .unwrap_or(0);
        let mut pct = row.and_then(|r| r.get("offense_pct")).unwrap_or(0.0);

        if count == 0 {
            if let Some(last) = self
                .ctx
                .snaps_before(player_id, week)
                .into_iter()
                .max_by_key(|s| s.week)
            {
                count = last.offense_snaps.unwrap_or(0);
                pct = last.offense_pct.filter(|p| p.is_finite()).unwrap_or(0.0);
            }
        }

        if pct > 0.0 && pct < 1.0 {
            pct *= 100.0;
        }
        (count, round2(pct))
    }
}
