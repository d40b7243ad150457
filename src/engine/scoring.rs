//! PPR fantasy scoring for a single box-score line.

use crate::storage::WeeklyStatRow;

#[cfg(test)]
mod tests;

pub const PASS_YARD: f64 = 0.04;
pub const PASS_TD: f64 = 4.0;
pub const RUSH_YARD: f64 = 0.1;
pub const RUSH_TD: f64 = 6.0;
pub const REC_YARD: f64 = 0.1;
pub const REC_TD: f64 = 6.0;
pub const RECEPTION: f64 = 1.0;
pub const INTERCEPTION: f64 = -2.0;
pub const FUMBLE_LOST: f64 = -2.0;

fn stat(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Fantasy points for one game.
///
/// The precomputed PPR value wins when present, since it may encode scoring
/// nuances the formula below does not. Missing counting stats count as zero.
/// Never fails: anything non-finite scores 0.0.
pub fn fantasy_points(row: &WeeklyStatRow) -> f64 {
    if let Some(ppr) = row.fantasy_points_ppr.filter(|v| v.is_finite()) {
        return ppr;
    }

    let points = stat(row.passing_yards) * PASS_YARD
        + stat(row.passing_touchdowns) * PASS_TD
        + stat(row.rushing_yards) * RUSH_YARD
        + stat(row.rushing_touchdowns) * RUSH_TD
        + stat(row.receiving_yards) * REC_YARD
        + stat(row.receiving_touchdowns) * REC_TD
        + stat(row.receptions) * RECEPTION
        + stat(row.interceptions) * INTERCEPTION
        + stat(row.fumbles_lost) * FUMBLE_LOST;

    if points.is_finite() {
        points
    } else {
        0.0
    }
}
