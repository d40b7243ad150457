//! Rolling baseline over a player's most recent games.

use super::scoring::fantasy_points;
use crate::cli::types::Week;
use crate::storage::{SnapCountRow, WeeklyStatRow};

#[cfg(test)]
mod tests;

/// Points from the most recent non-zero games strictly before `week`, newest
/// first, at most `window` of them.
///
/// A game scoring exactly zero is treated as "did not meaningfully play"
/// (injury, bye, DNP) and skipped.
pub fn recent_scores<'a, I>(history: I, week: Week, window: usize) -> Vec<f64>
where
    I: IntoIterator<Item = &'a WeeklyStatRow>,
{
    let mut rows: Vec<&WeeklyStatRow> = history.into_iter().filter(|r| r.week < week).collect();
    rows.sort_by(|a, b| b.week.cmp(&a.week));

    rows.into_iter()
        .map(fantasy_points)
        .filter(|pts| *pts != 0.0)
        .take(window)
        .collect()
}

/// Recent-form baseline with its fallback chain: mean of recent non-zero games,
/// then the supplied season average, then 0.0.
pub fn recent_form<'a, I>(
    history: I,
    week: Week,
    window: usize,
    season_average: Option<f64>,
) -> f64
where
    I: IntoIterator<Item = &'a WeeklyStatRow>,
{
    let scores = recent_scores(history, week, window);
    if !scores.is_empty() {
        return scores.iter().sum::<f64>() / scores.len() as f64;
    }
    season_average.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Season scoring average used when no precomputed feature is available.
///
/// Counts every game before `week` in which the player either scored or logged
/// offensive snaps; games with neither are treated as absences.
pub fn season_average<'a, I>(history: I, snaps: &[&SnapCountRow], week: Week) -> f64
where
    I: IntoIterator<Item = &'a WeeklyStatRow>,
{
    let played = |w: Week| {
        snaps
            .iter()
            .any(|s| s.week == w && s.offense_snaps.unwrap_or(0) > 0)
    };

    let (total, games) = history
        .into_iter()
        .filter(|r| r.week < week)
        .map(|r| (fantasy_points(r), r.week))
        .filter(|(pts, w)| *pts > 0.0 || played(*w))
        .fold((0.0, 0usize), |(total, games), (pts, _)| (total + pts, games + 1));

    if games > 0 {
        total / games as f64
    } else {
        0.0
    }
}
