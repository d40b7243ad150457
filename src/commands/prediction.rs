//! `get prediction`: one player's reconciled prediction and card.

use anyhow::Result;
use serde::Serialize;

use super::common::{to_json, CommandContext};
use crate::{
    engine::{PlayerCard, PredictionResult},
    PlayerId, Position, Week,
};

/// Everything `get prediction` reports
#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    pub player_id: PlayerId,
    pub week: Week,
    pub position: Position,
    pub prediction: PredictionResult,
    pub card: Option<PlayerCard>,
}

pub fn build_report(
    ctx: &CommandContext,
    player_id: &PlayerId,
    week: Week,
    position: Option<Position>,
) -> Result<PredictionReport> {
    let card = ctx.forecaster.player_card(player_id, week).ok();
    let position = match (position, &card) {
        (Some(p), _) => p,
        (None, Some(card)) => card.position,
        (None, None) => {
            anyhow::bail!(
                "Player {} not found; pass --position to predict without a profile",
                player_id
            )
        }
    };
    let prediction = ctx.forecaster.predict(player_id, position, week);

    Ok(PredictionReport {
        player_id: player_id.clone(),
        week,
        position,
        prediction,
        card,
    })
}

pub fn format_report(report: &PredictionReport) -> String {
    let p = &report.prediction;
    let mut lines = Vec::new();

    match &report.card {
        Some(card) => lines.push(format!(
            "{} ({} {}) week {}",
            card.name,
            report.position,
            card.team.as_ref().map(|t| t.as_str()).unwrap_or("FA"),
            report.week
        )),
        None => lines.push(format!(
            "{} ({}) week {}",
            report.player_id, report.position, report.week
        )),
    }

    lines.push(format!(
        "  Prediction: {:.2}  (floor {:.2}, ceiling {:.2}){}",
        p.final_score,
        p.floor,
        p.ceiling,
        if p.is_boosted { "  [usage boost]" } else { "" }
    ));
    lines.push(format!(
        "  Recent form {:.2} + deviation {:+.2} (raw {:+.2}) + boost {:.2}",
        p.recent_form_baseline, p.amplified_deviation, p.raw_deviation, p.injury_boost
    ));

    if let Some(card) = &report.card {
        lines.push(format!(
            "  Season avg {:.2}, status {}, snaps {} ({:.1}%), {}",
            card.season_average,
            card.injury_status,
            card.snap_count,
            card.snap_percentage,
            card.draft_info
        ));
        if (card.prediction - p.final_score).abs() > f64::EPSILON {
            lines.push(format!("  Displayed prediction: {:.2}", card.prediction));
        }
    }

    lines.join("\n")
}

pub fn handle_prediction(
    ctx: &CommandContext,
    player_id: &PlayerId,
    week: Week,
    position: Option<Position>,
    as_json: bool,
) -> Result<()> {
    let report = build_report(ctx, player_id, week, position)?;
    if as_json {
        println!("{}", to_json(&report)?); // tarpaulin::skip
    } else {
        println!("{}", format_report(&report)); // tarpaulin::skip
    }
    Ok(())
}
