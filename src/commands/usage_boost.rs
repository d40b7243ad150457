//! `get usage-boost`: explain whether and why a player gets the usage boost.

use anyhow::Result;

use super::common::{to_json, CommandContext};
use crate::{engine::UsageBoostReport, PlayerId, Week};

pub fn format_usage_boost(report: &UsageBoostReport) -> String {
    match &report.source {
        Some(source) => format!(
            "{} ({}) week {}: +{:.1} from {} ({}, {:.1} pts/g, {:.1}% snaps)",
            report.player_id,
            report.position,
            report.week,
            report.boost,
            source.teammate_id,
            source.teammate_status,
            source.teammate_avg_points,
            source.teammate_avg_snaps
        ),
        None => format!(
            "{} ({}) week {}: no usage boost",
            report.player_id, report.position, report.week
        ),
    }
}

pub fn handle_usage_boost(
    ctx: &CommandContext,
    player_id: &PlayerId,
    week: Week,
    as_json: bool,
) -> Result<()> {
    let report = ctx.forecaster.usage_boost_report(player_id, week)?;
    if as_json {
        println!("{}", to_json(&report)?); // tarpaulin::skip
    } else {
        println!("{}", format_usage_boost(&report)); // tarpaulin::skip
    }
    Ok(())
}
