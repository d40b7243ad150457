//! `get roster`: cards for a team's active skill players.

use anyhow::Result;

use super::common::{to_json, CommandContext};
use crate::{engine::PlayerCard, TeamAbbr, Week};

pub fn format_roster(team: &TeamAbbr, week: Week, cards: &[PlayerCard]) -> String {
    if cards.is_empty() {
        return format!("No active players found for {} in week {}", team, week);
    }

    let mut lines = vec![format!("{} week {}", team, week)];
    for card in cards {
        lines.push(format!(
            "  {:<3} {:<24} {:>6.2}  [{:>6.2} - {:>6.2}]  {}{}",
            card.position,
            card.name,
            card.prediction,
            card.floor,
            card.ceiling,
            card.injury_status,
            if card.is_boosted { "  +boost" } else { "" }
        ));
    }
    lines.join("\n")
}

pub fn handle_roster(ctx: &CommandContext, team: &TeamAbbr, week: Week, as_json: bool) -> Result<()> {
    let cards = ctx.forecaster.roster_cards(team, week);
    if as_json {
        println!("{}", to_json(&cards)?); // tarpaulin::skip
    } else {
        println!("{}", format_roster(team, week, &cards)); // tarpaulin::skip
    }
    Ok(())
}
