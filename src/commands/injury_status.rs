//! `get injury-status`: the resolved injury designation for one week.

use anyhow::Result;

use super::common::CommandContext;
use crate::{PlayerId, Week};

pub fn handle_injury_status(ctx: &CommandContext, player_id: &PlayerId, week: Week) -> Result<String> {
    let status = ctx.forecaster.injury_status(player_id, week);
    println!("{}", status); // tarpaulin::skip
    Ok(status)
}
