//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::{PlayerId, Position, Season, TeamAbbr, Week};

#[cfg(test)]
mod tests;

/// Player and week arguments shared between `get` commands
#[derive(Debug, Args)]
pub struct PlayerWeek {
    /// Player ID as it appears in the imported snapshot (e.g. 00-0036223).
    #[clap(long, short = 'i')]
    pub player_id: PlayerId,

    /// Week to predict.
    #[clap(long, short)]
    pub week: Week,
}

#[derive(Debug, Subcommand)]
pub enum GetCmd {
    /// Reconciled prediction and player card for one player.
    Prediction {
        #[clap(flatten)]
        target: PlayerWeek,

        /// Position to predict at (defaults to the player's profile).
        #[clap(long, short)]
        position: Option<Position>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Player cards for a team's active QBs, RBs, WRs and TEs.
    Roster {
        /// Team abbreviation (e.g. KC).
        #[clap(long, short)]
        team: TeamAbbr,

        /// Week to predict.
        #[clap(long, short)]
        week: Week,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Explain whether an injured teammate triggers a usage boost.
    UsageBoost {
        #[clap(flatten)]
        target: PlayerWeek,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Resolved injury status for a player and week.
    InjuryStatus {
        #[clap(flatten)]
        target: PlayerWeek,
    },
}

#[derive(Debug, Parser)]
#[clap(
    name = "ffl-forecast",
    about = "Fantasy football prediction reconciliation engine"
)]
pub struct Forecast {
    /// SQLite database path (or set `FFL_FORECAST_DB`).
    #[clap(long, global = true)]
    pub db: Option<PathBuf>,

    /// Directory holding per-position model files (or set `FFL_FORECAST_MODEL_DIR`).
    #[clap(long, global = true)]
    pub model_dir: Option<PathBuf>,

    /// JSON config file.
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug-level logging.
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import a snapshot JSON file into the database
    Import {
        /// Snapshot file with profiles, stats, snaps, injuries and features.
        #[clap(long, short)]
        file: PathBuf,

        /// Clear all data from the database before importing
        #[clap(long)]
        clear_db: bool,

        /// Season to store injuries and features under (defaults to the config season).
        #[clap(long, short)]
        season: Option<Season>,
    },

    /// Compute predictions from the imported data
    Get {
        #[clap(subcommand)]
        cmd: GetCmd,
    },
}
