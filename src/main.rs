//! Entry point: parse CLI, load configuration and dispatch to command handlers.

use anyhow::Result;
use clap::Parser;
use ffl_forecast::{
    cli::{Commands, Forecast, GetCmd},
    commands::{
        common::CommandContext, import::handle_import, injury_status::handle_injury_status,
        prediction::handle_prediction, roster::handle_roster, usage_boost::handle_usage_boost,
    },
    config::ForecastConfig,
};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose {
        "ffl_forecast=debug"
    } else {
        "ffl_forecast=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run the CLI.
fn main() -> Result<()> {
    let app = Forecast::parse();
    init_logging(app.verbose);

    let mut config = ForecastConfig::load(app.config.as_deref())?;
    if let Some(db) = app.db {
        config.db_path = db;
    }
    if let Some(dir) = app.model_dir {
        config.model_dir = dir;
    }

    match app.command {
        Commands::Import {
            file,
            clear_db,
            season,
        } => {
            handle_import(&config, &file, clear_db, season)?;
        }

        Commands::Get { cmd } => {
            let ctx = CommandContext::new(config)?;
            match cmd {
                GetCmd::Prediction {
                    target,
                    position,
                    json,
                } => handle_prediction(&ctx, &target.player_id, target.week, position, json)?,

                GetCmd::Roster { team, week, json } => handle_roster(&ctx, &team, week, json)?,

                GetCmd::UsageBoost { target, json } => {
                    handle_usage_boost(&ctx, &target.player_id, target.week, json)?
                }

                GetCmd::InjuryStatus { target } => {
                    handle_injury_status(&ctx, &target.player_id, target.week)?;
                }
            }
        }
    }

    Ok(())
}
