//! Command implementations for the ffl-forecast CLI

pub mod common;
pub mod import;
pub mod injury_status;
pub mod prediction;
pub mod roster;
pub mod usage_boost;
