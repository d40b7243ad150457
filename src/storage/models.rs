//! Data models for the storage layer

use crate::cli::types::{PlayerId, Position, Season, TeamAbbr, Week};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Player identity and slow-changing attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub player_id: PlayerId,
    #[serde(alias = "player_name")]
    pub name: String,
    pub position: Position,
    #[serde(alias = "team_abbr")]
    pub team: Option<TeamAbbr>,
    /// Roster status such as `ACT`, `RES` or `CUT`
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub draft_year: Option<u16>,
    #[serde(default)]
    pub draft_number: Option<u16>,
    #[serde(default)]
    pub age: Option<f64>,
}

impl PlayerProfile {
    pub fn is_active(&self) -> bool {
        self.status
            .as_deref()
            .map(|s| s.eq_ignore_ascii_case("ACT"))
            .unwrap_or(false)
    }

    /// Draft summary for display, e.g. `Pick 8 (2017)`. Needs both fields.
    pub fn draft_info(&self) -> String {
        match (self.draft_year, self.draft_number) {
            (Some(year), Some(number)) => format!("Pick {} ({})", number, year),
            _ => "Undrafted".to_string(),
        }
    }
}

/// One player's box-score line for a single game
///
/// Every counting stat is optional; scoring treats a missing value as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStatRow {
    pub player_id: PlayerId,
    #[serde(default)]
    pub season: Season,
    pub week: Week,
    #[serde(default)]
    pub opponent: Option<String>,
    #[serde(default)]
    pub passing_yards: Option<f64>,
    #[serde(default, alias = "passing_touchdown")]
    pub passing_touchdowns: Option<f64>,
    #[serde(default)]
    pub rushing_yards: Option<f64>,
    #[serde(default, alias = "rush_touchdown")]
    pub rushing_touchdowns: Option<f64>,
    #[serde(default)]
    pub receiving_yards: Option<f64>,
    #[serde(default, alias = "receiving_touchdown")]
    pub receiving_touchdowns: Option<f64>,
    #[serde(default)]
    pub receptions: Option<f64>,
    #[serde(default)]
    pub interceptions: Option<f64>,
    #[serde(default)]
    pub fumbles_lost: Option<f64>,
    /// Precomputed PPR points; authoritative when present
    #[serde(default, alias = "y_fantasy_points_ppr")]
    pub fantasy_points_ppr: Option<f64>,
}

/// Snap participation for a single game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapCountRow {
    pub player_id: PlayerId,
    #[serde(default)]
    pub season: Season,
    pub week: Week,
    #[serde(default)]
    pub offense_snaps: Option<u32>,
    /// Either a fraction (0-1) or a percent (0-100), depending on the source
    #[serde(default)]
    pub offense_pct: Option<f64>,
}

/// One injury-report snapshot entry
///
/// `week` is absent in legacy snapshots that carry only the latest status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryRecord {
    pub player_id: PlayerId,
    #[serde(default)]
    pub week: Option<Week>,
    #[serde(alias = "injury_status")]
    pub status: String,
}

/// Precomputed model features for one player and week
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub player_id: PlayerId,
    pub week: Week,
    #[serde(default, alias = "team_abbr")]
    pub team: Option<TeamAbbr>,
    #[serde(default)]
    pub values: BTreeMap<String, Option<f64>>,
}

impl FeatureRow {
    /// Value for `name`, or `None` when missing, null or non-finite.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .get(name)
            .copied()
            .flatten()
            .filter(|v| v.is_finite())
    }

    /// Value for `name`, defaulting to 0.0.
    pub fn get_or_zero(&self, name: &str) -> f64 {
        self.get(name).unwrap_or(0.0)
    }
}

/// Bulk import document: every table the engine reads, in one JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFile {
    #[serde(default)]
    pub profiles: Vec<PlayerProfile>,
    #[serde(default)]
    pub stats: Vec<WeeklyStatRow>,
    #[serde(default)]
    pub snaps: Vec<SnapCountRow>,
    #[serde(default)]
    pub injuries: Vec<InjuryRecord>,
    #[serde(default)]
    pub features: Vec<FeatureRow>,
}
