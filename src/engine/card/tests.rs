//! Unit tests for player cards

use super::*;
use crate::config::EngineConfig;
use crate::engine::context::DataContext;
use crate::error::Result;
use crate::model::{DeviationModel, ModelRegistry, PositionModel};
use crate::storage::{InjuryRecord, SnapCountRow, SnapshotFile, WeeklyStatRow};
use crate::Season;
use std::collections::BTreeMap;
use std::sync::Arc;

struct ConstantModel(f64);

impl DeviationModel for ConstantModel {
    fn predict(&self, _row: &[f64]) -> Result<f64> {
        Ok(self.0)
    }
}

fn profile() -> PlayerProfile {
    PlayerProfile {
        player_id: PlayerId::new("00-0038542"),
        name: "Bijan Test".to_string(),
        position: Position::RB,
        team: Some(TeamAbbr::new("ATL")),
        status: Some("ACT".to_string()),
        draft_year: Some(2023),
        draft_number: Some(8),
        age: Some(23.0),
    }
}

fn game(week: u16, points: f64) -> WeeklyStatRow {
    WeeklyStatRow {
        player_id: profile().player_id,
        season: Season::new(2025),
        week: Week::new(week),
        fantasy_points_ppr: Some(points),
        ..Default::default()
    }
}

fn snap(week: u16, snaps: u32, pct: f64) -> SnapCountRow {
    SnapCountRow {
        player_id: profile().player_id,
        season: Season::new(2025),
        week: Week::new(week),
        offense_snaps: Some(snaps),
        offense_pct: Some(pct),
    }
}

fn features(values: &[(&str, f64)]) -> FeatureRow {
    FeatureRow {
        player_id: profile().player_id,
        week: Week::new(10),
        team: Some(TeamAbbr::new("ATL")),
        values: values
            .iter()
            .map(|(k, v)| (k.to_string(), Some(*v)))
            .collect::<BTreeMap<_, _>>(),
    }
}

fn base_snapshot() -> SnapshotFile {
    SnapshotFile {
        profiles: vec![profile()],
        stats: vec![game(6, 0.0), game(7, 14.2), game(8, 9.8), game(9, 18.1)],
        ..Default::default()
    }
}

fn negative_model() -> ModelRegistry {
    let mut models = ModelRegistry::new();
    models.insert(
        Position::RB,
        PositionModel::new(Arc::new(ConstantModel(-100.0)), vec!["x".to_string()]),
    );
    models
}

fn card(ctx: &DataContext) -> PlayerCard {
    let config = EngineConfig::default();
    Reconciler::new(ctx, &config).player_card(&profile(), Week::new(10))
}

#[test]
fn test_card_carries_prediction_and_context() {
    let mut snapshot = base_snapshot();
    snapshot.features = vec![features(&[
        ("player_season_avg_points", 12.4),
        ("offense_snaps", 42.0),
        ("offense_pct", 0.71),
    ])];
    snapshot.injuries = vec![InjuryRecord {
        player_id: profile().player_id,
        week: Some(Week::new(10)),
        status: "Questionable".to_string(),
    }];
    let card = card(&DataContext::new(snapshot, ModelRegistry::new()));

    assert_eq!(card.prediction, 14.03);
    assert_eq!(card.rolling_average, 14.03);
    assert_eq!(card.season_average, 12.4);
    assert_eq!(card.floor, 11.22);
    assert_eq!(card.ceiling, 19.22);
    assert_eq!(card.snap_count, 42);
    assert_eq!(card.snap_percentage, 71.0);
    assert_eq!(card.injury_status, "Questionable");
    assert_eq!(card.draft_info, "Pick 8 (2023)");
    assert_eq!(card.team, Some(TeamAbbr::new("ATL")));
}

#[test]
fn test_zero_prediction_shows_season_average() {
    let mut snapshot = base_snapshot();
    snapshot.features = vec![features(&[("player_season_avg_points", 12.4)])];
    let card = card(&DataContext::new(snapshot, negative_model()));

    assert_eq!(card.prediction, 12.4);
    assert_eq!(card.floor, 9.92);
}

#[test]
fn test_season_average_from_history_counts_games_played() {
    // Week 6 scored zero without snaps and is treated as an absence.
    let mut snapshot = base_snapshot();
    snapshot.features = vec![features(&[("offense_snaps", 0.0)])];
    let card = card(&DataContext::new(snapshot, negative_model()));

    assert_eq!(card.season_average, 14.03);
    assert_eq!(card.prediction, 14.03);
}

#[test]
fn test_zero_snap_game_with_snaps_counts_toward_season_average() {
    let mut snapshot = base_snapshot();
    snapshot.snaps = vec![snap(6, 12, 0.2)];
    let card = card(&DataContext::new(snapshot, ModelRegistry::new()));

    // (0 + 14.2 + 9.8 + 18.1) / 4
    assert!((card.season_average - 10.525).abs() < 0.006);
}

#[test]
fn test_snap_line_falls_back_to_last_game() {
    let mut snapshot = base_snapshot();
    snapshot.snaps = vec![snap(9, 41, 0.62), snap(8, 30, 0.5), snap(10, 60, 0.9)];
    let card = card(&DataContext::new(snapshot, ModelRegistry::new()));

    assert_eq!(card.snap_count, 41);
    assert_eq!(card.snap_percentage, 62.0);
}

#[test]
fn test_percent_snap_values_are_kept() {
    let mut snapshot = base_snapshot();
    snapshot.features = vec![features(&[("offense_snaps", 55.0), ("offense_pct", 83.0)])];
    let card = card(&DataContext::new(snapshot, ModelRegistry::new()));

    assert_eq!(card.snap_count, 55);
    assert_eq!(card.snap_percentage, 83.0);
}

#[test]
fn test_player_without_data() {
    let snapshot = SnapshotFile {
        profiles: vec![PlayerProfile {
            draft_year: None,
            draft_number: None,
            ..profile()
        }],
        ..Default::default()
    };
    let card = card(&DataContext::new(snapshot, ModelRegistry::new()));

    assert_eq!(card.prediction, 0.0);
    assert_eq!(card.season_average, 0.0);
    assert_eq!(card.snap_count, 0);
    assert_eq!(card.injury_status, "Active");
    assert_eq!(card.draft_info, "Undrafted");
}
