//! Unit tests for storage functionality

use super::*;
use crate::cli::types::{PlayerId, Position, Season, TeamAbbr, Week};
use crate::engine::HistoryFetch;
use std::collections::BTreeMap;

fn create_test_db() -> PlayerDatabase {
    PlayerDatabase::open_in_memory().unwrap()
}

fn test_profile() -> PlayerProfile {
    PlayerProfile {
        player_id: PlayerId::new("00-0033873"),
        name: "Test Player".to_string(),
        position: Position::QB,
        team: Some(TeamAbbr::new("KC")),
        status: Some("ACT".to_string()),
        draft_year: Some(2017),
        draft_number: Some(10),
        age: Some(30.1),
    }
}

fn stat(week: u16, points: f64) -> WeeklyStatRow {
    WeeklyStatRow {
        player_id: test_profile().player_id,
        season: Season::new(2025),
        week: Week::new(week),
        passing_yards: Some(250.0),
        fantasy_points_ppr: Some(points),
        ..Default::default()
    }
}

fn test_snapshot() -> SnapshotFile {
    let id = test_profile().player_id;
    SnapshotFile {
        profiles: vec![test_profile()],
        stats: (1..=6).map(|w| stat(w, 10.0 + w as f64)).collect(),
        snaps: vec![SnapCountRow {
            player_id: id.clone(),
            season: Season::new(2025),
            week: Week::new(5),
            offense_snaps: Some(64),
            offense_pct: Some(1.0),
        }],
        injuries: vec![
            InjuryRecord {
                player_id: id.clone(),
                week: Some(Week::new(6)),
                status: "Questionable".to_string(),
            },
            InjuryRecord {
                player_id: PlayerId::new("00-0000001"),
                week: None,
                status: "Out".to_string(),
            },
        ],
        features: vec![FeatureRow {
            player_id: id,
            week: Week::new(7),
            team: Some(TeamAbbr::new("KC")),
            values: BTreeMap::from([
                ("snap_pct".to_string(), Some(98.5)),
                ("implied_total".to_string(), None),
            ]),
        }],
    }
}

#[test]
fn test_database_creation() {
    let _db = create_test_db();
}

#[test]
fn test_open_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("players.db");

    let db = PlayerDatabase::open(&path);
    assert!(db.is_ok());
    assert!(path.exists());
}

#[test]
fn test_import_and_load_round_trip() {
    let mut db = create_test_db();
    let snapshot = test_snapshot();

    let summary = db.import_snapshot(&snapshot, Season::new(2025)).unwrap();
    assert_eq!(summary.profiles, 1);
    assert_eq!(summary.stats, 6);
    assert_eq!(summary.injuries, 2);

    let loaded = db.load_snapshot(Season::new(2025)).unwrap();
    assert_eq!(loaded.profiles, snapshot.profiles);
    assert_eq!(loaded.stats, snapshot.stats);
    assert_eq!(loaded.snaps, snapshot.snaps);
    assert_eq!(loaded.injuries, snapshot.injuries);
    assert_eq!(loaded.features, snapshot.features);
}

#[test]
fn test_load_is_scoped_to_season() {
    let mut db = create_test_db();
    db.import_snapshot(&test_snapshot(), Season::new(2025)).unwrap();

    let other = db.load_snapshot(Season::new(2024)).unwrap();
    assert_eq!(other.profiles.len(), 1);
    assert!(other.stats.is_empty());
    assert!(other.injuries.is_empty());
    assert!(other.features.is_empty());
}

#[test]
fn test_reimport_replaces_season_injuries() {
    let mut db = create_test_db();
    db.import_snapshot(&test_snapshot(), Season::new(2025)).unwrap();

    let update = SnapshotFile {
        injuries: vec![InjuryRecord {
            player_id: test_profile().player_id,
            week: Some(Week::new(7)),
            status: "Out".to_string(),
        }],
        ..Default::default()
    };
    db.import_snapshot(&update, Season::new(2025)).unwrap();

    let loaded = db.load_snapshot(Season::new(2025)).unwrap();
    assert_eq!(loaded.injuries, update.injuries);
    assert_eq!(loaded.stats.len(), 6);
}

#[test]
fn test_upsert_weekly_stats_replaces_row() {
    let mut db = create_test_db();
    db.upsert_weekly_stats(&stat(1, 10.0)).unwrap();
    db.upsert_weekly_stats(&stat(1, 22.5)).unwrap();

    let rows = db
        .player_history(&test_profile().player_id, Season::new(2025), Week::new(2), None)
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].fantasy_points_ppr, Some(22.5));
}

#[test]
fn test_player_history_is_newest_first_and_strict() {
    let mut db = create_test_db();
    db.import_snapshot(&test_snapshot(), Season::new(2025)).unwrap();

    let rows = db
        .player_history(&test_profile().player_id, Season::new(2025), Week::new(5), None)
        .unwrap();
    let weeks: Vec<u16> = rows.iter().map(|r| r.week.as_u16()).collect();
    assert_eq!(weeks, vec![4, 3, 2, 1]);
}

#[test]
fn test_player_history_respects_limit() {
    let mut db = create_test_db();
    db.import_snapshot(&test_snapshot(), Season::new(2025)).unwrap();

    let rows = db
        .player_history(&test_profile().player_id, Season::new(2025), Week::new(7), Some(2))
        .unwrap();
    let weeks: Vec<u16> = rows.iter().map(|r| r.week.as_u16()).collect();
    assert_eq!(weeks, vec![6, 5]);
}

#[test]
fn test_get_profile() {
    let mut db = create_test_db();
    db.upsert_profile(&test_profile()).unwrap();

    let found = db.get_profile(&test_profile().player_id).unwrap();
    assert_eq!(found, Some(test_profile()));
    assert!(db.get_profile(&PlayerId::new("missing")).unwrap().is_none());
}

#[test]
fn test_draft_info_needs_year_and_number() {
    let mut profile = test_profile();
    assert_eq!(profile.draft_info(), "Pick 10 (2017)");

    profile.draft_number = None;
    assert_eq!(profile.draft_info(), "Undrafted");

    profile.draft_number = Some(10);
    profile.draft_year = None;
    assert_eq!(profile.draft_info(), "Undrafted");
}

#[test]
fn test_clear_all() {
    let mut db = create_test_db();
    db.import_snapshot(&test_snapshot(), Season::new(2025)).unwrap();
    db.clear_all().unwrap();

    let loaded = db.load_snapshot(Season::new(2025)).unwrap();
    assert!(loaded.profiles.is_empty());
    assert!(loaded.stats.is_empty());
    assert!(loaded.snaps.is_empty());
    assert!(loaded.injuries.is_empty());
    assert!(loaded.features.is_empty());
}

#[test]
fn test_shared_database_serves_history() {
    let mut db = create_test_db();
    db.import_snapshot(&test_snapshot(), Season::new(2025)).unwrap();
    let shared = SharedDatabase::new(db, Season::new(2025));

    let rows = shared
        .player_history(&test_profile().player_id, Week::new(7), Some(12))
        .unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].week, Week::new(6));
    assert_eq!(shared.season(), Season::new(2025));
}
