//! Unit tests for PPR scoring

use super::*;
use crate::{PlayerId, Week};

fn row() -> WeeklyStatRow {
    WeeklyStatRow {
        player_id: PlayerId::new("00-0036223"),
        week: Week::new(3),
        ..Default::default()
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_precomputed_ppr_wins() {
    let stats = WeeklyStatRow {
        fantasy_points_ppr: Some(21.7),
        rushing_yards: Some(300.0),
        ..row()
    };
    assert_eq!(fantasy_points(&stats), 21.7);
}

#[test]
fn test_precomputed_zero_is_returned_verbatim() {
    let stats = WeeklyStatRow {
        fantasy_points_ppr: Some(0.0),
        receptions: Some(5.0),
        ..row()
    };
    assert_eq!(fantasy_points(&stats), 0.0);
}

#[test]
fn test_quarterback_line() {
    // 300 pass yds, 2 TD, 1 INT, 20 rush yds
    let stats = WeeklyStatRow {
        passing_yards: Some(300.0),
        passing_touchdowns: Some(2.0),
        interceptions: Some(1.0),
        rushing_yards: Some(20.0),
        ..row()
    };
    assert!(approx(fantasy_points(&stats), 12.0 + 8.0 - 2.0 + 2.0));
}

#[test]
fn test_receiver_line() {
    // 7 rec, 95 yds, 1 TD, 1 fumble lost
    let stats = WeeklyStatRow {
        receptions: Some(7.0),
        receiving_yards: Some(95.0),
        receiving_touchdowns: Some(1.0),
        fumbles_lost: Some(1.0),
        ..row()
    };
    assert!(approx(fantasy_points(&stats), 7.0 + 9.5 + 6.0 - 2.0));
}

#[test]
fn test_running_back_line() {
    let stats = WeeklyStatRow {
        rushing_yards: Some(112.0),
        rushing_touchdowns: Some(2.0),
        receptions: Some(3.0),
        receiving_yards: Some(18.0),
        ..row()
    };
    assert!(approx(fantasy_points(&stats), 11.2 + 12.0 + 3.0 + 1.8));
}

#[test]
fn test_empty_row_scores_zero() {
    assert_eq!(fantasy_points(&row()), 0.0);
}

#[test]
fn test_non_finite_values_are_ignored() {
    let stats = WeeklyStatRow {
        fantasy_points_ppr: Some(f64::NAN),
        rushing_yards: Some(f64::INFINITY),
        receptions: Some(4.0),
        ..row()
    };
    assert_eq!(fantasy_points(&stats), 4.0);
}
