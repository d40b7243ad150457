//! Unit tests for loading per-position models from disk

use super::*;
use serde_json::json;
use tempfile::TempDir;

fn write_position(dir: &Path, position: Position, features: &[&str], split: &str) {
    std::fs::write(
        dir.join(feature_file_name(position)),
        serde_json::to_string(features).unwrap(),
    )
    .unwrap();
    let model = json!({
        "base_score": 0.0,
        "trees": [{
            "nodeid": 0, "split": split, "split_condition": 10.0,
            "yes": 1, "no": 2, "missing": 1,
            "children": [ { "nodeid": 1, "leaf": -1.5 }, { "nodeid": 2, "leaf": 2.5 } ]
        }]
    });
    std::fs::write(dir.join(model_file_name(position)), model.to_string()).unwrap();
}

#[test]
fn test_file_names() {
    assert_eq!(model_file_name(Position::RB), "xgboost_RB_deviation.json");
    assert_eq!(
        feature_file_name(Position::TE),
        "feature_names_TE_deviation.json"
    );
}

#[test]
fn test_load_dir_with_partial_models() {
    let dir = TempDir::new().unwrap();
    write_position(
        dir.path(),
        Position::RB,
        &["player_season_avg_points", "rush_share"],
        "rush_share",
    );
    write_position(dir.path(), Position::WR, &["targets"], "targets");

    let registry = ModelRegistry::load_dir(dir.path());

    assert_eq!(registry.len(), 2);
    assert!(registry.get(Position::QB).is_none());
    assert!(registry.get(Position::TE).is_none());

    let rb = registry.get(Position::RB).unwrap();
    assert_eq!(rb.features, vec!["player_season_avg_points", "rush_share"]);
    assert_eq!(rb.model.predict(&[0.0, 12.0]).unwrap(), 2.5);
}

#[test]
fn test_invalid_model_is_skipped() {
    let dir = TempDir::new().unwrap();
    write_position(dir.path(), Position::QB, &["pass_att"], "not_a_feature");

    let registry = ModelRegistry::load_dir(dir.path());
    assert!(registry.is_empty());

    let err = load_position(dir.path(), Position::QB).unwrap_err();
    assert!(matches!(err, ForecastError::ModelLoad { .. }));
}

#[test]
fn test_missing_directory_yields_empty_registry() {
    let registry = ModelRegistry::load_dir("/definitely/not/a/model/dir");
    assert!(registry.is_empty());
}

#[test]
fn test_empty_feature_list_is_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(feature_file_name(Position::TE)), "[]").unwrap();
    assert!(load_position(dir.path(), Position::TE).is_err());
}
