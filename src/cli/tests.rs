//! CLI parsing tests

use super::*;

fn parse(args: &[&str]) -> Forecast {
    Forecast::try_parse_from(args).unwrap()
}

#[test]
fn test_import_args() {
    let app = parse(&[
        "ffl-forecast",
        "import",
        "--file",
        "snap.json",
        "--clear-db",
        "--season",
        "2024",
    ]);
    match app.command {
        Commands::Import {
            file,
            clear_db,
            season,
        } => {
            assert_eq!(file, PathBuf::from("snap.json"));
            assert!(clear_db);
            assert_eq!(season, Some(Season::new(2024)));
        }
        _ => panic!("expected import"),
    }
}

#[test]
fn test_get_prediction_args() {
    let app = parse(&[
        "ffl-forecast",
        "get",
        "prediction",
        "-i",
        "00-0036223",
        "-w",
        "10",
        "--position",
        "rb",
        "--json",
    ]);
    match app.command {
        Commands::Get {
            cmd:
                GetCmd::Prediction {
                    target,
                    position,
                    json,
                },
        } => {
            assert_eq!(target.player_id, PlayerId::new("00-0036223"));
            assert_eq!(target.week, Week::new(10));
            assert_eq!(position, Some(Position::RB));
            assert!(json);
        }
        _ => panic!("expected get prediction"),
    }
}

#[test]
fn test_global_options_after_subcommand() {
    let app = parse(&[
        "ffl-forecast",
        "get",
        "roster",
        "--team",
        "kc",
        "--week",
        "3",
        "--db",
        "/tmp/x.db",
        "--verbose",
    ]);
    assert_eq!(app.db, Some(PathBuf::from("/tmp/x.db")));
    assert!(app.verbose);
    match app.command {
        Commands::Get {
            cmd: GetCmd::Roster { team, week, json },
        } => {
            assert_eq!(team, TeamAbbr::new("KC"));
            assert_eq!(week, Week::new(3));
            assert!(!json);
        }
        _ => panic!("expected get roster"),
    }
}

#[test]
fn test_usage_boost_and_injury_status() {
    let app = parse(&["ffl-forecast", "get", "usage-boost", "-i", "p1", "-w", "4"]);
    assert!(matches!(
        app.command,
        Commands::Get {
            cmd: GetCmd::UsageBoost { json: false, .. }
        }
    ));

    let app = parse(&["ffl-forecast", "get", "injury-status", "-i", "p1", "-w", "4"]);
    assert!(matches!(
        app.command,
        Commands::Get {
            cmd: GetCmd::InjuryStatus { .. }
        }
    ));
}

#[test]
fn test_invalid_values_are_rejected() {
    assert!(Forecast::try_parse_from([
        "ffl-forecast", "get", "prediction", "-i", "p1", "-w", "ten"
    ])
    .is_err());
    assert!(Forecast::try_parse_from([
        "ffl-forecast", "get", "prediction", "-i", "p1", "-w", "1", "-p", "K"
    ])
    .is_err());
    assert!(Forecast::try_parse_from(["ffl-forecast", "get", "roster", "-w", "1"]).is_err());
}
