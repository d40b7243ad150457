//! Unit tests for the recent-form baseline

use super::*;
use crate::PlayerId;

fn game(week: u16, points: f64) -> WeeklyStatRow {
    WeeklyStatRow {
        player_id: PlayerId::new("00-0038542"),
        week: Week::new(week),
        fantasy_points_ppr: Some(points),
        ..Default::default()
    }
}

fn snap(week: u16, snaps: u32) -> SnapCountRow {
    SnapCountRow {
        player_id: PlayerId::new("00-0038542"),
        week: Week::new(week),
        offense_snaps: Some(snaps),
        offense_pct: Some(0.5),
        ..Default::default()
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[cfg(test)]
mod recent_form_tests {
    use super::*;

    #[test]
    fn test_skips_zero_games_and_averages_newest_first() {
        // Weeks 6-9: [0, 14.2, 9.8, 18.1]
        let history = vec![game(6, 0.0), game(7, 14.2), game(8, 9.8), game(9, 18.1)];

        let scores = recent_scores(&history, Week::new(10), 4);
        assert_eq!(scores, vec![18.1, 9.8, 14.2]);

        let form = recent_form(&history, Week::new(10), 4, Some(3.0));
        assert!(approx(form, (18.1 + 9.8 + 14.2) / 3.0));
    }

    #[test]
    fn test_window_caps_at_four_most_recent() {
        let history: Vec<_> = (1..=8).map(|w| game(w, w as f64)).collect();
        let form = recent_form(&history, Week::new(9), 4, None);
        assert!(approx(form, (8.0 + 7.0 + 6.0 + 5.0) / 4.0));
    }

    #[test]
    fn test_unsorted_history_is_ordered_by_week() {
        let history = vec![game(2, 2.0), game(9, 9.0), game(5, 5.0), game(1, 1.0), game(7, 7.0)];
        assert_eq!(
            recent_scores(&history, Week::new(10), 4),
            vec![9.0, 7.0, 5.0, 2.0]
        );
    }

    #[test]
    fn test_no_lookahead() {
        let history = vec![game(8, 10.0), game(9, 12.0), game(10, 55.0), game(11, 40.0)];
        let form = recent_form(&history, Week::new(10), 4, None);
        assert!(approx(form, 11.0));
    }

    #[test]
    fn test_all_zero_history_falls_back_to_season_average() {
        let history = vec![game(1, 0.0), game(2, 0.0), game(3, 0.0)];
        assert_eq!(recent_form(&history, Week::new(4), 4, Some(11.4)), 11.4);
    }

    #[test]
    fn test_no_history_and_no_season_average_is_zero() {
        let history: Vec<WeeklyStatRow> = vec![];
        assert_eq!(recent_form(&history, Week::new(4), 4, None), 0.0);
        assert_eq!(recent_form(&history, Week::new(4), 4, Some(f64::NAN)), 0.0);
    }

    #[test]
    fn test_negative_games_still_count() {
        let history = vec![game(1, -1.5), game(2, 4.5)];
        assert!(approx(recent_form(&history, Week::new(3), 4, None), 1.5));
    }
}

#[cfg(test)]
mod season_average_tests {
    use super::*;

    #[test]
    fn test_counts_scoring_games_only_without_snaps() {
        let history = vec![game(1, 10.0), game(2, 0.0), game(3, 20.0)];
        assert!(approx(season_average(&history, &[], Week::new(4)), 15.0));
    }

    #[test]
    fn test_zero_point_game_with_snaps_counts() {
        let history = vec![game(1, 10.0), game(2, 0.0), game(3, 20.0)];
        let snaps = [snap(2, 31)];
        let refs: Vec<&SnapCountRow> = snaps.iter().collect();
        assert!(approx(season_average(&history, &refs, Week::new(4)), 10.0));
    }

    #[test]
    fn test_ignores_target_week_and_later() {
        let history = vec![game(1, 8.0), game(4, 30.0)];
        assert!(approx(season_average(&history, &[], Week::new(4)), 8.0));
    }

    #[test]
    fn test_empty_is_zero() {
        let history: Vec<WeeklyStatRow> = vec![];
        assert_eq!(season_average(&history, &[], Week::new(4)), 0.0);
    }
}
