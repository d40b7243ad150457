//! Import and read-back queries

use super::{models::*, schema::PlayerDatabase};
use crate::{PlayerId, Position, Season, TeamAbbr, Week};
use anyhow::Result;
use rusqlite::{params, types::Type, Connection, Row};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

/// Row counts written by one import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub profiles: usize,
    pub stats: usize,
    pub snaps: usize,
    pub injuries: usize,
    pub features: usize,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} profiles, {} stat rows, {} snap rows, {} injury records, {} feature rows",
            self.profiles, self.stats, self.snaps, self.injuries, self.features
        )
    }
}

fn conversion_error<E>(column: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err))
}

fn upsert_profile(conn: &Connection, profile: &PlayerProfile) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO players
         (player_id, name, position, team, status, draft_year, draft_number, age)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            profile.player_id.as_str(),
            profile.name,
            profile.position.as_str(),
            profile.team.as_ref().map(|t| t.as_str()),
            profile.status,
            profile.draft_year,
            profile.draft_number,
            profile.age
        ],
    )?;
    Ok(())
}

fn upsert_stat_row(conn: &Connection, row: &WeeklyStatRow) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO weekly_stats
         (player_id, season, week, opponent, passing_yards, passing_touchdowns,
          rushing_yards, rushing_touchdowns, receiving_yards, receiving_touchdowns,
          receptions, interceptions, fumbles_lost, fantasy_points_ppr)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            row.player_id.as_str(),
            row.season.as_u16(),
            row.week.as_u16(),
            row.opponent,
            row.passing_yards,
            row.passing_touchdowns,
            row.rushing_yards,
            row.rushing_touchdowns,
            row.receiving_yards,
            row.receiving_touchdowns,
            row.receptions,
            row.interceptions,
            row.fumbles_lost,
            row.fantasy_points_ppr
        ],
    )?;
    Ok(())
}

fn upsert_snap_row(conn: &Connection, row: &SnapCountRow) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO snap_counts
         (player_id, season, week, offense_snaps, offense_pct)
         VALUES (?, ?, ?, ?, ?)",
        params![
            row.player_id.as_str(),
            row.season.as_u16(),
            row.week.as_u16(),
            row.offense_snaps,
            row.offense_pct
        ],
    )?;
    Ok(())
}

fn insert_injury(conn: &Connection, record: &InjuryRecord, season: Season) -> Result<()> {
    conn.execute(
        "INSERT INTO injuries (player_id, season, week, status) VALUES (?, ?, ?, ?)",
        params![
            record.player_id.as_str(),
            season.as_u16(),
            record.week.map(|w| w.as_u16()),
            record.status
        ],
    )?;
    Ok(())
}

fn upsert_feature_row(conn: &Connection, row: &FeatureRow, season: Season) -> Result<()> {
    let values_json = serde_json::to_string(&row.values)?;
    conn.execute(
        "INSERT OR REPLACE INTO features (player_id, season, week, team, values_json)
         VALUES (?, ?, ?, ?, ?)",
        params![
            row.player_id.as_str(),
            season.as_u16(),
            row.week.as_u16(),
            row.team.as_ref().map(|t| t.as_str()),
            values_json
        ],
    )?;
    Ok(())
}

const STAT_COLUMNS: &str = "player_id, season, week, opponent, passing_yards, passing_touchdowns,
    rushing_yards, rushing_touchdowns, receiving_yards, receiving_touchdowns,
    receptions, interceptions, fumbles_lost, fantasy_points_ppr";

impl PlayerDatabase {
    /// Write every table in `snapshot` in a single transaction.
    ///
    /// Stat and snap rows keep their own season; injuries and features have
    /// none in the snapshot format and are stored under `season`.
    pub fn import_snapshot(&mut self, snapshot: &SnapshotFile, season: Season) -> Result<ImportSummary> {
        let tx = self.conn.transaction()?;

        for profile in &snapshot.profiles {
            upsert_profile(&tx, profile)?;
        }
        for row in &snapshot.stats {
            upsert_stat_row(&tx, row)?;
        }
        for row in &snapshot.snaps {
            upsert_snap_row(&tx, row)?;
        }
        tx.execute(
            "DELETE FROM injuries WHERE season = ?",
            params![season.as_u16()],
        )?;
        for record in &snapshot.injuries {
            insert_injury(&tx, record, season)?;
        }
        for row in &snapshot.features {
            upsert_feature_row(&tx, row, season)?;
        }

        tx.commit()?;

        let summary = ImportSummary {
            profiles: snapshot.profiles.len(),
            stats: snapshot.stats.len(),
            snaps: snapshot.snaps.len(),
            injuries: snapshot.injuries.len(),
            features: snapshot.features.len(),
        };
        info!(%season, %summary, "Imported snapshot");
        Ok(summary)
    }

    pub fn upsert_profile(&mut self, profile: &PlayerProfile) -> Result<()> {
        upsert_profile(&self.conn, profile)
    }

    pub fn upsert_weekly_stats(&mut self, row: &WeeklyStatRow) -> Result<()> {
        upsert_stat_row(&self.conn, row)
    }

    /// Read every table for `season` back into an in-memory snapshot.
    pub fn load_snapshot(&self, season: Season) -> Result<SnapshotFile> {
        Ok(SnapshotFile {
            profiles: self.get_profiles()?,
            stats: self.get_season_stats(season)?,
            snaps: self.get_season_snaps(season)?,
            injuries: self.get_injuries(season)?,
            features: self.get_features(season)?,
        })
    }

    pub fn get_profiles(&self) -> Result<Vec<PlayerProfile>> {
        let mut stmt = self.conn.prepare(
            "SELECT player_id, name, position, team, status, draft_year, draft_number, age
             FROM players ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            let position: String = row.get(2)?;
            Ok(PlayerProfile {
                player_id: PlayerId::new(row.get::<_, String>(0)?),
                name: row.get(1)?,
                position: position
                    .parse::<Position>()
                    .map_err(|e| conversion_error(2, e))?,
                team: row.get::<_, Option<String>>(3)?.map(TeamAbbr::new),
                status: row.get(4)?,
                draft_year: row.get(5)?,
                draft_number: row.get(6)?,
                age: row.get(7)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn get_profile(&self, player_id: &PlayerId) -> Result<Option<PlayerProfile>> {
        Ok(self
            .get_profiles()?
            .into_iter()
            .find(|p| &p.player_id == player_id))
    }

    fn get_season_stats(&self, season: Season) -> Result<Vec<WeeklyStatRow>> {
        let sql = format!(
            "SELECT {} FROM weekly_stats WHERE season = ? ORDER BY player_id, week",
            STAT_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![season.as_u16()], row_to_weekly_stats)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Stat rows for `player_id` with week < `before`, newest first.
    /// `None` for `limit` returns every row.
    pub fn player_history(
        &self,
        player_id: &PlayerId,
        season: Season,
        before: Week,
        limit: Option<usize>,
    ) -> Result<Vec<WeeklyStatRow>> {
        let sql = format!(
            "SELECT {} FROM weekly_stats
             WHERE player_id = ? AND season = ? AND week < ?
             ORDER BY week DESC LIMIT ?",
            STAT_COLUMNS
        );
        // SQLite treats a negative LIMIT as unbounded
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![player_id.as_str(), season.as_u16(), before.as_u16(), limit],
            row_to_weekly_stats,
        )?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn get_season_snaps(&self, season: Season) -> Result<Vec<SnapCountRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT player_id, season, week, offense_snaps, offense_pct
             FROM snap_counts WHERE season = ? ORDER BY player_id, week",
        )?;
        let rows = stmt.query_map(params![season.as_u16()], |row| {
            Ok(SnapCountRow {
                player_id: PlayerId::new(row.get::<_, String>(0)?),
                season: Season::new(row.get(1)?),
                week: Week::new(row.get(2)?),
                offense_snaps: row.get(3)?,
                offense_pct: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Injury records in import order, which the resolver relies on.
    fn get_injuries(&self, season: Season) -> Result<Vec<InjuryRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT player_id, week, status FROM injuries WHERE season = ? ORDER BY rowid",
        )?;
        let rows = stmt.query_map(params![season.as_u16()], |row| {
            Ok(InjuryRecord {
                player_id: PlayerId::new(row.get::<_, String>(0)?),
                week: row.get::<_, Option<u16>>(1)?.map(Week::new),
                status: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn get_features(&self, season: Season) -> Result<Vec<FeatureRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT player_id, week, team, values_json
             FROM features WHERE season = ? ORDER BY player_id, week",
        )?;
        let rows = stmt.query_map(params![season.as_u16()], |row| {
            let json: String = row.get(3)?;
            let values: BTreeMap<String, Option<f64>> =
                serde_json::from_str(&json).map_err(|e| conversion_error(3, e))?;
            Ok(FeatureRow {
                player_id: PlayerId::new(row.get::<_, String>(0)?),
                week: Week::new(row.get(1)?),
                team: row.get::<_, Option<String>>(2)?.map(TeamAbbr::new),
                values,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Clear all data from the database (for testing/debugging)
    pub fn clear_all(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "DELETE FROM features;
             DELETE FROM injuries;
             DELETE FROM snap_counts;
             DELETE FROM weekly_stats;
             DELETE FROM players;",
        )?;
        Ok(())
    }
}

fn row_to_weekly_stats(row: &Row) -> rusqlite::Result<WeeklyStatRow> {
    Ok(WeeklyStatRow {
        player_id: PlayerId::new(row.get::<_, String>(0)?),
        season: Season::new(row.get(1)?),
        week: Week::new(row.get(2)?),
        opponent: row.get(3)?,
        passing_yards: row.get(4)?,
        passing_touchdowns: row.get(5)?,
        rushing_yards: row.get(6)?,
        rushing_touchdowns: row.get(7)?,
        receiving_yards: row.get(8)?,
        receiving_touchdowns: row.get(9)?,
        receptions: row.get(10)?,
        interceptions: row.get(11)?,
        fumbles_lost: row.get(12)?,
        fantasy_points_ppr: row.get(13)?,
    })
}
