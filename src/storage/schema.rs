//! Database schema and connection management

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

use crate::config::default_db_path;

/// Database connection manager for the forecast tables
pub struct PlayerDatabase {
    pub(crate) conn: Connection,
}

impl PlayerDatabase {
    /// Open the database at the default cache location
    pub fn new() -> Result<Self> {
        Self::open(default_db_path())
    }

    /// Open (or create) the database at `path` and ensure tables exist
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let mut db = Self {
            conn: Connection::open_in_memory()?,
        };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS players (
                player_id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                position TEXT NOT NULL,
                team TEXT,
                status TEXT,
                draft_year INTEGER,
                draft_number INTEGER,
                age REAL
            );

            CREATE TABLE IF NOT EXISTS weekly_stats (
                player_id TEXT NOT NULL,
                season INTEGER NOT NULL,
                week INTEGER NOT NULL,
                opponent TEXT,
                passing_yards REAL,
                passing_touchdowns REAL,
                rushing_yards REAL,
                rushing_touchdowns REAL,
                receiving_yards REAL,
                receiving_touchdowns REAL,
                receptions REAL,
                interceptions REAL,
                fumbles_lost REAL,
                fantasy_points_ppr REAL,
                PRIMARY KEY (player_id, season, week)
            );

            CREATE TABLE IF NOT EXISTS snap_counts (
                player_id TEXT NOT NULL,
                season INTEGER NOT NULL,
                week INTEGER NOT NULL,
                offense_snaps INTEGER,
                offense_pct REAL,
                PRIMARY KEY (player_id, season, week)
            );

            CREATE TABLE IF NOT EXISTS injuries (
                player_id TEXT NOT NULL,
                season INTEGER NOT NULL,
                week INTEGER,
                status TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS features (
                player_id TEXT NOT NULL,
                season INTEGER NOT NULL,
                week INTEGER NOT NULL,
                team TEXT,
                values_json TEXT NOT NULL,
                PRIMARY KEY (player_id, season, week)
            );

            CREATE INDEX IF NOT EXISTS idx_weekly_stats_season_week
                ON weekly_stats(season, week);
            CREATE INDEX IF NOT EXISTS idx_injuries_season_week
                ON injuries(season, week);",
        )?;
        Ok(())
    }
}
