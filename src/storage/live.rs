//! Thread-safe database handle used as the live history source

use anyhow::Result;
use parking_lot::Mutex;

use super::{models::WeeklyStatRow, schema::PlayerDatabase};
use crate::engine::HistoryFetch;
use crate::{PlayerId, Season, Week};

/// A [`PlayerDatabase`] shared across threads, pinned to one season.
pub struct SharedDatabase {
    db: Mutex<PlayerDatabase>,
    season: Season,
}

impl SharedDatabase {
    pub fn new(db: PlayerDatabase, season: Season) -> Self {
        Self {
            db: Mutex::new(db),
            season,
        }
    }

    pub fn season(&self) -> Season {
        self.season
    }
}

impl HistoryFetch for SharedDatabase {
    fn player_history(
        &self,
        player_id: &PlayerId,
        before: Week,
        limit: Option<usize>,
    ) -> Result<Vec<WeeklyStatRow>> {
        self.db
            .lock()
            .player_history(player_id, self.season, before, limit)
    }
}
