//! Week-aware injury status lookup.

use crate::cli::types::{PlayerId, Week};
use crate::config::DEFAULT_INJURY_STATUS;
use crate::storage::InjuryRecord;


/// Anything that can answer "what was this player's official status in week W".
pub trait InjuryResolver: Send + Sync {
    fn resolve(&self, player_id: &PlayerId, week: Week) -> String;
}

/// In-memory injury report snapshots.
///
/// A table in which no record carries a week is a legacy snapshot: it holds a
/// single current status per player and is looked up by player alone.
#[derive(Debug, Clone, Default)]
pub struct InjuryTable {
    records: Vec<InjuryRecord>,
    max_week: Option<Week>,
}

impl InjuryTable {
    pub fn new(records: Vec<InjuryRecord>) -> Self {
        let max_week = records.iter().filter_map(|r| r.week).max();
        Self { records, max_week }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_legacy(&self) -> bool {
        !self.records.is_empty() && self.max_week.is_none()
    }

    pub fn max_week(&self) -> Option<Week> {
        self.max_week
    }

    fn first_status<P>(&self, predicate: P) -> Option<String>
    where
        P: Fn(&InjuryRecord) -> bool,
    {
        self.records
            .iter()
            .find(|r| predicate(r))
            .map(|r| r.status.clone())
    }
}

impl InjuryResolver for InjuryTable {
    /// Status for the exact week if that week was reported at all; otherwise
    /// the latest reported week stands in for it.
    fn resolve(&self, player_id: &PlayerId, week: Week) -> String {
        let Some(max_week) = self.max_week else {
            return self
                .first_status(|r| &r.player_id == player_id)
                .unwrap_or_else(|| DEFAULT_INJURY_STATUS.to_string());
        };

        let week_reported = self.records.iter().any(|r| r.week == Some(week));
        let target = if week_reported { week } else { max_week };

        self.first_status(|r| r.week == Some(target) && &r.player_id == player_id)
            .unwrap_or_else(|| DEFAULT_INJURY_STATUS.to_string())
    }
}

/// Case-insensitive "status contains any marker" check.
pub fn matches_any(status: &str, markers: &[String]) -> bool {
    let status = status.to_lowercase();
    markers
        .iter()
        .any(|m| !m.is_empty() && status.contains(&m.to_lowercase()))
}
