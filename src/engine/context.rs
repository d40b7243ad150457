//! Read-only data snapshot injected into every reconciliation.
//!
//! A [`DataContext`] owns one consistent copy of every table the engine reads
//! plus the loaded models. It is never mutated after construction; a periodic
//! reload builds a fresh context and swaps it into a [`ContextHandle`], so
//! in-flight calls keep reading the snapshot they started with.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::injury::InjuryTable;
use crate::cli::types::{PlayerId, Position, TeamAbbr, Week};
use crate::model::ModelRegistry;
use crate::storage::{FeatureRow, PlayerProfile, SnapCountRow, SnapshotFile, WeeklyStatRow};


/// Targeted history lookup used when the in-memory stats table has nothing.
pub trait HistoryFetch: Send + Sync {
    /// Rows for `player_id` with week < `before`, newest first, at most
    /// `limit` rows when a limit is given.
    fn player_history(
        &self,
        player_id: &PlayerId,
        before: Week,
        limit: Option<usize>,
    ) -> anyhow::Result<Vec<WeeklyStatRow>>;
}

#[derive(Debug, Clone, Default)]
pub struct DataContext {
    profiles: Vec<PlayerProfile>,
    profile_index: HashMap<PlayerId, usize>,
    features: HashMap<(PlayerId, Week), FeatureRow>,
    stats: HashMap<PlayerId, Vec<WeeklyStatRow>>,
    snaps: HashMap<PlayerId, Vec<SnapCountRow>>,
    injuries: InjuryTable,
    models: ModelRegistry,
}

impl DataContext {
    pub fn new(snapshot: SnapshotFile, models: ModelRegistry) -> Self {
        let SnapshotFile {
            profiles,
            stats,
            snaps,
            injuries,
            features,
        } = snapshot;

        let mut profile_index = HashMap::new();
        for (i, p) in profiles.iter().enumerate() {
            profile_index.entry(p.player_id.clone()).or_insert(i);
        }

        let mut feature_map = HashMap::new();
        for row in features {
            feature_map
                .entry((row.player_id.clone(), row.week))
                .or_insert(row);
        }

        let mut stat_map: HashMap<PlayerId, Vec<WeeklyStatRow>> = HashMap::new();
        for row in stats {
            stat_map.entry(row.player_id.clone()).or_default().push(row);
        }

        let mut snap_map: HashMap<PlayerId, Vec<SnapCountRow>> = HashMap::new();
        for row in snaps {
            snap_map.entry(row.player_id.clone()).or_default().push(row);
        }

        Self {
            profiles,
            profile_index,
            features: feature_map,
            stats: stat_map,
            snaps: snap_map,
            injuries: InjuryTable::new(injuries),
            models,
        }
    }

    pub fn profile(&self, player_id: &PlayerId) -> Option<&PlayerProfile> {
        self.profile_index
            .get(player_id)
            .map(|&i| &self.profiles[i])
    }

    pub fn profiles(&self) -> &[PlayerProfile] {
        &self.profiles
    }

    /// Same team and position, excluding `player_id` itself.
    pub fn teammates<'a>(
        &'a self,
        player_id: &'a PlayerId,
        position: Position,
        team: &'a TeamAbbr,
    ) -> impl Iterator<Item = &'a PlayerProfile> + 'a {
        self.profiles.iter().filter(move |p| {
            p.position == position && p.team.as_ref() == Some(team) && &p.player_id != player_id
        })
    }

    pub fn feature_row(&self, player_id: &PlayerId, week: Week) -> Option<&FeatureRow> {
        self.features.get(&(player_id.clone(), week))
    }

    /// Whether the in-memory stats table holds anything at all.
    pub fn has_stats(&self) -> bool {
        !self.stats.is_empty()
    }

    /// Stat rows strictly before `week`, in stored order.
    pub fn history_before(&self, player_id: &PlayerId, week: Week) -> Vec<&WeeklyStatRow> {
        self.stats
            .get(player_id)
            .map(|rows| rows.iter().filter(|r| r.week < week).collect())
            .unwrap_or_default()
    }

    /// Snap rows strictly before `week`, in stored order.
    pub fn snaps_before(&self, player_id: &PlayerId, week: Week) -> Vec<&SnapCountRow> {
        self.snaps
            .get(player_id)
            .map(|rows| rows.iter().filter(|r| r.week < week).collect())
            .unwrap_or_default()
    }

    pub fn injuries(&self) -> &InjuryTable {
        &self.injuries
    }

    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }
}

/// A context together with the generation it was published as
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub context: Arc<DataContext>,
    pub generation: u64,
}

/// Shared, atomically swappable reference to the current [`DataContext`].
#[derive(Debug)]
pub struct ContextHandle {
    current: RwLock<Snapshot>,
}

impl ContextHandle {
    pub fn new(context: DataContext) -> Self {
        Self {
            current: RwLock::new(Snapshot {
                context: Arc::new(context),
                generation: 0,
            }),
        }
    }

    /// The snapshot current at call time; holding it does not block swaps.
    pub fn snapshot(&self) -> Snapshot {
        self.current.read().clone()
    }

    /// Publish a new context and return its generation.
    pub fn swap(&self, context: DataContext) -> u64 {
        let mut current = self.current.write();
        current.context = Arc::new(context);
        current.generation += 1;
        current.generation
    }

    pub fn generation(&self) -> u64 {
        self.current.read().generation
    }
}
