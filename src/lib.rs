//! Fantasy Football Prediction Reconciliation Library
//!
//! Combines a player's recent form, a per-position tree-ensemble deviation
//! model and a teammate-injury usage boost into one weekly PPR prediction.
//!
//! ## Features
//!
//! - **Deterministic scoring**: PPR points from box-score lines
//! - **Week-aware injuries**: status lookup that tolerates unreported weeks
//! - **Recent form**: rolling baseline over the latest non-zero games
//! - **Deviation models**: XGBoost-style JSON tree dumps loaded per position
//! - **Usage vacuum**: flat boost when a productive teammate is sidelined
//! - **Database storage**: SQLite snapshot import with a live history fallback
//! - **Roster cards**: parallel card building for a whole team
//!
//! ## Quick Start
//!
//! ```rust
//! use ffl_forecast::{
//!     config::EngineConfig,
//!     engine::{DataContext, Reconciler},
//!     model::ModelRegistry,
//!     storage::{PlayerProfile, SnapshotFile, WeeklyStatRow},
//!     PlayerId, Position, Season, TeamAbbr, Week,
//! };
//!
//! let id = PlayerId::new("00-0036223");
//! let snapshot = SnapshotFile {
//!     profiles: vec![PlayerProfile {
//!         player_id: id.clone(),
//!         name: "Example Back".to_string(),
//!         position: Position::RB,
//!         team: Some(TeamAbbr::new("NO")),
//!         status: Some("ACT".to_string()),
//!         draft_year: None,
//!         draft_number: None,
//!         age: None,
//!     }],
//!     stats: vec![WeeklyStatRow {
//!         player_id: id.clone(),
//!         season: Season::new(2025),
//!         week: Week::new(9),
//!         fantasy_points_ppr: Some(18.1),
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//!
//! let ctx = DataContext::new(snapshot, ModelRegistry::new());
//! let config = EngineConfig::default();
//! let result = Reconciler::new(&ctx, &config).reconcile(&id, Position::RB, Week::new(10));
//! assert_eq!(result.final_score, 18.1);
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export FFL_FORECAST_SEASON=2025
//! export FFL_FORECAST_DB=/path/to/players.db
//! export FFL_FORECAST_MODEL_DIR=/path/to/models
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod model;
pub mod service;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{PlayerId, Position, Season, TeamAbbr, Week};
pub use engine::{PredictionResult, Reconciler};
pub use error::{ForecastError, Result};
pub use service::Forecaster;
