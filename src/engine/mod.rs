//! Prediction engine
//!
//! Every component reads from one immutable [`DataContext`]:
//! - `scoring`: PPR points from a box-score line
//! - `injury`: week-aware injury status lookup
//! - `recent_form`: rolling baseline over recent games
//! - `deviation`: feature assembly and model deviation
//! - `usage`: teammate-injury usage boost
//! - `reconcile`: combines the above into a [`PredictionResult`]
//! - `card`: display card built on a reconciled prediction

pub mod card;
pub mod context;
pub mod deviation;
pub mod injury;
pub mod recent_form;
pub mod reconcile;
pub mod scoring;
pub mod usage;

pub use card::PlayerCard;
pub use context::{ContextHandle, DataContext, HistoryFetch, Snapshot};
pub use injury::{InjuryResolver, InjuryTable};
pub use reconcile::{PredictionResult, Reconciler};
pub use usage::{UsageBoostReport, UsageVacuumDetector, VacancySource};
