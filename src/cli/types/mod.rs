//! Type-safe wrappers for NFL identifiers, positions and calendar values.

pub mod ids;
pub mod position;
pub mod time;

pub use ids::{PlayerId, TeamAbbr};
pub use position::Position;
pub use time::{Season, Week};
