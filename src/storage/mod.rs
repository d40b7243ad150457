//! Storage layer for ffl-forecast
//!
//! - `models`: typed rows shared with the engine
//! - `schema`: database connection and schema management
//! - `queries`: snapshot import and read-back
//! - `live`: thread-safe handle serving targeted history fetches

pub mod live;
pub mod models;
pub mod queries;
pub mod schema;

#[cfg(test)]
mod tests;

pub use live::SharedDatabase;
pub use models::*;
pub use queries::ImportSummary;
pub use schema::PlayerDatabase;
