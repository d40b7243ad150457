//! Error types for the fantasy forecast engine

use thiserror::Error;


pub type Result<T> = std::result::Result<T, ForecastError>;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Failed to parse number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error("Failed to load {position} model: {message}")]
    ModelLoad { position: String, message: String },

    #[error("Model prediction failed: {message}")]
    Prediction { message: String },

    #[error("Non-finite score computed for player {player_id}")]
    NonFiniteScore { player_id: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}
