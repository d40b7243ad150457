//! ID types for NFL players and teams.

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for NFL player IDs (GSIS style, e.g. `00-0036223`).
///
/// Player IDs are opaque strings; wrapping them keeps them from being mixed up
/// with team abbreviations or player names.
///
/// # Examples
///
/// ```rust
/// use ffl_forecast::PlayerId;
///
/// let player_id = PlayerId::new("00-0036223");
/// assert_eq!(player_id.as_str(), "00-0036223");
/// assert_eq!(player_id.to_string(), "00-0036223");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new PlayerId from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ForecastError::PlayerNotFound {
                player_id: s.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// Type-safe wrapper for NFL team abbreviations (e.g. `KC`, `NO`).
///
/// Abbreviations are stored upper-cased so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamAbbr(pub String);

impl TeamAbbr {
    pub fn new(abbr: impl AsRef<str>) -> Self {
        Self(abbr.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamAbbr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TeamAbbr {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::new(s))
    }
}
