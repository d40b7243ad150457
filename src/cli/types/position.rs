//! Offensive skill positions covered by the deviation models.

use crate::error::ForecastError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fantasy football skill positions.
///
/// Each position has its own deviation model and feature list. QB and RB share
/// the "backfield" usage-vacuum tier; WR and TE share the "receiver" tier.
///
/// # Examples
///
/// ```rust
/// use ffl_forecast::Position;
///
/// let rb: Position = "rb".parse().unwrap();
/// assert_eq!(rb, Position::RB);
/// assert_eq!(rb.to_string(), "RB");
/// assert!(rb.is_backfield());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
}

impl Position {
    /// All modelled positions in roster display order.
    pub const ALL: [Position; 4] = [Position::QB, Position::RB, Position::WR, Position::TE];

    /// QB and RB get the larger usage boost and the lower contributor threshold.
    pub fn is_backfield(&self) -> bool {
        matches!(self, Position::QB | Position::RB)
    }

    /// Sort key used when ordering roster cards.
    pub fn display_order(&self) -> u8 {
        match self {
            Position::QB => 1,
            Position::RB => 2,
            Position::WR => 3,
            Position::TE => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Position {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Ok(Position::QB),
            "RB" | "HB" | "FB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            _ => Err(ForecastError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}
