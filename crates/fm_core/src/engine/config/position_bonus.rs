//! Scorer-weight bonus per position

use serde::{Deserialize, Serialize};

use crate::models::Position;

/// Flat bonus added to a player's scorer weight.
///
/// Must be strictly increasing goalkeeper < defender < midfielder < forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionBonus {
    /// (default: 0)
    pub goalkeeper: u32,
    /// (default: 40)
    pub defender: u32,
    /// (default: 110)
    pub midfielder: u32,
    /// (default: 150)
    pub forward: u32,
}

impl Default for PositionBonus {
    fn default() -> Self {
        Self { goalkeeper: 0, defender: 40, midfielder: 110, forward: 150 }
    }
}

impl PositionBonus {
    pub fn get(&self, position: Position) -> u32 {
        match position {
            Position::Goalkeeper => self.goalkeeper,
            Position::Defender => self.defender,
            Position::Midfielder => self.midfielder,
            Position::Forward => self.forward,
        }
    }

    pub fn is_monotonic(&self) -> bool {
        self.goalkeeper < self.defender
            && self.defender < self.midfielder
            && self.midfielder < self.forward
    }
}
