use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{ClubId, CountryId};
use crate::error::{self, ModelError};

pub const MIN_SKILL_RATING: u8 = 1;
pub const MAX_SKILL_RATING: u8 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Player data consumed by the match engine.
///
/// The engine only reads `id`, `name`, `position` and `skill_rating`; the
/// remaining fields come from the roster store and are carried for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub skill_rating: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club_id: Option<ClubId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_id: Option<CountryId>,
}

impl Player {
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        position: Position,
        skill_rating: u8,
    ) -> error::Result<Self> {
        let player = Player {
            id,
            name: name.into(),
            position,
            skill_rating,
            height_cm: None,
            weight_kg: None,
            birthday: None,
            club_id: None,
            country_id: None,
        };
        player.validate()?;
        Ok(player)
    }

    pub fn validate(&self) -> error::Result<()> {
        if !(MIN_SKILL_RATING..=MAX_SKILL_RATING).contains(&self.skill_rating) {
            return Err(ModelError::InvalidSkillRating {
                player: self.id,
                rating: self.skill_rating,
            });
        }

        if let Some(height_cm) = self.height_cm {
            if height_cm == 0 || height_cm >= 300 {
                return Err(ModelError::InvalidHeight { player: self.id, height_cm });
            }
        }

        if let Some(weight_kg) = self.weight_kg {
            if !(weight_kg > 0.0 && weight_kg < 300.0) {
                return Err(ModelError::InvalidWeight { player: self.id, weight_kg });
            }
        }

        Ok(())
    }

    /// Age in whole years on `on`, if the birthday is known.
    pub fn age_on(&self, on: NaiveDate) -> Option<u32> {
        self.birthday.and_then(|born| on.years_since(born))
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({}) - Skill: {}", self.name, self.position, self.skill_rating)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub const ALL: [Position; 4] =
        [Position::Goalkeeper, Position::Defender, Position::Midfielder, Position::Forward];

    pub fn code(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DF",
            Position::Midfielder => "MF",
            Position::Forward => "FW",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defender => "Defender",
            Position::Midfielder => "Midfielder",
            Position::Forward => "Forward",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Position {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gk" | "goalkeeper" => Ok(Position::Goalkeeper),
            "df" | "def" | "defender" => Ok(Position::Defender),
            "mf" | "mid" | "midfielder" => Ok(Position::Midfielder),
            "fw" | "fwd" | "forward" => Ok(Position::Forward),
            _ => Err(ModelError::InvalidPosition(s.to_string())),
        }
    }
}

impl TryFrom<String> for Position {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_parsing_accepts_codes_and_labels() {
        assert_eq!("GK".parse::<Position>().unwrap(), Position::Goalkeeper);
        assert_eq!("defender".parse::<Position>().unwrap(), Position::Defender);
        assert_eq!("Mid".parse::<Position>().unwrap(), Position::Midfielder);
        assert_eq!(" FWD ".parse::<Position>().unwrap(), Position::Forward);
    }

    #[test]
    fn test_unknown_position_is_rejected() {
        let err = "Libero".parse::<Position>().unwrap_err();
        assert_eq!(err, ModelError::InvalidPosition("Libero".to_string()));
    }

    #[test]
    fn test_position_serde_uses_codes() {
        let json = serde_json::to_string(&Position::Forward).unwrap();
        assert_eq!(json, "\"FW\"");
        let parsed: Position = serde_json::from_str("\"Goalkeeper\"").unwrap();
        assert_eq!(parsed, Position::Goalkeeper);
        assert!(serde_json::from_str::<Position>("\"Sweeper\"").is_err());
    }

    #[test]
    fn test_skill_rating_bounds() {
        assert!(Player::new(PlayerId(1), "A", Position::Forward, 1).is_ok());
        assert!(Player::new(PlayerId(2), "B", Position::Forward, 99).is_ok());
        assert_eq!(
            Player::new(PlayerId(3), "C", Position::Forward, 0).unwrap_err(),
            ModelError::InvalidSkillRating { player: PlayerId(3), rating: 0 }
        );
        assert!(Player::new(PlayerId(4), "D", Position::Forward, 100).is_err());
    }

    #[test]
    fn test_physical_attributes_validated() {
        let mut player = Player::new(PlayerId(7), "Tall", Position::Defender, 70).unwrap();
        player.height_cm = Some(300);
        assert!(matches!(player.validate(), Err(ModelError::InvalidHeight { .. })));

        player.height_cm = Some(190);
        player.weight_kg = Some(0.0);
        assert!(matches!(player.validate(), Err(ModelError::InvalidWeight { .. })));

        player.weight_kg = Some(82.5);
        assert!(player.validate().is_ok());
    }

    #[test]
    fn test_age_on() {
        let mut player = Player::new(PlayerId(9), "Young", Position::Midfielder, 60).unwrap();
        assert_eq!(player.age_on(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()), None);

        player.birthday = NaiveDate::from_ymd_opt(2000, 6, 15);
        assert_eq!(player.age_on(NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()), Some(23));
        assert_eq!(player.age_on(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()), Some(24));
    }

    #[test]
    fn test_display() {
        let player = Player::new(PlayerId(10), "Nine", Position::Forward, 88).unwrap();
        assert_eq!(player.to_string(), "Nine (Forward) - Skill: 88");
    }
}
