use thiserror::Error;

use crate::models::{PlayerId, TeamId};

/// Invalid input rejected while building a `Player` or `Team`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid player position: {0}")]
    InvalidPosition(String),

    #[error("Invalid skill rating for player {player}: {rating} (expected 1-99)")]
    InvalidSkillRating { player: PlayerId, rating: u8 },

    #[error("Invalid height for player {player}: {height_cm} cm")]
    InvalidHeight { player: PlayerId, height_cm: u16 },

    #[error("Invalid weight for player {player}: {weight_kg} kg")]
    InvalidWeight { player: PlayerId, weight_kg: f32 },

    #[error("Invalid power for team {team}: {power}")]
    InvalidPower { team: TeamId, power: f64 },

    #[error("Team {team} has power {power} but no players to score")]
    EmptyScoringRoster { team: TeamId, power: f64 },

    #[error("Player {player} appears twice in the roster of team {team}")]
    DuplicatePlayer { team: TeamId, player: PlayerId },
}

/// Rejected simulation configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Segment length {segment} must be positive and divide match duration {duration}")]
    InvalidSegment { duration: u8, segment: u8 },

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Failure of a JSON API call.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid JSON request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error("Unsupported schema version: {0}")]
    UnsupportedSchema(u8),

    #[error("{side} team validation failed: {source}")]
    InvalidTeam {
        side: &'static str,
        #[source]
        source: ModelError,
    },

    #[error("Home and away teams share id {0}")]
    SameTeam(TeamId),

    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ModelError>;
