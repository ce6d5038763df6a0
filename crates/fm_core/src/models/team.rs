use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Player, PlayerId};
use crate::error::{self, ModelError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u32);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Team snapshot handed to the match engine.
///
/// The roster is a set keyed by player id and is kept in ascending id order,
/// which is the order scorer selection walks it in.
#[derive(Debug, Clone, Serialize)]
pub struct Team {
    id: TeamId,
    name: String,
    power: f64,
    roster: Vec<Player>,
}

impl Team {
    /// Build a team whose power is the sum of its roster's skill ratings.
    pub fn new(
        id: TeamId,
        name: impl Into<String>,
        players: Vec<Player>,
    ) -> error::Result<Self> {
        let roster = Self::build_roster(id, players)?;
        let power = roster.iter().map(|p| p.skill_rating as f64).sum();
        Ok(Team { id, name: name.into(), power, roster })
    }

    /// Build a team with a power figure computed by the caller.
    ///
    /// A team with positive power can win goal attempts, so it needs at least
    /// one player to credit them to.
    pub fn with_power(
        id: TeamId,
        name: impl Into<String>,
        players: Vec<Player>,
        power: f64,
    ) -> error::Result<Self> {
        if !power.is_finite() || power < 0.0 {
            return Err(ModelError::InvalidPower { team: id, power });
        }
        let roster = Self::build_roster(id, players)?;
        if roster.is_empty() && power > 0.0 {
            return Err(ModelError::EmptyScoringRoster { team: id, power });
        }

        let roster_sum: f64 = roster.iter().map(|p| p.skill_rating as f64).sum();
        if (roster_sum - power).abs() > f64::EPSILON {
            tracing::warn!(
                team = %id,
                power,
                roster_sum,
                "supplied power differs from roster skill sum"
            );
        }

        Ok(Team { id, name: name.into(), power, roster })
    }

    fn build_roster(id: TeamId, mut players: Vec<Player>) -> error::Result<Vec<Player>> {
        for player in &players {
            player.validate()?;
        }
        players.sort_by_key(|p| p.id);
        if let Some(pair) = players.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(ModelError::DuplicatePlayer { team: id, player: pair[0].id });
        }
        Ok(players)
    }

    /// Skips every check, for exercising the engine's own guards.
    #[cfg(test)]
    pub(crate) fn unchecked(id: TeamId, name: &str, players: Vec<Player>, power: f64) -> Self {
        Team { id, name: name.to_string(), power, roster: players }
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.roster.binary_search_by_key(&id, |p| p.id).ok().map(|i| &self.roster[i])
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.player(id).is_some()
    }

    pub fn average_skill(&self) -> f64 {
        if self.roster.is_empty() {
            0.0
        } else {
            self.power / self.roster.len() as f64
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Team: {}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    fn player(id: u32, position: Position, skill: u8) -> Player {
        Player::new(PlayerId(id), format!("P{}", id), position, skill).unwrap()
    }

    #[test]
    fn test_power_is_roster_skill_sum() {
        let team = Team::new(
            TeamId(1),
            "Sum FC",
            vec![player(1, Position::Forward, 80), player(2, Position::Goalkeeper, 60)],
        )
        .unwrap();
        assert_eq!(team.power(), 140.0);
        assert_eq!(team.average_skill(), 70.0);
    }

    #[test]
    fn test_empty_roster_has_zero_power() {
        let team = Team::new(TeamId(2), "Ghosts", vec![]).unwrap();
        assert_eq!(team.power(), 0.0);
        assert!(team.roster().is_empty());
        assert_eq!(team.average_skill(), 0.0);
    }

    #[test]
    fn test_roster_sorted_by_player_id() {
        let team = Team::new(
            TeamId(3),
            "Order",
            vec![
                player(30, Position::Defender, 50),
                player(10, Position::Forward, 50),
                player(20, Position::Midfielder, 50),
            ],
        )
        .unwrap();
        let ids: Vec<u32> = team.roster().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![10, 20, 30]);
        assert!(team.contains(PlayerId(20)));
        assert!(!team.contains(PlayerId(40)));
    }

    #[test]
    fn test_duplicate_player_rejected() {
        let err = Team::new(
            TeamId(4),
            "Clones",
            vec![player(5, Position::Forward, 70), player(5, Position::Forward, 70)],
        )
        .unwrap_err();
        assert_eq!(err, ModelError::DuplicatePlayer { team: TeamId(4), player: PlayerId(5) });
    }

    #[test]
    fn test_negative_power_rejected() {
        let err = Team::with_power(TeamId(5), "Debt", vec![], -1.0).unwrap_err();
        assert!(matches!(err, ModelError::InvalidPower { .. }));
        assert!(Team::with_power(TeamId(5), "Nan", vec![], f64::NAN).is_err());
    }

    #[test]
    fn test_with_power_keeps_supplied_value() {
        let team =
            Team::with_power(TeamId(6), "Boosted", vec![player(1, Position::Forward, 10)], 1000.0)
                .unwrap();
        assert_eq!(team.power(), 1000.0);
    }

    #[test]
    fn test_invalid_player_rejected_at_team_construction() {
        let mut bad = player(1, Position::Forward, 50);
        bad.skill_rating = 0;
        assert!(Team::new(TeamId(7), "Bad", vec![bad]).is_err());
    }

    #[test]
    fn test_positive_power_without_players_rejected() {
        let err = Team::with_power(TeamId(8), "Ghost", vec![], 1000.0).unwrap_err();
        assert_eq!(err, ModelError::EmptyScoringRoster { team: TeamId(8), power: 1000.0 });

        let idle = Team::with_power(TeamId(8), "Idle", vec![], 0.0).unwrap();
        assert_eq!(idle.power(), 0.0);
    }
}
