use serde::{Deserialize, Serialize};

use crate::engine::{seeded_rng, MatchSimulator, SimulationConfig};
use crate::error::ApiError;
use crate::models::{MatchResult, Player, PlayerId, Team, TeamId};

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub home_team: TeamData,
    pub away_team: TeamData,
    /// Engine tuning; defaults apply when absent.
    #[serde(default)]
    pub config: Option<SimulationConfig>,
}

#[derive(Debug, Deserialize)]
pub struct TeamData {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub players: Vec<Player>,
    /// Precomputed power; the roster skill sum is used when absent.
    #[serde(default)]
    pub power: Option<f64>,
}

impl TeamData {
    fn into_team(self, side: &'static str) -> Result<Team, ApiError> {
        let team = match self.power {
            Some(power) => Team::with_power(self.id, self.name, self.players, power),
            None => Team::new(self.id, self.name, self.players),
        };
        team.map_err(|source| ApiError::InvalidTeam { side, source })
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchResponse {
    pub schema_version: u8,
    pub seed: u64,
    pub home_team: String,
    pub away_team: String,
    pub score_home: u32,
    pub score_away: u32,
    pub goals: Vec<GoalData>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GoalData {
    /// "home" or "away"
    pub team: String,
    pub player_id: PlayerId,
    pub player: String,
    pub minute: u8,
}

impl MatchResponse {
    fn from_result(result: &MatchResult, seed: u64) -> Self {
        let mut goals: Vec<GoalData> = [("home", result.home()), ("away", result.away())]
            .into_iter()
            .flat_map(|(label, side)| {
                side.goals().iter().map(move |g| GoalData {
                    team: label.to_string(),
                    player_id: g.scorer,
                    player: g.scorer_name.clone(),
                    minute: g.minute,
                })
            })
            .collect();
        goals.sort_by_key(|g| g.minute);

        MatchResponse {
            schema_version: SCHEMA_VERSION,
            seed,
            home_team: result.home().name.clone(),
            away_team: result.away().name.clone(),
            score_home: result.home().score(),
            score_away: result.away().score(),
            goals,
        }
    }
}

/// Simulate one match described by a JSON request and return the JSON response.
///
/// The same request always yields the same response.
pub fn simulate_match_json(request_json: &str) -> Result<String, ApiError> {
    let request: MatchRequest = serde_json::from_str(request_json)?;

    if request.schema_version != SCHEMA_VERSION {
        return Err(ApiError::UnsupportedSchema(request.schema_version));
    }

    let simulator = MatchSimulator::try_new(request.config.unwrap_or_default())?;

    let home = request.home_team.into_team("Home")?;
    let away = request.away_team.into_team("Away")?;
    if home.id() == away.id() {
        return Err(ApiError::SameTeam(home.id()));
    }

    let result = simulator.simulate(&home, &away, &mut seeded_rng(request.seed));

    let response = MatchResponse::from_result(&result, request.seed);
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use serde_json::json;

    fn request(seed: u64) -> serde_json::Value {
        json!({
            "schema_version": 1,
            "seed": seed,
            "home_team": {
                "id": 1,
                "name": "A",
                "players": [
                    {"id": 1, "name": "P1", "position": "FW", "skill_rating": 80},
                    {"id": 2, "name": "P2", "position": "GK", "skill_rating": 60}
                ]
            },
            "away_team": {
                "id": 2,
                "name": "B",
                "players": [
                    {"id": 3, "name": "P3", "position": "MF", "skill_rating": 50}
                ]
            }
        })
    }

    #[test]
    fn test_basic_simulation() {
        let response = simulate_match_json(&request(42).to_string()).unwrap();
        let parsed: MatchResponse = serde_json::from_str(&response).unwrap();

        assert_eq!(parsed.schema_version, 1);
        assert_eq!(parsed.home_team, "A");
        assert_eq!(parsed.goals.len() as u32, parsed.score_home + parsed.score_away);
        for goal in &parsed.goals {
            match goal.team.as_str() {
                "home" => assert!(["P1", "P2"].contains(&goal.player.as_str())),
                "away" => assert_eq!(goal.player, "P3"),
                other => panic!("unexpected side {}", other),
            }
        }
        assert!(parsed.goals.windows(2).all(|w| w[0].minute <= w[1].minute));
    }

    #[test]
    fn test_determinism() {
        let request_str = request(999).to_string();
        let a = simulate_match_json(&request_str).unwrap();
        let b = simulate_match_json(&request_str).unwrap();
        assert_eq!(a, b, "Same seed should produce same result");
    }

    #[test]
    fn test_unsupported_schema() {
        let mut req = request(1);
        req["schema_version"] = json!(2);
        assert!(matches!(
            simulate_match_json(&req.to_string()),
            Err(ApiError::UnsupportedSchema(2))
        ));
    }

    #[test]
    fn test_invalid_position_rejected() {
        let mut req = request(1);
        req["home_team"]["players"][0]["position"] = json!("Sweeper");
        assert!(matches!(
            simulate_match_json(&req.to_string()),
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_negative_power_rejected() {
        let mut req = request(1);
        req["away_team"]["power"] = json!(-5.0);
        assert!(matches!(
            simulate_match_json(&req.to_string()),
            Err(ApiError::InvalidTeam { side: "Away", .. })
        ));
    }

    #[test]
    fn test_same_team_rejected() {
        let mut req = request(1);
        req["away_team"]["id"] = json!(1);
        assert!(matches!(simulate_match_json(&req.to_string()), Err(ApiError::SameTeam(_))));
    }

    #[test]
    fn test_powered_team_without_players_rejected() {
        let mut req = request(1);
        req["away_team"]["players"] = json!([]);
        req["away_team"]["power"] = json!(10.0);
        let err = simulate_match_json(&req.to_string()).unwrap_err();
        assert!(matches!(
            err,
            ApiError::InvalidTeam { side: "Away", source: ModelError::EmptyScoringRoster { .. } }
        ));

        req["away_team"]["power"] = json!(0.0);
        assert!(simulate_match_json(&req.to_string()).is_ok());
    }

    #[test]
    fn test_zero_power_request_completes() {
        let mut req = request(5);
        req["home_team"]["power"] = json!(0.0);
        req["away_team"]["power"] = json!(0.0);
        assert!(simulate_match_json(&req.to_string()).is_ok());
    }

    #[test]
    fn test_config_override() {
        let mut req = request(3);
        req["config"] = json!({"segment_minutes": 20});
        assert!(matches!(
            simulate_match_json(&req.to_string()),
            Err(ApiError::InvalidConfig(_))
        ));

        req["config"] = json!({"home_advantage": 0.0});
        assert!(simulate_match_json(&req.to_string()).is_ok());
    }
}
