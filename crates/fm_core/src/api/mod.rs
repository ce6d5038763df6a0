pub mod json_api;

pub use json_api::{simulate_match_json, GoalData, MatchRequest, MatchResponse, TeamData};
