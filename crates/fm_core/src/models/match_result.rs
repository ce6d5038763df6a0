//! Match outcome produced by the simulator.
//!
//! A `MatchResult` is assembled by exactly one simulation run and is
//! read-only afterwards. Scores are never stored separately: each side's
//! score is the length of its goal log, so the two cannot drift apart.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::{PlayerId, Team, TeamId};

/// A single goal as recorded in a side's log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalEvent {
    pub scorer: PlayerId,
    pub scorer_name: String,
    /// Match minute, 1-based.
    pub minute: u8,
    /// Zero-based index of the segment the goal was generated in.
    pub segment: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct SideResult {
    pub team: TeamId,
    pub name: String,
    goals: Vec<GoalEvent>,
}

impl SideResult {
    fn new(team: &Team) -> Self {
        SideResult { team: team.id(), name: team.name().to_string(), goals: Vec::new() }
    }

    pub fn score(&self) -> u32 {
        self.goals.len() as u32
    }

    pub fn goals(&self) -> &[GoalEvent] {
        &self.goals
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    home: SideResult,
    away: SideResult,
    duration_minutes: u8,
}

impl MatchResult {
    pub fn home(&self) -> &SideResult {
        &self.home
    }

    pub fn away(&self) -> &SideResult {
        &self.away
    }

    pub fn duration_minutes(&self) -> u8 {
        self.duration_minutes
    }

    fn side(&self, team: TeamId) -> Option<&SideResult> {
        if self.home.team == team {
            Some(&self.home)
        } else if self.away.team == team {
            Some(&self.away)
        } else {
            None
        }
    }

    /// Goals scored by `team`, or `None` if it did not take part.
    pub fn score(&self, team: TeamId) -> Option<u32> {
        self.side(team).map(SideResult::score)
    }

    /// Chronological goal log of `team`, or `None` if it did not take part.
    pub fn goal_log(&self, team: TeamId) -> Option<&[GoalEvent]> {
        self.side(team).map(SideResult::goals)
    }

    /// Score keyed by team id; the key set is exactly {home, away}.
    pub fn scores(&self) -> BTreeMap<TeamId, u32> {
        [(self.home.team, self.home.score()), (self.away.team, self.away.score())]
            .into_iter()
            .collect()
    }

    pub fn total_goals(&self) -> u32 {
        self.home.score() + self.away.score()
    }

    pub fn winner(&self) -> Option<TeamId> {
        match self.home.score().cmp(&self.away.score()) {
            std::cmp::Ordering::Greater => Some(self.home.team),
            std::cmp::Ordering::Less => Some(self.away.team),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.winner().is_none()
    }

    /// League points earned by `team`: 3 for a win, 1 for a draw.
    pub fn points(&self, team: TeamId) -> Option<u8> {
        self.side(team)?;
        Some(match self.winner() {
            None => 1,
            Some(winner) if winner == team => 3,
            Some(_) => 0,
        })
    }

    /// One line per goal, both sides merged in minute order.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut goals: Vec<(&GoalEvent, &str)> = self
            .home
            .goals
            .iter()
            .map(|g| (g, self.home.name.as_str()))
            .chain(self.away.goals.iter().map(|g| (g, self.away.name.as_str())))
            .collect();
        goals.sort_by_key(|(g, _)| g.minute);

        goals
            .into_iter()
            .map(|(goal, team)| format!("{:>2}' {} ({})", goal.minute, goal.scorer_name, team))
            .collect()
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} - {} {}",
            self.home.name,
            self.home.score(),
            self.away.score(),
            self.away.name
        )
    }
}

/// Accumulates goals during a simulation run; `finish` seals the result.
#[derive(Debug)]
pub(crate) struct MatchResultBuilder {
    result: MatchResult,
}

impl MatchResultBuilder {
    pub(crate) fn new(home: &Team, away: &Team, duration_minutes: u8) -> Self {
        MatchResultBuilder {
            result: MatchResult {
                home: SideResult::new(home),
                away: SideResult::new(away),
                duration_minutes,
            },
        }
    }

    pub(crate) fn record_goal(&mut self, home_side: bool, goal: GoalEvent) {
        let side = if home_side { &mut self.result.home } else { &mut self.result.away };
        side.goals.push(goal);
    }

    pub(crate) fn total_goals(&self) -> u32 {
        self.result.total_goals()
    }

    pub(crate) fn finish(self) -> MatchResult {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, Position};

    fn team(id: u32, name: &str) -> Team {
        let player = Player::new(PlayerId(id * 10), format!("{} Nine", name), Position::Forward, 70)
            .unwrap();
        Team::new(TeamId(id), name, vec![player]).unwrap()
    }

    fn goal(scorer: u32, name: &str, minute: u8) -> GoalEvent {
        GoalEvent {
            scorer: PlayerId(scorer),
            scorer_name: name.to_string(),
            minute,
            segment: (minute - 1) / 15,
        }
    }

    fn sample() -> MatchResult {
        let home = team(1, "Hosts");
        let away = team(2, "Guests");
        let mut builder = MatchResultBuilder::new(&home, &away, 90);
        builder.record_goal(true, goal(10, "Hosts Nine", 12));
        builder.record_goal(false, goal(20, "Guests Nine", 40));
        builder.record_goal(true, goal(10, "Hosts Nine", 77));
        builder.finish()
    }

    #[test]
    fn test_score_derived_from_goal_log() {
        let result = sample();
        assert_eq!(result.score(TeamId(1)), Some(2));
        assert_eq!(result.score(TeamId(2)), Some(1));
        assert_eq!(result.goal_log(TeamId(1)).unwrap().len(), 2);
        assert_eq!(result.score(TeamId(3)), None);
        assert!(result.goal_log(TeamId(3)).is_none());
    }

    #[test]
    fn test_scores_map_keys() {
        let scores = sample().scores();
        let keys: Vec<TeamId> = scores.keys().copied().collect();
        assert_eq!(keys, vec![TeamId(1), TeamId(2)]);
    }

    #[test]
    fn test_winner_and_points() {
        let result = sample();
        assert_eq!(result.winner(), Some(TeamId(1)));
        assert!(!result.is_draw());
        assert_eq!(result.points(TeamId(1)), Some(3));
        assert_eq!(result.points(TeamId(2)), Some(0));
        assert_eq!(result.points(TeamId(9)), None);
    }

    #[test]
    fn test_goalless_draw() {
        let result = MatchResultBuilder::new(&team(1, "A"), &team(2, "B"), 90).finish();
        assert!(result.is_draw());
        assert_eq!(result.points(TeamId(2)), Some(1));
        assert_eq!(result.total_goals(), 0);
        assert!(result.summary_lines().is_empty());
    }

    #[test]
    fn test_display_and_summary() {
        let result = sample();
        assert_eq!(result.to_string(), "Hosts 2 - 1 Guests");
        assert_eq!(
            result.summary_lines(),
            vec![
                "12' Hosts Nine (Hosts)".to_string(),
                "40' Guests Nine (Guests)".to_string(),
                "77' Hosts Nine (Hosts)".to_string(),
            ]
        );
    }

    #[test]
    fn test_serializes_goal_logs() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["home"]["goals"][1]["minute"], 77);
        assert_eq!(json["away"]["team"], 2);
    }
}
