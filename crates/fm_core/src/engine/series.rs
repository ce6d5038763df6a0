//! Parallel match runs.
//!
//! Every run owns its generator: run `i` uses the ChaCha8 stream `i` of the
//! caller's seed, so results do not depend on how rayon schedules the work.

use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

use super::simulator::{seeded_rng, MatchSimulator};
use crate::models::{MatchResult, PlayerId, Team, TeamId};

fn run_rng(seed: u64, run: u64) -> ChaCha8Rng {
    let mut rng = seeded_rng(seed);
    rng.set_stream(run);
    rng
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorerTally {
    pub player: PlayerId,
    pub name: String,
    pub goals: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesSummary {
    pub home: TeamId,
    pub away: TeamId,
    pub runs: u32,
    pub home_wins: u32,
    pub draws: u32,
    pub away_wins: u32,
    pub home_goals: u32,
    pub away_goals: u32,
    /// Most prolific home scorers, goals descending.
    pub home_scorers: Vec<ScorerTally>,
    pub away_scorers: Vec<ScorerTally>,
}

impl SeriesSummary {
    pub fn mean_home_goals(&self) -> f64 {
        self.mean(self.home_goals)
    }

    pub fn mean_away_goals(&self) -> f64 {
        self.mean(self.away_goals)
    }

    fn mean(&self, goals: u32) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            goals as f64 / self.runs as f64
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    runs: u32,
    home_wins: u32,
    draws: u32,
    away_wins: u32,
    home_goals: u32,
    away_goals: u32,
    home_scorers: BTreeMap<PlayerId, (String, u32)>,
    away_scorers: BTreeMap<PlayerId, (String, u32)>,
}

impl Tally {
    fn from_result(result: &MatchResult) -> Self {
        let mut tally = Tally {
            runs: 1,
            home_goals: result.home().score(),
            away_goals: result.away().score(),
            ..Tally::default()
        };
        match result.winner() {
            Some(winner) if winner == result.home().team => tally.home_wins = 1,
            Some(_) => tally.away_wins = 1,
            None => tally.draws = 1,
        }
        for goal in result.home().goals() {
            tally.home_scorers.entry(goal.scorer).or_insert_with(|| (goal.scorer_name.clone(), 0)).1 += 1;
        }
        for goal in result.away().goals() {
            tally.away_scorers.entry(goal.scorer).or_insert_with(|| (goal.scorer_name.clone(), 0)).1 += 1;
        }
        tally
    }

    fn merge(mut self, other: Tally) -> Tally {
        self.runs += other.runs;
        self.home_wins += other.home_wins;
        self.draws += other.draws;
        self.away_wins += other.away_wins;
        self.home_goals += other.home_goals;
        self.away_goals += other.away_goals;
        merge_scorers(&mut self.home_scorers, other.home_scorers);
        merge_scorers(&mut self.away_scorers, other.away_scorers);
        self
    }
}

fn merge_scorers(
    into: &mut BTreeMap<PlayerId, (String, u32)>,
    from: BTreeMap<PlayerId, (String, u32)>,
) {
    for (player, (name, goals)) in from {
        into.entry(player).or_insert_with(|| (name, 0)).1 += goals;
    }
}

fn ranked(scorers: BTreeMap<PlayerId, (String, u32)>) -> Vec<ScorerTally> {
    let mut ranked: Vec<ScorerTally> = scorers
        .into_iter()
        .map(|(player, (name, goals))| ScorerTally { player, name, goals })
        .collect();
    // stable sort keeps ascending id among equal tallies
    ranked.sort_by(|a, b| b.goals.cmp(&a.goals));
    ranked
}

/// Play the same fixture `runs` times and aggregate the outcomes.
pub fn simulate_series(
    simulator: &MatchSimulator,
    home: &Team,
    away: &Team,
    runs: u32,
    seed: u64,
) -> SeriesSummary {
    let tally = (0..runs)
        .into_par_iter()
        .map(|run| {
            let mut rng = run_rng(seed, run as u64);
            Tally::from_result(&simulator.simulate(home, away, &mut rng))
        })
        .reduce(Tally::default, Tally::merge);

    tracing::info!(
        home = %home.id(),
        away = %away.id(),
        runs,
        home_wins = tally.home_wins,
        draws = tally.draws,
        away_wins = tally.away_wins,
        "series finished"
    );

    SeriesSummary {
        home: home.id(),
        away: away.id(),
        runs: tally.runs,
        home_wins: tally.home_wins,
        draws: tally.draws,
        away_wins: tally.away_wins,
        home_goals: tally.home_goals,
        away_goals: tally.away_goals,
        home_scorers: ranked(tally.home_scorers),
        away_scorers: ranked(tally.away_scorers),
    }
}

/// Play a list of fixtures in parallel; results come back in fixture order.
pub fn simulate_fixtures(
    simulator: &MatchSimulator,
    fixtures: &[(Team, Team)],
    seed: u64,
) -> Vec<MatchResult> {
    fixtures
        .par_iter()
        .enumerate()
        .map(|(i, (home, away))| simulator.simulate(home, away, &mut run_rng(seed, i as u64)))
        .collect()
}
