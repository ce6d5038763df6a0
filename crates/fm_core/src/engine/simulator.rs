//! Segment-based match simulation.
//!
//! The match clock is split into fixed-width segments. In every segment the
//! home side and then the away side each get one independent goal attempt:
//!
//! ```text
//! base  = power / (home.power + away.power)      (zero_power_share if both 0)
//! r     = U[0, 1) + goals_before_segment / damping_divisor
//! r    -= home_advantage                          (home attempt only)
//! goal  = r < base
//! ```
//!
//! Both attempts of a segment see the goal total from before the segment, so
//! neither side's outcome depends on the order they are evaluated in.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::config::SimulationConfig;
use super::scorer::select_scorer;
use crate::error::ConfigError;
use crate::models::{GoalEvent, MatchResult, MatchResultBuilder, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Home,
    Away,
}

#[derive(Debug, Clone, Default)]
pub struct MatchSimulator {
    config: SimulationConfig,
}

impl MatchSimulator {
    /// # Panics
    /// If `config` fails `SimulationConfig::validate`. Use `try_new` for
    /// configs that come from outside the program.
    pub fn new(config: SimulationConfig) -> Self {
        if let Err(err) = config.validate() {
            panic!("invalid simulation config: {}", err);
        }
        MatchSimulator { config }
    }

    pub fn try_new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(MatchSimulator { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Base probability of each side scoring in a segment, `(home, away)`.
    pub fn base_probabilities(&self, home: &Team, away: &Team) -> (f64, f64) {
        let total = home.power() + away.power();
        if total > 0.0 {
            (home.power() / total, away.power() / total)
        } else {
            (self.config.zero_power_share, self.config.zero_power_share)
        }
    }

    /// Simulate one match. Neither team is modified.
    ///
    /// # Panics
    /// If `home` and `away` share a team id, or a side with positive power
    /// has no players.
    pub fn simulate<R: Rng + ?Sized>(&self, home: &Team, away: &Team, rng: &mut R) -> MatchResult {
        assert_ne!(home.id(), away.id(), "a team cannot play itself");
        for team in [home, away] {
            assert!(
                !team.roster().is_empty() || team.power() == 0.0,
                "team {} has power {} but an empty roster",
                team.id(),
                team.power()
            );
        }

        let cfg = &self.config;
        let (home_base, away_base) = self.base_probabilities(home, away);
        let mut builder = MatchResultBuilder::new(home, away, cfg.duration_minutes);

        for segment in 0..cfg.segment_count() {
            let goals_before = builder.total_goals();

            for (side, team, base) in [(Side::Home, home, home_base), (Side::Away, away, away_base)] {
                if team.roster().is_empty() {
                    debug!(team = %team.id(), segment, "powerless side without players, attempt skipped");
                    continue;
                }
                if !self.attempt_scores(side, base, goals_before, rng) {
                    continue;
                }

                let goal = self.goal_in_segment(team, segment, rng);
                debug!(
                    team = %team.id(),
                    scorer = %goal.scorer_name,
                    minute = goal.minute,
                    "goal"
                );
                builder.record_goal(side == Side::Home, goal);
            }
        }

        let result = builder.finish();
        info!(result = %result, "match simulated");
        result
    }

    fn attempt_scores<R: Rng + ?Sized>(
        &self,
        side: Side,
        base: f64,
        goals_before: u32,
        rng: &mut R,
    ) -> bool {
        let mut r: f64 = rng.gen();
        r += goals_before as f64 / self.config.damping_divisor;
        if side == Side::Home {
            r -= self.config.home_advantage;
        }
        r < base
    }

    fn goal_in_segment<R: Rng + ?Sized>(&self, team: &Team, segment: u8, rng: &mut R) -> GoalEvent {
        let width = self.config.segment_minutes;
        let start = segment * width;
        let minute = rng.gen_range(start + 1..=start + width);
        let scorer = select_scorer(team.roster(), &self.config, rng);

        GoalEvent { scorer: scorer.id, scorer_name: scorer.name.clone(), minute, segment }
    }
}

/// The generator every seeded entry point uses.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Simulate with the default configuration and the generator seeded by `seed`.
pub fn simulate_match(home: &Team, away: &Team, seed: u64) -> MatchResult {
    MatchSimulator::default().simulate(home, away, &mut seeded_rng(seed))
}
