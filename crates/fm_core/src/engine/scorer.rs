//! Goal scorer selection.
//!
//! Each player on the scoring side gets a weight of
//! `skill_rating + position bonus + roll`, where `roll` is a uniform integer
//! from the configured range. The heaviest player scores. Rolls are drawn in
//! roster order (ascending player id) and ties go to the first player in that
//! order, so a given roster and random stream always yield the same scorer.

use rand::Rng;

use super::config::SimulationConfig;
use crate::models::Player;

pub fn scorer_weight(player: &Player, config: &SimulationConfig, roll: u32) -> u32 {
    player.skill_rating as u32 + config.position_bonus.get(player.position) + roll
}

/// Pick the scorer of a goal from `roster`.
///
/// # Panics
/// If `roster` is empty. A side that can score must field at least one
/// player.
pub fn select_scorer<'a, R: Rng + ?Sized>(
    roster: &'a [Player],
    config: &SimulationConfig,
    rng: &mut R,
) -> &'a Player {
    assert!(!roster.is_empty(), "cannot attribute a goal to an empty roster");

    let mut best: Option<(&Player, u32)> = None;
    for player in roster {
        let roll = rng.gen_range(config.scorer_roll_min..=config.scorer_roll_max);
        let weight = scorer_weight(player, config, roll);
        // strict `>` keeps the earliest player on ties
        if best.map_or(true, |(_, w)| weight > w) {
            best = Some((player, weight));
        }
    }

    match best {
        Some((player, _)) => player,
        None => unreachable!("roster checked non-empty"),
    }
}
