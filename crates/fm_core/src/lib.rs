//! # fm_core - Seeded Football Match Simulation
//!
//! Core library behind the `fm` roster browser.
//!
//! ## Features
//! - Segment-based match simulation with injected, seedable randomness
//!   (same seed = same result)
//! - Weighted goal-scorer attribution
//! - Parallel series and fixture runs
//! - File-backed roster store (JSON/YAML) of leagues, clubs, countries and players
//! - JSON API for embedding
//!
//! ```rust
//! use fm_core::models::{Player, PlayerId, Position, Team, TeamId};
//! use fm_core::simulate_match;
//!
//! let home = Team::new(
//!     TeamId(1),
//!     "Hosts",
//!     vec![Player::new(PlayerId(1), "Nine", Position::Forward, 80).unwrap()],
//! )
//! .unwrap();
//! let away = Team::new(
//!     TeamId(2),
//!     "Guests",
//!     vec![Player::new(PlayerId(2), "Ten", Position::Midfielder, 75).unwrap()],
//! )
//! .unwrap();
//!
//! let result = simulate_match(&home, &away, 42);
//! assert_eq!(result.score(home.id()).unwrap() as usize, result.goal_log(home.id()).unwrap().len());
//! ```

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod roster;

pub use api::{simulate_match_json, MatchRequest, MatchResponse};
pub use engine::{
    simulate_fixtures, simulate_match, simulate_series, MatchSimulator, SeriesSummary,
    SimulationConfig,
};
pub use error::{ApiError, ConfigError, ModelError, Result};
pub use models::{GoalEvent, MatchResult, Player, PlayerId, Position, Team, TeamId};
pub use roster::{RosterError, RosterStore};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
