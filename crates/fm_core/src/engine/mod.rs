pub mod config;
pub mod scorer;
pub mod series;
pub mod simulator;

pub use config::{PositionBonus, SimulationConfig};
pub use scorer::{scorer_weight, select_scorer};
pub use series::{simulate_fixtures, simulate_series, ScorerTally, SeriesSummary};
pub use simulator::{seeded_rng, simulate_match, MatchSimulator};
