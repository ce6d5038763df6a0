//! Roster provider: supplies fully built `Team` aggregates to the engine.

mod error;
mod store;

pub use error::RosterError;
pub use store::{
    Club, Country, League, RosterDocument, RosterStore, MAX_CLUB_ID, MAX_COUNTRY_ID,
    NATIONAL_TEAM_ID_OFFSET,
};
