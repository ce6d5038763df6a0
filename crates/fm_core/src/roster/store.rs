//! File-backed roster store.
//!
//! Loads leagues, clubs, countries and players from one JSON or YAML document,
//! checks that every id is unique and every reference resolves, and answers
//! the lookups the match engine's callers need: entities by id, players by
//! club or country, clubs by league, and ready-to-play `Team` aggregates.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::error::RosterError;
use crate::models::{ClubId, CountryId, LeagueId, Player, PlayerId, Team, TeamId};

/// Added to a country id to form its national team's id, keeping national
/// and club team ids apart.
pub const NATIONAL_TEAM_ID_OFFSET: u32 = 1 << 24;

/// Club ids share the team id space below the national offset.
pub const MAX_CLUB_ID: u32 = NATIONAL_TEAM_ID_OFFSET - 1;

/// Largest country id whose national team id still fits in a `u32`.
pub const MAX_COUNTRY_ID: u32 = u32::MAX - NATIONAL_TEAM_ID_OFFSET;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub league_id: LeagueId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
}

/// On-disk layout of a roster file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterDocument {
    #[serde(default)]
    pub leagues: Vec<League>,
    #[serde(default)]
    pub clubs: Vec<Club>,
    #[serde(default)]
    pub countries: Vec<Country>,
    #[serde(default)]
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, Default)]
pub struct RosterStore {
    leagues: BTreeMap<LeagueId, League>,
    clubs: BTreeMap<ClubId, Club>,
    countries: BTreeMap<CountryId, Country>,
    players: BTreeMap<PlayerId, Player>,
}

impl RosterStore {
    pub fn from_document(doc: RosterDocument) -> Result<Self, RosterError> {
        let mut store = RosterStore::default();

        let mut league_names = HashSet::new();
        for league in doc.leagues {
            if !league_names.insert(league.name.clone()) {
                return Err(RosterError::DuplicateName { kind: "league", name: league.name });
            }
            let id = league.id;
            if store.leagues.insert(id, league).is_some() {
                return Err(RosterError::DuplicateId { kind: "league", id: id.0 });
            }
        }

        let mut country_names = HashSet::new();
        for country in doc.countries {
            if country.id.0 > MAX_COUNTRY_ID {
                return Err(RosterError::IdOutOfRange {
                    kind: "country",
                    id: country.id.0,
                    max: MAX_COUNTRY_ID,
                });
            }
            if !country_names.insert(country.name.clone()) {
                return Err(RosterError::DuplicateName { kind: "country", name: country.name });
            }
            let id = country.id;
            if store.countries.insert(id, country).is_some() {
                return Err(RosterError::DuplicateId { kind: "country", id: id.0 });
            }
        }

        for club in doc.clubs {
            if club.id.0 > MAX_CLUB_ID {
                return Err(RosterError::IdOutOfRange {
                    kind: "club",
                    id: club.id.0,
                    max: MAX_CLUB_ID,
                });
            }
            if !store.leagues.contains_key(&club.league_id) {
                return Err(RosterError::MissingReference {
                    owner: format!("club {}", club.id),
                    kind: "league",
                    id: club.league_id.0,
                });
            }
            let id = club.id;
            if store.clubs.insert(id, club).is_some() {
                return Err(RosterError::DuplicateId { kind: "club", id: id.0 });
            }
        }

        for player in doc.players {
            player.validate()?;
            store.check_player_references(&player)?;
            let id = player.id;
            if store.players.insert(id, player).is_some() {
                return Err(RosterError::DuplicateId { kind: "player", id: id.0 });
            }
        }

        info!(
            leagues = store.leagues.len(),
            clubs = store.clubs.len(),
            countries = store.countries.len(),
            players = store.players.len(),
            "roster loaded"
        );
        Ok(store)
    }

    fn check_player_references(&self, player: &Player) -> Result<(), RosterError> {
        let owner = || format!("player {}", player.id);

        match player.country_id {
            Some(country) if self.countries.contains_key(&country) => {}
            Some(country) => {
                return Err(RosterError::MissingReference {
                    owner: owner(),
                    kind: "country",
                    id: country.0,
                })
            }
            None => {
                return Err(RosterError::MissingReference { owner: owner(), kind: "country", id: 0 })
            }
        }

        if let Some(club) = player.club_id {
            if !self.clubs.contains_key(&club) {
                return Err(RosterError::MissingReference { owner: owner(), kind: "club", id: club.0 });
            }
        }

        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, RosterError> {
        Self::from_document(serde_json::from_str(json)?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, RosterError> {
        Self::from_document(serde_yaml::from_str(yaml)?)
    }

    /// Load a roster file, picking the parser from the extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let content = match extension.as_deref() {
            Some("json" | "yaml" | "yml") => fs::read_to_string(path)?,
            _ => return Err(RosterError::UnknownFormat { path: path.display().to_string() }),
        };
        debug!(path = %path.display(), bytes = content.len(), "reading roster file");

        if extension.as_deref() == Some("json") {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    pub fn league(&self, id: LeagueId) -> Result<&League, RosterError> {
        self.leagues.get(&id).ok_or(RosterError::NotFound { kind: "league", id: id.0 })
    }

    pub fn club(&self, id: ClubId) -> Result<&Club, RosterError> {
        self.clubs.get(&id).ok_or(RosterError::NotFound { kind: "club", id: id.0 })
    }

    pub fn country(&self, id: CountryId) -> Result<&Country, RosterError> {
        self.countries.get(&id).ok_or(RosterError::NotFound { kind: "country", id: id.0 })
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, RosterError> {
        self.players.get(&id).ok_or(RosterError::NotFound { kind: "player", id: id.0 })
    }

    pub fn leagues(&self) -> impl Iterator<Item = &League> {
        self.leagues.values()
    }

    pub fn clubs(&self) -> impl Iterator<Item = &Club> {
        self.clubs.values()
    }

    /// Countries ordered by name, Z to A.
    pub fn countries(&self) -> Vec<&Country> {
        let mut countries: Vec<&Country> = self.countries.values().collect();
        countries.sort_by(|a, b| b.name.cmp(&a.name));
        countries
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn clubs_in_league(&self, league: LeagueId) -> Result<Vec<&Club>, RosterError> {
        self.league(league)?;
        Ok(self.clubs.values().filter(|c| c.league_id == league).collect())
    }

    pub fn players_in_club(&self, club: ClubId) -> Result<Vec<&Player>, RosterError> {
        self.club(club)?;
        Ok(self.players.values().filter(|p| p.club_id == Some(club)).collect())
    }

    pub fn players_from_country(&self, country: CountryId) -> Result<Vec<&Player>, RosterError> {
        self.country(country)?;
        Ok(self.players.values().filter(|p| p.country_id == Some(country)).collect())
    }

    /// Best `limit` players of a country by skill rating; equal ratings keep id order.
    pub fn top_players_from_country(
        &self,
        country: CountryId,
        limit: usize,
    ) -> Result<Vec<&Player>, RosterError> {
        let mut players = self.players_from_country(country)?;
        players.sort_by(|a, b| b.skill_rating.cmp(&a.skill_rating));
        players.truncate(limit);
        Ok(players)
    }

    /// Whole club squad as a match-ready team.
    pub fn club_team(&self, club: ClubId) -> Result<Team, RosterError> {
        let name = self.club(club)?.name.clone();
        let players = self.players_in_club(club)?.into_iter().cloned().collect();
        Ok(Team::new(TeamId(club.0), name, players)?)
    }

    /// National team made of a country's `size` best players.
    pub fn national_team(&self, country: CountryId, size: usize) -> Result<Team, RosterError> {
        let name = self.country(country)?.name.clone();
        let id = NATIONAL_TEAM_ID_OFFSET.checked_add(country.0).ok_or(RosterError::IdOutOfRange {
            kind: "country",
            id: country.0,
            max: MAX_COUNTRY_ID,
        })?;
        let players = self
            .top_players_from_country(country, size)?
            .into_iter()
            .cloned()
            .collect();
        Ok(Team::new(TeamId(id), name, players)?)
    }
}
