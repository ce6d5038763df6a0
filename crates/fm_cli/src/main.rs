//! fm - roster browser and match simulator
//!
//! Reads a roster file (JSON or YAML), lists its clubs, countries and
//! players, and plays simulated matches between clubs or national teams.

mod render;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use fm_core::models::{ClubId, CountryId, LeagueId, PlayerId};
use fm_core::{simulate_series, MatchSimulator, RosterStore, SimulationConfig, Team};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const NATIONAL_SQUAD_SIZE: usize = 11;

#[derive(Parser)]
#[command(name = "fm")]
#[command(version, about = "Browse a football roster and simulate matches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List clubs, optionally only those of one league
    Teams {
        #[arg(long)]
        roster: PathBuf,

        #[arg(long)]
        league: Option<u32>,
    },

    /// List countries
    Countries {
        #[arg(long)]
        roster: PathBuf,
    },

    /// List the players of a club or a country
    #[command(group(ArgGroup::new("owner").required(true).args(["club", "country"])))]
    Players {
        #[arg(long)]
        roster: PathBuf,

        #[arg(long)]
        club: Option<u32>,

        #[arg(long)]
        country: Option<u32>,

        /// Only the N highest-rated players (country listings)
        #[arg(long, default_value = "100")]
        limit: usize,
    },

    /// Show everything known about one player
    Player {
        #[arg(long)]
        roster: PathBuf,

        #[arg(long)]
        id: u32,
    },

    /// Simulate one match
    Simulate {
        #[command(flatten)]
        fixture: FixtureArgs,

        /// Print the result as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Simulate the same fixture many times and summarise
    Series {
        #[command(flatten)]
        fixture: FixtureArgs,

        #[arg(long, default_value = "1000")]
        runs: u32,
    },

    /// Print the default simulation config as YAML
    Config,
}

#[derive(Args)]
struct FixtureArgs {
    #[arg(long)]
    roster: PathBuf,

    /// Home club id (country id with --national)
    #[arg(long)]
    home: u32,

    /// Away club id (country id with --national)
    #[arg(long)]
    away: u32,

    /// Pick national teams instead of clubs
    #[arg(long, default_value = "false")]
    national: bool,

    /// Random seed; a fresh one is chosen and printed when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// YAML simulation config
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Teams { roster, league } => {
            let store = load_roster(&roster)?;
            let clubs = match league {
                Some(id) => {
                    let league = store.league(LeagueId(id))?;
                    println!("{}", league.name);
                    store.clubs_in_league(league.id)?
                }
                None => store.clubs().collect(),
            };
            for club in clubs {
                println!("{}", render::club_line(club));
            }
        }

        Commands::Countries { roster } => {
            let store = load_roster(&roster)?;
            for country in store.countries() {
                println!("{}", render::country_line(country));
            }
        }

        Commands::Players { roster, club, country, limit } => {
            let store = load_roster(&roster)?;
            let players = match (club, country) {
                (Some(id), _) => store.players_in_club(ClubId(id))?,
                (None, Some(id)) => store.top_players_from_country(CountryId(id), limit)?,
                (None, None) => unreachable!("clap requires --club or --country"),
            };
            let today = chrono::Local::now().date_naive();
            for player in players {
                println!("{}", render::player_line(player, today));
            }
        }

        Commands::Player { roster, id } => {
            let store = load_roster(&roster)?;
            let player = store.player(PlayerId(id))?;
            let club = player.club_id.map(|c| store.club(c)).transpose()?;
            let country = player.country_id.map(|c| store.country(c)).transpose()?;
            let today = chrono::Local::now().date_naive();
            for line in render::player_detail(player, club, country, today) {
                println!("{}", line);
            }
        }

        Commands::Simulate { fixture, json } => {
            let (simulator, home, away, seed) = prepare_fixture(&fixture)?;
            let mut rng = fm_core::engine::seeded_rng(seed);
            let result = simulator.simulate(&home, &away, &mut rng);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", render::team_header(&home));
                println!("{}", render::team_header(&away));
                println!("seed {}", seed);
                println!();
                for line in render::match_report(&result) {
                    println!("{}", line);
                }
            }
        }

        Commands::Series { fixture, runs } => {
            let (simulator, home, away, seed) = prepare_fixture(&fixture)?;
            let summary = simulate_series(&simulator, &home, &away, runs, seed);
            println!("seed {}", seed);
            for line in render::series_report(&summary, &home, &away) {
                println!("{}", line);
            }
        }

        Commands::Config => {
            print!("{}", SimulationConfig::default().to_yaml_string()?);
        }
    }

    Ok(())
}

fn load_roster(path: &Path) -> Result<RosterStore> {
    RosterStore::from_file(path)
        .with_context(|| format!("Failed to load roster file: {}", path.display()))
}

fn prepare_fixture(args: &FixtureArgs) -> Result<(MatchSimulator, Team, Team, u64)> {
    let store = load_roster(&args.roster)?;

    let config = match &args.config {
        Some(path) => SimulationConfig::from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    let (home, away) = if args.national {
        (
            store.national_team(CountryId(args.home), NATIONAL_SQUAD_SIZE)?,
            store.national_team(CountryId(args.away), NATIONAL_SQUAD_SIZE)?,
        )
    } else {
        (store.club_team(ClubId(args.home))?, store.club_team(ClubId(args.away))?)
    };

    if home.id() == away.id() {
        anyhow::bail!("{} cannot play itself", home.name());
    }

    let simulator = MatchSimulator::try_new(config)?;
    let seed = args.seed.unwrap_or_else(fresh_seed);
    Ok((simulator, home, away, seed))
}

/// Seed derived from the wall clock, for runs without `--seed`.
fn fresh_seed() -> u64 {
    let now = chrono::Utc::now();
    now.timestamp_nanos_opt().unwrap_or_else(|| now.timestamp()) as u64
}
