//! Text rendering of roster listings and match outcomes.

use chrono::NaiveDate;
use fm_core::models::Player;
use fm_core::roster::{Club, Country};
use fm_core::{MatchResult, SeriesSummary, Team};

pub fn player_line(player: &Player, today: NaiveDate) -> String {
    let age = player
        .age_on(today)
        .map(|a| a.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:>6}  {:<24} {:<2}  {:>2}  age {}",
        player.id,
        player.name,
        player.position.code(),
        player.skill_rating,
        age
    )
}

/// Full card for one player: the summary line, then one field per line.
pub fn player_detail(
    player: &Player,
    club: Option<&Club>,
    country: Option<&Country>,
    today: NaiveDate,
) -> Vec<String> {
    let or_dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());

    vec![
        player.to_string(),
        format!("  id        {}", player.id),
        format!("  position  {}", player.position.label()),
        format!("  skill     {}", player.skill_rating),
        format!("  height    {}", or_dash(player.height_cm.map(|h| format!("{} cm", h)))),
        format!("  weight    {}", or_dash(player.weight_kg.map(|w| format!("{:.1} kg", w)))),
        format!(
            "  born      {}",
            or_dash(player.birthday.map(|b| b.format("%Y-%m-%d").to_string()))
        ),
        format!("  age       {}", or_dash(player.age_on(today).map(|a| a.to_string()))),
        format!("  club      {}", club.map(|c| c.name.as_str()).unwrap_or("free agent")),
        format!("  country   {}", or_dash(country.map(|c| c.name.clone()))),
    ]
}

pub fn club_line(club: &Club) -> String {
    format!("{:>6}  {}", club.id, club.name)
}

pub fn country_line(country: &Country) -> String {
    format!("{:>6}  {}", country.id, country.name)
}

pub fn team_header(team: &Team) -> String {
    format!(
        "{} ({} players, power {:.0})",
        team.name(),
        team.roster().len(),
        team.power()
    )
}

pub fn match_report(result: &MatchResult) -> Vec<String> {
    let mut lines = vec![result.to_string()];
    lines.extend(result.summary_lines().into_iter().map(|l| format!("  {}", l)));
    lines
}

pub fn series_report(summary: &SeriesSummary, home: &Team, away: &Team) -> Vec<String> {
    let pct = |n: u32| {
        if summary.runs == 0 {
            0.0
        } else {
            n as f64 * 100.0 / summary.runs as f64
        }
    };

    let mut lines = vec![
        format!("{} vs {} over {} matches", home.name(), away.name(), summary.runs),
        format!(
            "  {} wins {:.1}% | draws {:.1}% | {} wins {:.1}%",
            home.name(),
            pct(summary.home_wins),
            pct(summary.draws),
            away.name(),
            pct(summary.away_wins)
        ),
        format!(
            "  mean goals {:.2} - {:.2}",
            summary.mean_home_goals(),
            summary.mean_away_goals()
        ),
    ];

    for (team, scorers) in [(home, &summary.home_scorers), (away, &summary.away_scorers)] {
        if let Some(top) = scorers.first() {
            lines.push(format!("  top scorer {}: {} ({} goals)", team.name(), top.name, top.goals));
        }
    }
    lines
}
