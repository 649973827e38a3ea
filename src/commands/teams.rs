use crate::cache;
use crate::config::Config;
use crate::data_provider::NHLDataProvider;
use crate::formatting::format_header;
use crate::models::TeamStats;
use anyhow::{Context, Result};
use chrono::Utc;

// Layout Constants
/// Width of team name column
const TEAM_NAME_COL_WIDTH: usize = 26;

/// Width of the small counting columns (GP, W, L, OT)
const COUNT_COL_WIDTH: usize = 3;

/// Width of points column
const PTS_COL_WIDTH: usize = 4;

/// Width of goals for/against columns
const GOALS_COL_WIDTH: usize = 4;

/// Width of per-game columns
const PER_GAME_COL_WIDTH: usize = 6;

/// Teams ordered by points, best first
pub fn sort_by_points(stats: &[TeamStats]) -> Vec<TeamStats> {
    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| b.points.cmp(&a.points));
    sorted
}

pub fn format_team_stats_table(stats: &[TeamStats], season: i64) -> String {
    let mut output = String::new();
    output.push_str(&format_header(&format!("Team Stats {}", season), true));

    if stats.is_empty() {
        output.push_str("No team stats available.\n");
        return output;
    }

    output.push_str(&format!(
        "{:<team_width$} {:>c$} {:>c$} {:>c$} {:>c$} {:>pts_width$} {:>g$} {:>g$} {:>pg$} {:>pg$}\n",
        "Team",
        "GP",
        "W",
        "L",
        "OT",
        "PTS",
        "GF",
        "GA",
        "GF/GP",
        "GA/GP",
        team_width = TEAM_NAME_COL_WIDTH,
        c = COUNT_COL_WIDTH,
        pts_width = PTS_COL_WIDTH,
        g = GOALS_COL_WIDTH,
        pg = PER_GAME_COL_WIDTH
    ));

    for team in sort_by_points(stats) {
        output.push_str(&format!(
            "{:<team_width$} {:>c$} {:>c$} {:>c$} {:>c$} {:>pts_width$} {:>g$} {:>g$} {:>pg$.2} {:>pg$.2}\n",
            team.team_full_name,
            team.games_played,
            team.wins,
            team.losses,
            team.ot_losses,
            team.points,
            team.goals_for,
            team.goals_against,
            team.goals_for_per_game,
            team.goals_against_per_game,
            team_width = TEAM_NAME_COL_WIDTH,
            c = COUNT_COL_WIDTH,
            pts_width = PTS_COL_WIDTH,
            g = GOALS_COL_WIDTH,
            pg = PER_GAME_COL_WIDTH
        ));
    }
    output
}

pub async fn run(client: &dyn NHLDataProvider, config: &Config, season: Option<i64>) -> Result<()> {
    let season = season.unwrap_or_else(|| config.season_for(Utc::now().date_naive()));
    let response = cache::fetch_team_stats_cached(client, season)
        .await
        .with_context(|| format!("Failed to fetch team stats for season {}", season))?;

    print!("{}", format_team_stats_table(&response.data, season));
    Ok(())
}
