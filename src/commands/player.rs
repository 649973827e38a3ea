use crate::cache;
use crate::config::Config;
use crate::data_provider::NHLDataProvider;
use crate::formatting::format_header;
use crate::models::PlayerDetailsResponse;
use crate::player_week::{star_week_window, sweater_line, weekly_stats, WeekWindow};
use anyhow::{Context, Result};
use chrono::Local;

/// Star of the week card: name, sweater, window and totals
pub fn format_player_week(player: &PlayerDetailsResponse, window: WeekWindow) -> String {
    let stats = weekly_stats(player, window);

    let mut output = String::new();
    output.push_str(&format_header("Star of the Week", true));
    output.push_str(&format!("{}\n", player.full_name()));
    output.push_str(&format!("{}\n", sweater_line(player)));
    output.push_str(&format!("{}\n\n", window.label()));
    output.push_str(&format!("{:>3} {:>3} {:>3} {:>4}\n", "GP", "G", "A", "PTS"));
    output.push_str(&format!(
        "{:>3} {:>3} {:>3} {:>4}\n",
        stats.games, stats.goals, stats.assists, stats.points
    ));
    output
}

pub async fn run(client: &dyn NHLDataProvider, config: &Config, player_id: Option<i64>) -> Result<()> {
    let player_id = player_id.unwrap_or(config.featured_player_id);
    let player = cache::fetch_player_details_cached(client, player_id)
        .await
        .with_context(|| format!("Failed to fetch player {}", player_id))?;

    let window = star_week_window(Local::now().date_naive());
    print!("{}", format_player_week(&player, window));
    Ok(())
}
