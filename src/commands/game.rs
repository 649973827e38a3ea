use crate::cache;
use crate::commands::parse_date;
use crate::data_provider::NHLDataProvider;
use crate::formatting::{
    detail_clock_text, detail_status_label, eastern_today, format_header, score_text,
    stat_category_label, stat_value_text,
};
use crate::models::{Game, GameDetailsResponse, GameStoryResponse};
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use tracing::warn;

/// Width of the stat label column
const STAT_LABEL_COL_WIDTH: usize = 18;

/// Width of each team's stat column
const STAT_VALUE_COL_WIDTH: usize = 8;

/// Shown in place of the stats table when the game story has no summary
pub const NO_GAME_STATS: &str = "No Game Stats Available\nGame Has Not Started";

/// Comparison table of the game story categories we know how to label
pub fn format_game_stats(game: &Game, story: Option<&GameStoryResponse>) -> String {
    let Some(summary) = story.and_then(|s| s.summary.as_ref()) else {
        return format!("{}\n", NO_GAME_STATS);
    };

    let mut output = String::new();
    output.push_str(&format!(
        "{:<label_width$} {:>value_width$} {:>value_width$}\n",
        "",
        game.away_team.abbrev,
        game.home_team.abbrev,
        label_width = STAT_LABEL_COL_WIDTH,
        value_width = STAT_VALUE_COL_WIDTH
    ));
    for stat in &summary.team_game_stats {
        let label = stat_category_label(&stat.category);
        if label.is_empty() {
            continue;
        }
        output.push_str(&format!(
            "{:<label_width$} {:>value_width$} {:>value_width$}\n",
            label,
            stat_value_text(&stat.category, &stat.away_value),
            stat_value_text(&stat.category, &stat.home_value),
            label_width = STAT_LABEL_COL_WIDTH,
            value_width = STAT_VALUE_COL_WIDTH
        ));
    }
    output
}

/// Header, clock, scoreboard and stats for one game
pub fn format_game(
    game: &Game,
    details: Option<&GameDetailsResponse>,
    story: Option<&GameStoryResponse>,
    today: NaiveDate,
) -> String {
    let mut output = String::new();
    let title = format!(
        "{} @ {}",
        game.away_team.full_name(),
        game.home_team.full_name()
    );
    output.push_str(&format_header(&title, true));
    output.push_str(&format!("{}\n", detail_status_label(&game.game_state)));
    output.push_str(&format!("{}\n\n", detail_clock_text(game, details, today)));

    output.push_str(&format!(
        "{:<4} {:>3}\n",
        game.away_team.abbrev,
        score_text(&game.away_team)
    ));
    output.push_str(&format!(
        "{:<4} {:>3}\n\n",
        game.home_team.abbrev,
        score_text(&game.home_team)
    ));

    output.push_str(&format_header("Game Stats", false));
    output.push_str(&format_game_stats(game, story));
    output
}

pub async fn run(client: &dyn NHLDataProvider, game_id: i64, date: Option<String>) -> Result<()> {
    let schedule = match parse_date(date)? {
        Some(day) => client.schedule_for(day).await,
        None => client.today_schedule().await,
    }
    .context("Failed to fetch schedule")?;

    let game = schedule
        .find_game(game_id)
        .cloned()
        .ok_or_else(|| anyhow!("Game {} is not in the schedule for that week", game_id))?;

    let details = if game.game_state.wants_live_details() {
        match client.game_details(game_id).await {
            Ok(details) => Some(details),
            Err(e) => {
                warn!("Live details unavailable for {}: {}", game_id, e);
                None
            }
        }
    } else {
        None
    };

    let story = if game.game_state.is_scheduled() {
        None
    } else {
        match cache::fetch_game_story_cached(client, game_id).await {
            Ok(story) => Some(story),
            Err(e) => {
                warn!("Game story unavailable for {}: {}", game_id, e);
                None
            }
        }
    };

    print!(
        "{}",
        format_game(&game, details.as_ref(), story.as_ref(), eastern_today(&game))
    );
    Ok(())
}
