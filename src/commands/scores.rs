use crate::cache;
use crate::commands::parse_date;
use crate::config::Config;
use crate::data_provider::NHLDataProvider;
use crate::favorites::FavoriteTeam;
use crate::formatting::{
    eastern_today, format_header, list_clock_text, list_status_label, score_text, team_record,
};
use crate::live::fetch_live_details;
use crate::models::{Game, GameDetailsResponse, ScheduleResponse, TeamInfo, TeamStats};
use crate::sorting::group_and_sort_games;
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use tracing::warn;

/// Width of the team name column
const TEAM_NAME_COL_WIDTH: usize = 32;

/// Width of the record column
const RECORD_COL_WIDTH: usize = 12;

/// Width of the score column
const SCORE_COL_WIDTH: usize = 3;

/// Everything the scores report renders
pub struct ScoresReport<'a> {
    pub schedule: &'a ScheduleResponse,
    pub details: &'a HashMap<i64, GameDetailsResponse>,
    pub team_stats: &'a HashMap<i64, TeamStats>,
    pub favorites: &'a [FavoriteTeam],
    pub today: NaiveDate,
}

fn format_team_line(report: &ScoresReport, team: &TeamInfo) -> String {
    let mut name = team.full_name();
    if report
        .favorites
        .iter()
        .any(|f| f.team_name == team.common_name.default)
    {
        name.push_str(" *");
    }
    format!(
        "  {:<name_width$} {:<record_width$} {:>score_width$}\n",
        name,
        team_record(report.team_stats.get(&team.id)),
        score_text(team),
        name_width = TEAM_NAME_COL_WIDTH,
        record_width = RECORD_COL_WIDTH,
        score_width = SCORE_COL_WIDTH
    )
}

fn format_game(report: &ScoresReport, game: &Game) -> String {
    let mut output = String::new();
    let clock = list_clock_text(game, report.details.get(&game.id), report.today);
    let status = list_status_label(&game.game_state);
    if clock.trim().is_empty() {
        output.push_str(&format!("{}\n", status));
    } else {
        output.push_str(&format!("{}  {}\n", status, clock));
    }
    output.push_str(&format_team_line(report, &game.away_team));
    output.push_str(&format_team_line(report, &game.home_team));
    output
}

/// Games grouped by date and ordered live first
pub fn format_scores(report: &ScoresReport) -> String {
    let games: Vec<Game> = report.schedule.all_games().into_iter().cloned().collect();
    if games.is_empty() {
        return "No games scheduled.\n".to_string();
    }

    let mut output = String::new();
    for (date, day_games) in group_and_sort_games(&games) {
        output.push_str(&format_header(&date, true));
        for game in &day_games {
            output.push_str(&format_game(report, game));
            output.push('\n');
        }
    }
    output
}

fn format_navigation(schedule: &ScheduleResponse) -> String {
    let mut output = String::new();
    if !schedule.previous_start_date.is_empty() {
        output.push_str(&format!("Previous week: {}\n", schedule.previous_start_date));
    }
    if !schedule.next_start_date.is_empty() {
        output.push_str(&format!("Next week: {}\n", schedule.next_start_date));
    }
    output
}

/// Season whose records go next to the games: the one the requested week falls in
fn report_season(config: &Config, requested: Option<NaiveDate>, today: NaiveDate) -> i64 {
    config.season_for(requested.unwrap_or(today))
}

pub async fn run(client: &dyn NHLDataProvider, config: &Config, date: Option<String>) -> Result<()> {
    let requested = parse_date(date)?;
    let schedule = match requested {
        Some(day) => client.schedule_for(day).await,
        None => client.today_schedule().await,
    }
    .context("Failed to fetch schedule")?;

    let details = fetch_live_details(client, &schedule).await;

    let season = report_season(config, requested, Utc::now().date_naive());
    let team_stats: HashMap<i64, TeamStats> = match cache::fetch_team_stats_cached(client, season).await {
        Ok(response) => response.data.into_iter().map(|s| (s.team_id, s)).collect(),
        Err(e) => {
            warn!("Team stats unavailable: {}", e);
            HashMap::new()
        }
    };

    let favorites = match super::open_store(config) {
        Ok(store) => store.all_favorites().await.unwrap_or_else(|e| {
            warn!("Failed to read favorites: {}", e);
            Vec::new()
        }),
        Err(e) => {
            warn!("{:#}", e);
            Vec::new()
        }
    };

    let today = schedule
        .all_games()
        .first()
        .map(|game| eastern_today(game))
        .unwrap_or_else(|| Utc::now().date_naive());

    let report = ScoresReport {
        schedule: &schedule,
        details: &details,
        team_stats: &team_stats,
        favorites: &favorites,
        today,
    };
    print!("{}", format_scores(&report));
    print!("{}", format_navigation(&schedule));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{create_mock_game_details, create_mock_schedule, create_mock_team_stats};

    fn stats_by_team() -> HashMap<i64, TeamStats> {
        create_mock_team_stats()
            .data
            .into_iter()
            .map(|s| (s.team_id, s))
            .collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 23).unwrap()
    }

    #[test]
    fn test_groups_in_date_order_with_live_first() {
        let schedule = create_mock_schedule();
        let details = HashMap::new();
        let stats = HashMap::new();
        let report = ScoresReport {
            schedule: &schedule,
            details: &details,
            team_stats: &stats,
            favorites: &[],
            today: today(),
        };

        let output = format_scores(&report);
        let first_day = output.find("2025-04-23").unwrap();
        let second_day = output.find("2025-04-24").unwrap();
        assert!(first_day < second_day);

        // Within the first day: LIVE Leafs game, then the upcoming one, then the final
        let live = output.find("Toronto Maple Leafs").unwrap();
        let upcoming = output.find("Boston Bruins").unwrap();
        let fin = output.find("New York Rangers").unwrap();
        assert!(live < upcoming && upcoming < fin);
    }

    #[test]
    fn test_game_lines() {
        let schedule = create_mock_schedule();
        let mut details = HashMap::new();
        details.insert(2024020002, create_mock_game_details(2024020002));
        let stats = stats_by_team();
        let favorites = vec![FavoriteTeam {
            id: 1,
            team_name: "Senators".to_string(),
        }];
        let report = ScoresReport {
            schedule: &schedule,
            details: &details,
            team_stats: &stats,
            favorites: &favorites,
            today: today(),
        };

        let output = format_scores(&report);
        assert!(output.contains("LIVE  2nd Period - 12:34\n"));
        assert!(output.contains("Upcoming  Today at 7:00 PM\n"));
        assert!(output.contains("Final\n"));
        assert!(output.contains("Official Score\n"));
        // CRIT without details
        assert!(output.contains("LIVE  In OT\n"));

        let senators = output
            .lines()
            .find(|line| line.contains("Ottawa Senators"))
            .unwrap();
        assert!(senators.contains("Ottawa Senators *"));
        assert!(senators.contains("(41-26-9)"));
        assert!(senators.trim_end().ends_with('3'));
    }

    #[test]
    fn test_missing_records_and_scores() {
        let schedule = create_mock_schedule();
        let details = HashMap::new();
        let stats = HashMap::new();
        let report = ScoresReport {
            schedule: &schedule,
            details: &details,
            team_stats: &stats,
            favorites: &[],
            today: today(),
        };

        let output = format_scores(&report);
        let bruins = output
            .lines()
            .find(|line| line.contains("Boston Bruins"))
            .unwrap();
        assert!(bruins.contains("Loading record..."));
        assert!(bruins.trim_end().ends_with('-'));
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = ScheduleResponse::default();
        let details = HashMap::new();
        let stats = HashMap::new();
        let report = ScoresReport {
            schedule: &schedule,
            details: &details,
            team_stats: &stats,
            favorites: &[],
            today: today(),
        };
        assert_eq!(format_scores(&report), "No games scheduled.\n");
    }

    #[test]
    fn test_navigation() {
        let output = format_navigation(&create_mock_schedule());
        assert_eq!(output, "Previous week: 2025-04-16\nNext week: 2025-04-30\n");
        assert_eq!(format_navigation(&ScheduleResponse::default()), "");
    }

    #[test]
    fn test_records_follow_requested_week() {
        let config = Config::default();
        let requested = NaiveDate::from_ymd_opt(2024, 1, 10);
        assert_eq!(report_season(&config, requested, today()), 20232024);
        assert_eq!(report_season(&config, None, today()), 20242025);

        let pinned = Config {
            season: Some(20212022),
            ..Config::default()
        };
        assert_eq!(report_season(&pinned, requested, today()), 20212022);
    }
}
