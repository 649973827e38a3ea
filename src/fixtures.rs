/// Mock fixture data for testing and development
///
/// This module provides consistent, deterministic fixture data that can be used for:
/// 1. Unit tests - ensuring tests have predictable data
/// 2. Development mock mode - running the app with fake data for screenshots and debugging
/// 3. Benchmarks - providing consistent data for sorting and grouping
use crate::models::{
    Game, GameClock, GameDay, GameDetailsResponse, GameState, GameStoryResponse, GameSummary,
    LocalizedName, PeriodDescriptor, PlayerDetailsResponse, PlayerGameStats, ScheduleResponse,
    TeamGameStat, TeamInfo, TeamStats, TeamStatsResponse,
};
use serde_json::json;

/// Teams used by the fixtures: (id, abbrev, place, common name)
const FIXTURE_TEAMS: [(i64, &str, &str, &str); 8] = [
    (6, "BOS", "Boston", "Bruins"),
    (8, "MTL", "Montréal", "Canadiens"),
    (10, "TOR", "Toronto", "Maple Leafs"),
    (9, "OTT", "Ottawa", "Senators"),
    (3, "NYR", "New York", "Rangers"),
    (1, "NJD", "New Jersey", "Devils"),
    (54, "VGK", "Vegas", "Golden Knights"),
    (26, "LAK", "Los Angeles", "Kings"),
];

fn fixture_team(abbrev: &str) -> TeamInfo {
    let (id, abbrev, place, common) = FIXTURE_TEAMS
        .iter()
        .copied()
        .find(|(_, a, _, _)| *a == abbrev)
        .unwrap_or((0, abbrev, "", abbrev));

    TeamInfo {
        id,
        abbrev: abbrev.to_string(),
        place_name: LocalizedName::new(place),
        common_name: LocalizedName::new(common),
        logo: format!("https://assets.nhle.com/logos/nhl/svg/{}_light.svg", abbrev),
        dark_logo: format!("https://assets.nhle.com/logos/nhl/svg/{}_dark.svg", abbrev),
        ..Default::default()
    }
}

/// Create a game between two fixture teams
pub fn create_mock_game(
    id: i64,
    away_abbrev: &str,
    home_abbrev: &str,
    state: GameState,
    start_time_utc: &str,
) -> Game {
    let started = !state.is_scheduled();
    let mut away_team = fixture_team(away_abbrev);
    let mut home_team = fixture_team(home_abbrev);
    if started {
        away_team.score = Some(2);
        home_team.score = Some(3);
    }

    Game {
        id,
        season: 20242025,
        game_type: 2,
        start_time_utc: start_time_utc.to_string(),
        eastern_utc_offset: "-04:00".to_string(),
        venue_utc_offset: "-04:00".to_string(),
        venue_timezone: "America/New_York".to_string(),
        game_state: state,
        game_schedule_state: "OK".to_string(),
        away_team,
        home_team,
        period_descriptor: started.then(|| PeriodDescriptor {
            number: 2,
            period_type: "REG".to_string(),
            max_regulation_periods: 3,
        }),
        ..Default::default()
    }
}

/// Create a mock week with games in various states over two days
pub fn create_mock_schedule() -> ScheduleResponse {
    let first_day = vec![
        create_mock_game(2024020001, "BOS", "MTL", GameState::Future, "2025-04-23T23:00:00Z"),
        create_mock_game(2024020002, "TOR", "OTT", GameState::Live, "2025-04-23T23:30:00Z"),
        create_mock_game(2024020003, "NYR", "NJD", GameState::Final, "2025-04-23T19:00:00Z"),
    ];
    let second_day = vec![
        create_mock_game(2024020004, "VGK", "LAK", GameState::Official, "2025-04-24T02:00:00Z"),
        create_mock_game(2024020005, "MTL", "TOR", GameState::Critical, "2025-04-24T23:00:00Z"),
    ];

    ScheduleResponse {
        previous_start_date: "2025-04-16".to_string(),
        next_start_date: "2025-04-30".to_string(),
        game_week: vec![
            GameDay {
                date: "2025-04-23".to_string(),
                day_abbrev: "WED".to_string(),
                number_of_games: first_day.len() as u32,
                games: first_day,
                ..Default::default()
            },
            GameDay {
                date: "2025-04-24".to_string(),
                day_abbrev: "THU".to_string(),
                number_of_games: second_day.len() as u32,
                games: second_day,
                ..Default::default()
            },
        ],
    }
}

/// Create live details for a game
pub fn create_mock_game_details(game_id: i64) -> GameDetailsResponse {
    GameDetailsResponse {
        id: game_id,
        game_state: GameState::Live,
        display_period: 2,
        clock: GameClock {
            time_remaining: "12:34".to_string(),
            seconds_remaining: 754,
            running: true,
            in_intermission: false,
        },
    }
}

/// Create team summaries for every fixture team
pub fn create_mock_team_stats() -> TeamStatsResponse {
    let data = FIXTURE_TEAMS
        .iter()
        .enumerate()
        .map(|(i, (id, _, place, common))| {
            let wins = 50 - (i as i32) * 3;
            let losses = 20 + (i as i32) * 2;
            let ot_losses = 12 - i as i32;
            TeamStats {
                team_id: *id,
                team_full_name: format!("{} {}", place, common),
                games_played: wins + losses + ot_losses,
                wins,
                losses,
                ot_losses,
                points: wins * 2 + ot_losses,
                goals_for: 260 - (i as i32) * 5,
                goals_against: 210 + (i as i32) * 4,
                goals_for_per_game: 3.2 - (i as f64) * 0.1,
                goals_against_per_game: 2.6 + (i as f64) * 0.05,
                shots_for_per_game: 31.0,
                shots_against_per_game: 29.5,
            }
        })
        .collect();

    TeamStatsResponse { data }
}

/// Create a player landing with five recent games spread over three weeks
pub fn create_mock_player_details(player_id: i64) -> PlayerDetailsResponse {
    let games = [
        ("2025-04-19", 1, 1),
        ("2025-04-17", 0, 2),
        ("2025-04-13", 2, 0),
        ("2025-04-11", 0, 1),
        ("2025-04-05", 1, 1),
    ];

    PlayerDetailsResponse {
        player_id,
        first_name: LocalizedName::new("Lane"),
        last_name: LocalizedName::new("Hutson"),
        position: "D".to_string(),
        sweater_number: 48,
        headshot: format!("https://assets.nhle.com/mugs/nhl/20242025/MTL/{}.png", player_id),
        last5_games: games
            .iter()
            .map(|(date, goals, assists)| PlayerGameStats {
                game_date: date.to_string(),
                goals: *goals,
                assists: *assists,
                points: goals + assists,
            })
            .collect(),
    }
}

/// Create a game story with the usual comparison categories
pub fn create_mock_game_story() -> GameStoryResponse {
    let stats = vec![
        ("sog", json!(28), json!(31)),
        ("faceoffWinningPctg", json!(0.48), json!(0.52)),
        ("powerPlay", json!("1/3"), json!("0/2")),
        ("pim", json!(6), json!(8)),
        ("hits", json!(22), json!(17)),
        ("blockedShots", json!(14), json!(11)),
        ("giveaways", json!(7), json!(9)),
        ("takeaways", json!(5), json!(6)),
    ];

    GameStoryResponse {
        summary: Some(GameSummary {
            team_game_stats: stats
                .into_iter()
                .map(|(category, away_value, home_value)| TeamGameStat {
                    category: category.to_string(),
                    away_value,
                    home_value,
                })
                .collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_schedule_shape() {
        let schedule = create_mock_schedule();
        assert_eq!(schedule.game_week.len(), 2);
        assert_eq!(schedule.game_count(), 5);
        for day in &schedule.game_week {
            assert_eq!(day.number_of_games as usize, day.games.len());
        }
    }

    #[test]
    fn test_scheduled_games_have_no_score() {
        let game = create_mock_game(1, "BOS", "MTL", GameState::Future, "2025-04-23T23:00:00Z");
        assert_eq!(game.home_team.score, None);
        assert!(game.period_descriptor.is_none());
        assert_eq!(game.home_team.full_name(), "Montréal Canadiens");
    }

    #[test]
    fn test_mock_team_stats_ids_match_teams() {
        let stats = create_mock_team_stats();
        assert_eq!(stats.data.len(), FIXTURE_TEAMS.len());
        let bos = stats.data.iter().find(|s| s.team_id == 6).unwrap();
        assert_eq!(bos.team_full_name, "Boston Bruins");
        assert_eq!(bos.points, bos.wins * 2 + bos.ot_losses);
    }
}
