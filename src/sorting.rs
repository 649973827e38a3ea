use crate::models::{Game, GameState};
use std::collections::BTreeMap;

// Status Priority Constants
/// Games being played right now
const PRIORITY_LIVE: u8 = 0;

/// Warmups, puck drop imminent
const PRIORITY_PREGAME: u8 = 1;

/// Scheduled later
const PRIORITY_FUTURE: u8 = 2;

/// Finished games
const PRIORITY_COMPLETE: u8 = 3;

/// Postponed, suspended or anything unrecognized
const PRIORITY_UNKNOWN: u8 = 4;

/// Display priority of a game state, lower sorts first
pub fn status_priority(state: &GameState) -> u8 {
    match state {
        GameState::Live | GameState::Critical => PRIORITY_LIVE,
        GameState::PreGame => PRIORITY_PREGAME,
        GameState::Future => PRIORITY_FUTURE,
        GameState::Final | GameState::Official => PRIORITY_COMPLETE,
        GameState::Other(_) => PRIORITY_UNKNOWN,
    }
}

/// Order games live first, then pregame, upcoming, finished, unknown.
///
/// The sort is stable: games with the same priority keep their API order.
pub fn sort_games_by_status(games: &[Game]) -> Vec<Game> {
    let mut sorted = games.to_vec();
    sorted.sort_by_key(|game| status_priority(&game.game_state));
    sorted
}

/// Date key of a game: the part of `startTimeUTC` before the `T`
pub fn game_date_key(game: &Game) -> &str {
    game.start_time_utc
        .split('T')
        .next()
        .unwrap_or_default()
}

/// Group games by UTC start date, each group ordered by status.
///
/// Keys iterate in ascending date order.
pub fn group_and_sort_games(games: &[Game]) -> BTreeMap<String, Vec<Game>> {
    let mut groups: BTreeMap<String, Vec<Game>> = BTreeMap::new();
    for game in games {
        groups
            .entry(game_date_key(game).to_string())
            .or_default()
            .push(game.clone());
    }

    groups
        .into_iter()
        .map(|(date, day_games)| (date, sort_games_by_status(&day_games)))
        .collect()
}
