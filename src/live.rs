//! Background refresh of the schedule and live game clocks.

use crate::api::NHLApiError;
use crate::cache;
use crate::data_provider::NHLDataProvider;
use crate::favorites::FavoriteStore;
use crate::models::{GameDetailsResponse, ScheduleResponse};
use crate::state::{SharedDataHandle, UiState};
use chrono::Utc;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Result of one polling pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveUpdate {
    /// `None` when the schedule request failed
    pub schedule: Option<ScheduleResponse>,
    pub game_details: HashMap<i64, GameDetailsResponse>,
}

/// Fetch play-by-play details for every game that is running or just ended
pub async fn fetch_live_details(
    provider: &dyn NHLDataProvider,
    schedule: &ScheduleResponse,
) -> HashMap<i64, GameDetailsResponse> {
    let game_ids: Vec<i64> = schedule
        .all_games()
        .into_iter()
        .filter(|game| game.game_state.wants_live_details())
        .map(|game| game.id)
        .collect();

    let fetch_futures = game_ids.into_iter().map(|game_id| async move {
        (game_id, provider.game_details(game_id).await)
    });
    let results = join_all(fetch_futures).await;

    let mut details = HashMap::new();
    for (game_id, result) in results {
        match result {
            Ok(game_details) => {
                details.insert(game_id, game_details);
            }
            Err(e) => warn!("Skipping details for game {}: {}", game_id, e),
        }
    }
    details
}

/// Poll today's schedule and the details of live games
pub async fn poll_live_update(provider: &dyn NHLDataProvider) -> LiveUpdate {
    match provider.today_schedule().await {
        Ok(schedule) => {
            let game_details = fetch_live_details(provider, &schedule).await;
            debug!(
                "Live poll: {} games, {} with details",
                schedule.game_count(),
                game_details.len()
            );
            LiveUpdate {
                schedule: Some(schedule),
                game_details,
            }
        }
        Err(e) => {
            warn!("Live poll failed: {}", e);
            LiveUpdate::default()
        }
    }
}

/// Fold a poll result into the UI state.
///
/// A missing schedule keeps the previous one and any load error; a fresh one
/// clears the error. Details are always replaced.
pub fn merge_live_update(state: &mut UiState, update: LiveUpdate) {
    if let Some(schedule) = update.schedule {
        state.schedule = Some(schedule);
        state.error_message = None;
    }
    state.game_details = update.game_details;
    state.last_refresh = Some(SystemTime::now());
}

/// Message shown to the user when the schedule can't be loaded
pub fn load_error_message(error: &NHLApiError) -> String {
    match error {
        NHLApiError::Parse { source, .. } => format!("Unable to parse API response: {}", source),
        e => match e.status() {
            Some(status) => format!("API error: {}", status),
            None => format!("Failed to load games: {}", e),
        },
    }
}

/// Load the schedule, then team stats. Returns whether the schedule loaded.
pub async fn load_schedule(provider: &dyn NHLDataProvider, shared: &SharedDataHandle) -> bool {
    shared.write().await.is_loading = true;

    let loaded = match provider.today_schedule().await {
        Ok(schedule) => {
            info!("Loaded schedule with {} games", schedule.game_count());
            let season = {
                let mut state = shared.write().await;
                state.schedule = Some(schedule);
                state.error_message = None;
                state.config.season_for(Utc::now().date_naive())
            };
            load_team_stats(provider, shared, season).await;
            true
        }
        Err(e) => {
            warn!("Failed to load schedule: {}", e);
            shared.write().await.error_message = Some(load_error_message(&e));
            false
        }
    };

    shared.write().await.is_loading = false;
    loaded
}

/// Load team stats for a season, keyed by team id
pub async fn load_team_stats(provider: &dyn NHLDataProvider, shared: &SharedDataHandle, season: i64) {
    match cache::fetch_team_stats_cached(provider, season).await {
        Ok(response) => {
            let by_team: HashMap<i64, _> = response
                .data
                .into_iter()
                .map(|stats| (stats.team_id, stats))
                .collect();
            debug!("Loaded stats for {} teams in season {}", by_team.len(), season);
            shared.write().await.team_stats = by_team;
        }
        Err(e) => warn!("Failed to load team stats for {}: {}", season, e),
    }
}

/// Fetch one game's team comparison into `game_stories`
pub async fn load_game_story(provider: &dyn NHLDataProvider, shared: &SharedDataHandle, game_id: i64) {
    match cache::fetch_game_story_cached(provider, game_id).await {
        Ok(story) => {
            shared.write().await.game_stories.insert(game_id, story);
        }
        Err(e) => warn!("Failed to load game story for {}: {}", game_id, e),
    }
}

/// Fetch a player's landing page into `player_details`
pub async fn load_player_details(
    provider: &dyn NHLDataProvider,
    shared: &SharedDataHandle,
    player_id: i64,
) {
    match cache::fetch_player_details_cached(provider, player_id).await {
        Ok(player) => {
            shared.write().await.player_details.insert(player_id, player);
        }
        Err(e) => warn!("Failed to load player {}: {}", player_id, e),
    }
}

/// Re-read the favorites table into the UI state
pub async fn reload_favorites(store: &FavoriteStore, shared: &SharedDataHandle) {
    match store.all_favorites().await {
        Ok(favorites) => shared.write().await.favorites = favorites,
        Err(e) => {
            warn!("Failed to load favorites: {}", e);
            shared.write().await.error_message = Some(format!("Favorites unavailable: {}", e));
        }
    }
}

/// Keep the shared state fresh until the refresh channel closes.
///
/// Each pass polls then waits for the next tick. Team stats are retried on
/// every pass until they load. A manual refresh reloads the schedule and team
/// stats before polling again.
pub async fn live_update_loop(
    provider: Arc<dyn NHLDataProvider>,
    shared: SharedDataHandle,
    interval: u64,
    mut refresh_rx: mpsc::Receiver<()>,
) {
    let mut interval_timer = tokio::time::interval(Duration::from_secs(interval.max(1)));
    interval_timer.tick().await; // First tick completes immediately

    load_schedule(provider.as_ref(), &shared).await;

    loop {
        let update = poll_live_update(provider.as_ref()).await;
        let missing_stats = {
            let mut state = shared.write().await;
            merge_live_update(&mut state, update);
            state.schedule.is_some() && state.team_stats.is_empty()
        };
        if missing_stats {
            let season = shared.read().await.config.season_for(Utc::now().date_naive());
            load_team_stats(provider.as_ref(), &shared, season).await;
        }

        tokio::select! {
            _ = interval_timer.tick() => {}
            signal = refresh_rx.recv() => match signal {
                Some(()) => {
                    debug!("Manual refresh requested");
                    let season = shared.read().await.config.season_for(Utc::now().date_naive());
                    cache::invalidate_team_stats(season).await;
                    load_schedule(provider.as_ref(), &shared).await;
                }
                None => {
                    info!("Refresh channel closed, stopping live updates");
                    break;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::mock_client::MockClient;
    use crate::fixtures::{create_mock_game, create_mock_game_details, create_mock_schedule};
    use crate::models::{GameDay, GameState};
    use crate::state;
    use crate::config::Config;

    fn parse_error() -> NHLApiError {
        let source = serde_json::from_str::<ScheduleResponse>("{").unwrap_err();
        NHLApiError::Parse {
            url: "schedule/now".to_string(),
            source,
        }
    }

    #[tokio::test]
    async fn test_poll_fetches_details_for_live_and_final_games() {
        let client = MockClient::new();
        let update = poll_live_update(&client).await;

        assert!(update.schedule.is_some());
        let mut ids: Vec<i64> = update.game_details.keys().copied().collect();
        ids.sort();
        // LIVE, FINAL and CRIT games; FUT and OFF are left alone
        assert_eq!(ids, vec![2024020002, 2024020003, 2024020005]);
        assert_eq!(client.detail_calls(), 3);
    }

    #[tokio::test]
    async fn test_poll_skips_failed_details() {
        let client = MockClient::new().failing_game(2024020003);
        let update = poll_live_update(&client).await;

        assert!(update.schedule.is_some());
        assert_eq!(update.game_details.len(), 2);
        assert!(!update.game_details.contains_key(&2024020003));
    }

    #[tokio::test]
    async fn test_poll_with_failed_schedule_is_empty() {
        let client = MockClient::new().failing_schedule();
        let update = poll_live_update(&client).await;

        assert_eq!(update, LiveUpdate::default());
        assert_eq!(client.detail_calls(), 0);
    }

    #[tokio::test]
    async fn test_poll_without_live_games_fetches_no_details() {
        let schedule = ScheduleResponse {
            game_week: vec![GameDay {
                date: "2025-04-23".to_string(),
                games: vec![create_mock_game(
                    1,
                    "BOS",
                    "MTL",
                    GameState::Future,
                    "2025-04-23T23:00:00Z",
                )],
                ..Default::default()
            }],
            ..Default::default()
        };
        let client = MockClient::new().with_schedule(schedule);
        let update = poll_live_update(&client).await;
        assert!(update.game_details.is_empty());
        assert_eq!(client.detail_calls(), 0);
    }

    #[test]
    fn test_merge_keeps_schedule_when_update_has_none() {
        let mut state = UiState {
            schedule: Some(create_mock_schedule()),
            ..Default::default()
        };
        state
            .game_details
            .insert(2024020002, create_mock_game_details(2024020002));

        merge_live_update(&mut state, LiveUpdate::default());

        assert_eq!(state.schedule, Some(create_mock_schedule()));
        // Details are replaced wholesale, even by an empty map
        assert!(state.game_details.is_empty());
        assert!(state.last_refresh.is_some());
    }

    #[test]
    fn test_merge_error_cleared_only_by_fresh_schedule() {
        let mut state = UiState {
            error_message: Some("API error: 503".to_string()),
            ..Default::default()
        };

        merge_live_update(&mut state, LiveUpdate::default());
        assert_eq!(state.error_message.as_deref(), Some("API error: 503"));

        merge_live_update(
            &mut state,
            LiveUpdate {
                schedule: Some(create_mock_schedule()),
                game_details: HashMap::new(),
            },
        );
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_merge_replaces_schedule_and_details() {
        let mut state = UiState::default();
        state.game_details.insert(99, create_mock_game_details(99));

        let mut details = HashMap::new();
        details.insert(2024020002, create_mock_game_details(2024020002));
        merge_live_update(
            &mut state,
            LiveUpdate {
                schedule: Some(create_mock_schedule()),
                game_details: details,
            },
        );

        assert!(state.schedule.is_some());
        assert_eq!(state.game_details.len(), 1);
        assert!(state.game_details.contains_key(&2024020002));
    }

    #[test]
    fn test_load_error_messages() {
        assert!(load_error_message(&parse_error()).starts_with("Unable to parse API response: "));
        assert_eq!(
            load_error_message(&NHLApiError::Http {
                status: 500,
                url: "u".to_string()
            }),
            "API error: 500"
        );
        assert_eq!(
            load_error_message(&NHLApiError::ClientBuild("no tls".to_string())),
            "Failed to load games: failed to build HTTP client: no tls"
        );
    }

    #[tokio::test]
    async fn test_load_schedule_success_clears_error() {
        let shared = state::shared(Config::default());
        shared.write().await.error_message = Some("old".to_string());
        let client = MockClient::new();

        assert!(load_schedule(&client, &shared).await);

        let state = shared.read().await;
        assert!(!state.is_loading);
        assert!(state.error_message.is_none());
        assert_eq!(state.schedule.as_ref().map(|s| s.game_count()), Some(5));
        assert!(!state.team_stats.is_empty());
    }

    #[tokio::test]
    async fn test_load_schedule_failure_keeps_previous_schedule() {
        let shared = state::shared(Config::default());
        shared.write().await.schedule = Some(create_mock_schedule());
        let client = MockClient::new().failing_schedule();

        assert!(!load_schedule(&client, &shared).await);

        let state = shared.read().await;
        assert!(!state.is_loading);
        assert_eq!(state.error_message.as_deref(), Some("API error: 503"));
        assert!(state.schedule.is_some());
    }

    #[tokio::test]
    async fn test_team_stats_failure_leaves_map_untouched() {
        let shared = state::shared(Config::default());
        let client = MockClient::new().failing_team_stats();

        // A season no other test loads, so the cache can't answer
        load_team_stats(&client, &shared, 18881889).await;

        let state = shared.read().await;
        assert!(state.team_stats.is_empty());
        assert!(state.error_message.is_none());
    }

    #[tokio::test]
    async fn test_on_demand_loads_store_by_id() {
        let shared = state::shared(Config::default());
        let client = MockClient::new();

        load_game_story(&client, &shared, 2024020003).await;
        load_player_details(&client, &shared, 8482116).await;

        let state = shared.read().await;
        assert!(state.game_stories.contains_key(&2024020003));
        assert_eq!(
            state.player_details.get(&8482116).map(|p| p.full_name()),
            Some("Lane Hutson".to_string())
        );
    }

    #[tokio::test]
    async fn test_reload_favorites() {
        let shared = state::shared(Config::default());
        let store = FavoriteStore::in_memory().unwrap();
        store.add_favorite("Canadiens").await.unwrap();

        reload_favorites(&store, &shared).await;

        assert!(shared.read().await.is_favorite("Canadiens"));
    }

    #[tokio::test]
    async fn test_loop_stops_when_refresh_channel_closes() {
        let shared = state::shared(Config::default());
        let client = Arc::new(MockClient::new());
        let (refresh_tx, refresh_rx) = mpsc::channel(1);

        let handle = tokio::spawn(live_update_loop(
            client.clone(),
            Arc::clone(&shared),
            3600,
            refresh_rx,
        ));
        drop(refresh_tx);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("loop did not stop")
            .unwrap();

        let state = shared.read().await;
        assert!(state.schedule.is_some());
        assert!(state.last_refresh.is_some());
        assert!(!state.is_loading);
        assert_eq!(state.game_details.len(), 3);
    }

    #[tokio::test]
    async fn test_manual_refresh_reloads_schedule() {
        let shared = state::shared(Config::default());
        let client = Arc::new(MockClient::new());
        let (refresh_tx, refresh_rx) = mpsc::channel(1);

        let handle = tokio::spawn(live_update_loop(
            client.clone(),
            Arc::clone(&shared),
            3600,
            refresh_rx,
        ));
        refresh_tx.send(()).await.unwrap();
        drop(refresh_tx);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("loop did not stop")
            .unwrap();

        // Initial load, first poll, manual reload, second poll
        assert_eq!(client.schedule_calls(), 4);
    }

    #[tokio::test]
    async fn test_loop_recovers_after_failed_first_load() {
        let shared = state::shared(Config::default());
        let client = Arc::new(MockClient::new().failing_first_schedules(1));
        let (refresh_tx, refresh_rx) = mpsc::channel(1);

        let handle = tokio::spawn(live_update_loop(
            client.clone(),
            Arc::clone(&shared),
            3600,
            refresh_rx,
        ));
        drop(refresh_tx);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("loop did not stop")
            .unwrap();

        let state = shared.read().await;
        assert_eq!(client.schedule_calls(), 2);
        assert!(state.schedule.is_some());
        assert!(state.error_message.is_none());
        assert!(!state.team_stats.is_empty());
    }
}
