/// Mock NHL API client for development and testing
use crate::api::NHLApiError;
use crate::data_provider::NHLDataProvider;
use crate::fixtures;
use crate::models::{
    GameDetailsResponse, GameStoryResponse, PlayerDetailsResponse, ScheduleResponse,
    TeamStatsResponse,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

/// Mock client that returns fixture data instead of making real API calls
#[derive(Default)]
pub struct MockClient {
    schedule: Option<ScheduleResponse>,
    fail_schedule: bool,
    schedule_failures: usize,
    fail_team_stats: bool,
    failing_games: HashSet<i64>,
    schedule_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl MockClient {
    /// Create a new mock client
    pub fn new() -> Self {
        info!("Creating MockClient for development mode");
        Self::default()
    }

    /// Serve this schedule instead of the fixture week
    pub fn with_schedule(mut self, schedule: ScheduleResponse) -> Self {
        self.schedule = Some(schedule);
        self
    }

    /// Make every schedule request fail with HTTP 503
    pub fn failing_schedule(mut self) -> Self {
        self.fail_schedule = true;
        self
    }

    /// Fail the first `count` schedule requests, then recover
    pub fn failing_first_schedules(mut self, count: usize) -> Self {
        self.schedule_failures = count;
        self
    }

    /// Make team stats requests fail
    pub fn failing_team_stats(mut self) -> Self {
        self.fail_team_stats = true;
        self
    }

    /// Make detail requests for one game fail
    pub fn failing_game(mut self, game_id: i64) -> Self {
        self.failing_games.insert(game_id);
        self
    }

    pub fn schedule_calls(&self) -> usize {
        self.schedule_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    fn unavailable(url: String) -> NHLApiError {
        NHLApiError::Http { status: 503, url }
    }

    fn schedule(&self) -> Result<ScheduleResponse, NHLApiError> {
        let call = self.schedule_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_schedule || call < self.schedule_failures {
            return Err(Self::unavailable("schedule/now".to_string()));
        }
        Ok(self
            .schedule
            .clone()
            .unwrap_or_else(fixtures::create_mock_schedule))
    }
}

#[async_trait]
impl NHLDataProvider for MockClient {
    async fn today_schedule(&self) -> Result<ScheduleResponse, NHLApiError> {
        info!("MockClient: Returning mock schedule");
        self.schedule()
    }

    async fn schedule_for(&self, date: NaiveDate) -> Result<ScheduleResponse, NHLApiError> {
        info!("MockClient: Returning mock schedule for date: {}", date);
        self.schedule()
    }

    async fn team_stats(&self, season_id: i64) -> Result<TeamStatsResponse, NHLApiError> {
        info!("MockClient: Returning mock team stats for season {}", season_id);
        if self.fail_team_stats {
            return Err(Self::unavailable("stats/rest/en/team/summary".to_string()));
        }
        Ok(fixtures::create_mock_team_stats())
    }

    async fn game_details(&self, game_id: i64) -> Result<GameDetailsResponse, NHLApiError> {
        info!("MockClient: Returning mock details for game {}", game_id);
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_games.contains(&game_id) {
            return Err(Self::unavailable(format!("gamecenter/{}/play-by-play", game_id)));
        }
        Ok(fixtures::create_mock_game_details(game_id))
    }

    async fn player_details(&self, player_id: i64) -> Result<PlayerDetailsResponse, NHLApiError> {
        info!("MockClient: Returning mock player landing for {}", player_id);
        Ok(fixtures::create_mock_player_details(player_id))
    }

    async fn game_story(&self, game_id: i64) -> Result<GameStoryResponse, NHLApiError> {
        info!("MockClient: Returning mock game story for game {}", game_id);
        Ok(fixtures::create_mock_game_story())
    }
}
