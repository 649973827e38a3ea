/// Trait for providing NHL data, abstracting over real API clients and mock implementations
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::{Client, NHLApiError};
use crate::models::{
    GameDetailsResponse, GameStoryResponse, PlayerDetailsResponse, ScheduleResponse,
    TeamStatsResponse,
};

/// Trait for NHL data providers, implemented by both real Client and MockClient
#[async_trait]
pub trait NHLDataProvider: Send + Sync {
    /// Get the schedule for the current week
    async fn today_schedule(&self) -> Result<ScheduleResponse, NHLApiError>;

    /// Get the schedule for the week containing a date
    async fn schedule_for(&self, date: NaiveDate) -> Result<ScheduleResponse, NHLApiError>;

    /// Get regular season team summaries
    async fn team_stats(&self, season_id: i64) -> Result<TeamStatsResponse, NHLApiError>;

    /// Get live period/clock details for a game
    async fn game_details(&self, game_id: i64) -> Result<GameDetailsResponse, NHLApiError>;

    /// Get player landing data
    async fn player_details(&self, player_id: i64) -> Result<PlayerDetailsResponse, NHLApiError>;

    /// Get team comparison stats for a game
    async fn game_story(&self, game_id: i64) -> Result<GameStoryResponse, NHLApiError>;
}

/// Implement the trait for the real api::Client
#[async_trait]
impl NHLDataProvider for Client {
    async fn today_schedule(&self) -> Result<ScheduleResponse, NHLApiError> {
        self.today_schedule().await
    }

    async fn schedule_for(&self, date: NaiveDate) -> Result<ScheduleResponse, NHLApiError> {
        self.schedule_for(date).await
    }

    async fn team_stats(&self, season_id: i64) -> Result<TeamStatsResponse, NHLApiError> {
        self.team_stats(season_id).await
    }

    async fn game_details(&self, game_id: i64) -> Result<GameDetailsResponse, NHLApiError> {
        self.game_details(game_id).await
    }

    async fn player_details(&self, player_id: i64) -> Result<PlayerDetailsResponse, NHLApiError> {
        self.player_details(player_id).await
    }

    async fn game_story(&self, game_id: i64) -> Result<GameStoryResponse, NHLApiError> {
        self.game_story(game_id).await
    }
}
