//! HTTP client for the public NHL web and stats APIs

mod error;

pub use error::NHLApiError;

use crate::models::{
    GameDetailsResponse, GameStoryResponse, PlayerDetailsResponse, ScheduleResponse,
    TeamStatsResponse,
};
use chrono::{Datelike, NaiveDate};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Base URL of the web API (schedule, gamecenter, players)
pub const WEB_API_BASE: &str = "https://api-web.nhle.com/v1/";

/// Base URL of the stats API (team summaries)
pub const STATS_API_BASE: &str = "https://api.nhle.com/";

/// Regular season game type used in stats queries
const REGULAR_SEASON_GAME_TYPE: u8 = 2;

/// Month in which a new season starts
const SEASON_START_MONTH: u32 = 9;

const REQUEST_TIMEOUT_SECS: u64 = 20;

/// Season id (e.g. `20242025`) containing the given date
pub fn season_id_for(date: NaiveDate) -> i64 {
    let start_year = if date.month() >= SEASON_START_MONTH {
        date.year()
    } else {
        date.year() - 1
    };
    i64::from(start_year) * 10_000 + i64::from(start_year + 1)
}

/// Thin reqwest wrapper exposing the handful of endpoints the app reads
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    web_base: String,
    stats_base: String,
}

impl Client {
    pub fn new() -> Result<Self, NHLApiError> {
        Self::with_base_urls(WEB_API_BASE, STATS_API_BASE)
    }

    /// Build a client against alternate hosts (proxies, recorded fixtures)
    pub fn with_base_urls(web_base: &str, stats_base: &str) -> Result<Self, NHLApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NHLApiError::ClientBuild(e.to_string()))?;

        Ok(Client {
            http,
            web_base: with_trailing_slash(web_base),
            stats_base: with_trailing_slash(stats_base),
        })
    }

    /// Schedule for the current week
    pub async fn today_schedule(&self) -> Result<ScheduleResponse, NHLApiError> {
        let url = format!("{}schedule/now", self.web_base);
        let schedule: ScheduleResponse = self.get_json(&url, &[]).await?;
        debug!("Schedule loaded, {} games found", schedule.game_count());
        Ok(schedule)
    }

    /// Schedule for the week containing `date`
    pub async fn schedule_for(&self, date: NaiveDate) -> Result<ScheduleResponse, NHLApiError> {
        let url = format!("{}schedule/{}", self.web_base, date.format("%Y-%m-%d"));
        let schedule: ScheduleResponse = self.get_json(&url, &[]).await?;
        debug!("Schedule for {} loaded, {} games found", date, schedule.game_count());
        Ok(schedule)
    }

    /// Regular season team summaries, sorted by points
    pub async fn team_stats(&self, season_id: i64) -> Result<TeamStatsResponse, NHLApiError> {
        let url = format!("{}stats/rest/en/team/summary", self.stats_base);
        let cayenne = format!(
            "seasonId={} and gameTypeId={}",
            season_id, REGULAR_SEASON_GAME_TYPE
        );
        let query = [("sort", "points".to_string()), ("cayenneExp", cayenne)];
        let stats: TeamStatsResponse = self.get_json(&url, &query).await?;
        debug!("Loaded stats for {} teams", stats.data.len());
        Ok(stats)
    }

    /// Live clock and period for a game
    pub async fn game_details(&self, game_id: i64) -> Result<GameDetailsResponse, NHLApiError> {
        let url = format!("{}gamecenter/{}/play-by-play", self.web_base, game_id);
        let details: GameDetailsResponse = self.get_json(&url, &[]).await?;
        debug!(
            "Loaded details for game {}: period {}, time {}",
            game_id, details.display_period, details.clock.time_remaining
        );
        Ok(details)
    }

    /// Player landing page: bio and last five games
    pub async fn player_details(&self, player_id: i64) -> Result<PlayerDetailsResponse, NHLApiError> {
        let url = format!("{}player/{}/landing", self.web_base, player_id);
        self.get_json(&url, &[]).await
    }

    /// Team comparison stats for a game
    pub async fn game_story(&self, game_id: i64) -> Result<GameStoryResponse, NHLApiError> {
        let url = format!("{}wsc/game-story/{}", self.web_base, game_id);
        self.get_json(&url, &[]).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, NHLApiError> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| NHLApiError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("Rate limited by {}", url);
            return Err(NHLApiError::RateLimitExceeded { url: url.to_string() });
        }
        if !status.is_success() {
            warn!("{} returned HTTP {}", url, status.as_u16());
            return Err(NHLApiError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|source| NHLApiError::Request {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_str(&body).map_err(|source| NHLApiError::Parse {
            url: url.to_string(),
            source,
        })
    }
}

fn with_trailing_slash(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    }
}
