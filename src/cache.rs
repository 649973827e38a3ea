use crate::api::NHLApiError;
use crate::data_provider::NHLDataProvider;
use crate::models::{GameStoryResponse, PlayerDetailsResponse, TeamStatsResponse};
use cached::proc_macro::cached;

pub use cached::Cached;

#[cfg(test)]
#[derive(Debug)]
pub struct CacheStats {
    pub team_stats_entries: usize,
    pub player_details_entries: usize,
    pub game_story_entries: usize,
}

#[cfg(test)]
pub async fn cache_stats() -> CacheStats {
    CacheStats {
        team_stats_entries: TEAM_STATS_CACHE.lock().await.cache_size(),
        player_details_entries: PLAYER_DETAILS_CACHE.lock().await.cache_size(),
        game_story_entries: GAME_STORY_CACHE.lock().await.cache_size(),
    }
}

#[cached(
    name = "TEAM_STATS_CACHE",
    type = "cached::TimedSizedCache<i64, TeamStatsResponse>",
    create = "{ cached::TimedSizedCache::with_size_and_lifespan(4, 3600) }",
    convert = r#"{ season_id }"#,
    result = true
)]
pub async fn fetch_team_stats_cached(
    client: &dyn NHLDataProvider,
    season_id: i64,
) -> Result<TeamStatsResponse, NHLApiError> {
    client.team_stats(season_id).await
}

#[cached(
    name = "PLAYER_DETAILS_CACHE",
    type = "cached::TimedSizedCache<i64, PlayerDetailsResponse>",
    create = "{ cached::TimedSizedCache::with_size_and_lifespan(100, 86400) }",
    convert = r#"{ player_id }"#,
    result = true
)]
pub async fn fetch_player_details_cached(
    client: &dyn NHLDataProvider,
    player_id: i64,
) -> Result<PlayerDetailsResponse, NHLApiError> {
    client.player_details(player_id).await
}

#[cached(
    name = "GAME_STORY_CACHE",
    type = "cached::TimedSizedCache<i64, GameStoryResponse>",
    create = "{ cached::TimedSizedCache::with_size_and_lifespan(40, 60) }",
    convert = r#"{ game_id }"#,
    result = true
)]
pub async fn fetch_game_story_cached(
    client: &dyn NHLDataProvider,
    game_id: i64,
) -> Result<GameStoryResponse, NHLApiError> {
    client.game_story(game_id).await
}

/// Forget a season's team stats so the next fetch goes to the network
pub async fn invalidate_team_stats(season_id: i64) {
    TEAM_STATS_CACHE.lock().await.cache_remove(&season_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::mock_client::MockClient;

    // The caches are process-wide statics shared with other tests, so only
    // check the keys this test owns.
    #[tokio::test]
    async fn test_fetches_populate_caches() {
        let client = MockClient::new();

        fetch_team_stats_cached(&client, 20112012).await.unwrap();
        fetch_player_details_cached(&client, 8471675).await.unwrap();
        fetch_game_story_cached(&client, 2011020001).await.unwrap();

        assert!(TEAM_STATS_CACHE.lock().await.cache_get(&20112012).is_some());
        assert!(PLAYER_DETAILS_CACHE.lock().await.cache_get(&8471675).is_some());
        assert!(GAME_STORY_CACHE.lock().await.cache_get(&2011020001).is_some());
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let client = MockClient::new();
        fetch_team_stats_cached(&client, 20102011).await.unwrap();
        invalidate_team_stats(20102011).await;
        assert!(TEAM_STATS_CACHE.lock().await.cache_get(&20102011).is_none());

        // Still served, now from a fresh fetch
        assert!(fetch_team_stats_cached(&client, 20102011).await.is_ok());
    }

    #[tokio::test]
    async fn test_cache_stats_reports_sizes() {
        let client = MockClient::new();
        fetch_player_details_cached(&client, 8478402).await.unwrap();
        let stats = cache_stats().await;
        assert!(stats.player_details_entries >= 1);
        assert!(stats.team_stats_entries <= 4);
        assert!(stats.game_story_entries <= 40);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let client = MockClient::new().failing_team_stats();
        // A season no other test uses
        assert!(fetch_team_stats_cached(&client, 19171918).await.is_err());
        assert!(TEAM_STATS_CACHE
            .lock()
            .await
            .cache_get(&19171918)
            .is_none());
    }
}
