use crate::config::Config;
use crate::favorites::FavoriteTeam;
use crate::models::{
    Game, GameDetailsResponse, GameStoryResponse, PlayerDetailsResponse, ScheduleResponse,
    TeamStats,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::RwLock;

/// Everything the screens render, written by the live loop and on-demand loads
#[derive(Debug, Clone)]
pub struct UiState {
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub schedule: Option<ScheduleResponse>,
    /// Keyed by team id
    pub team_stats: HashMap<i64, TeamStats>,
    pub game_details: HashMap<i64, GameDetailsResponse>,
    pub game_stories: HashMap<i64, GameStoryResponse>,
    pub player_details: HashMap<i64, PlayerDetailsResponse>,
    pub favorites: Vec<FavoriteTeam>,
    pub is_dark_theme: bool,
    pub last_refresh: Option<SystemTime>,
    pub config: Config,
}

impl Default for UiState {
    fn default() -> Self {
        UiState {
            is_loading: true,
            error_message: None,
            schedule: None,
            team_stats: HashMap::new(),
            game_details: HashMap::new(),
            game_stories: HashMap::new(),
            player_details: HashMap::new(),
            favorites: Vec::new(),
            is_dark_theme: false,
            last_refresh: None,
            config: Config::default(),
        }
    }
}

impl UiState {
    pub fn new(config: Config) -> Self {
        UiState {
            is_dark_theme: config.dark_theme,
            config,
            ..Default::default()
        }
    }

    /// Every game of the loaded week, in API order
    pub fn all_games(&self) -> Vec<Game> {
        self.schedule
            .as_ref()
            .map(|schedule| schedule.all_games().into_iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn find_game(&self, game_id: i64) -> Option<&Game> {
        self.schedule.as_ref()?.find_game(game_id)
    }

    pub fn is_favorite(&self, team_name: &str) -> bool {
        self.favorites.iter().any(|f| f.team_name == team_name)
    }

    pub fn team_stats_for(&self, team_id: i64) -> Option<&TeamStats> {
        self.team_stats.get(&team_id)
    }

    pub fn toggle_theme(&mut self) {
        self.is_dark_theme = !self.is_dark_theme;
    }
}

pub type SharedDataHandle = Arc<RwLock<UiState>>;

pub fn shared(config: Config) -> SharedDataHandle {
    Arc::new(RwLock::new(UiState::new(config)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::create_mock_schedule;

    #[test]
    fn test_starts_loading_with_nothing() {
        let state = UiState::default();
        assert!(state.is_loading);
        assert!(state.schedule.is_none());
        assert!(state.all_games().is_empty());
        assert!(state.last_refresh.is_none());
    }

    #[test]
    fn test_new_uses_configured_theme() {
        let config = Config {
            dark_theme: true,
            ..Config::default()
        };
        assert!(UiState::new(config).is_dark_theme);
    }

    #[test]
    fn test_games_lookup() {
        let state = UiState {
            schedule: Some(create_mock_schedule()),
            ..Default::default()
        };
        assert_eq!(state.all_games().len(), 5);
        assert_eq!(state.find_game(2024020002).map(|g| g.id), Some(2024020002));
        assert!(state.find_game(1).is_none());
    }

    #[test]
    fn test_is_favorite_matches_exact_name() {
        let state = UiState {
            favorites: vec![FavoriteTeam {
                id: 1,
                team_name: "Canadiens".to_string(),
            }],
            ..Default::default()
        };
        assert!(state.is_favorite("Canadiens"));
        assert!(!state.is_favorite("canadiens"));
        assert!(!state.is_favorite("Bruins"));
    }

    #[test]
    fn test_toggle_theme() {
        let mut state = UiState::default();
        state.toggle_theme();
        assert!(state.is_dark_theme);
        state.toggle_theme();
        assert!(!state.is_dark_theme);
    }
}
