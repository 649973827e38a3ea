//! Data types mirroring the NHL web and stats API payloads.
//!
//! The upstream JSON is loose: fields come and go between seasons and game
//! states, so almost everything carries a default and deserialization only
//! fails on a genuinely malformed document.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Game lifecycle as reported by the API's `gameState` code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GameState {
    /// `FUT`
    Future,
    /// `PRE`
    PreGame,
    /// `LIVE`
    Live,
    /// `CRIT`, late game or overtime
    Critical,
    /// `FINAL`
    Final,
    /// `OFF`, the score is official
    Official,
    /// Any code this client does not know about, kept verbatim
    Other(String),
}

impl GameState {
    pub fn code(&self) -> &str {
        match self {
            GameState::Future => "FUT",
            GameState::PreGame => "PRE",
            GameState::Live => "LIVE",
            GameState::Critical => "CRIT",
            GameState::Final => "FINAL",
            GameState::Official => "OFF",
            GameState::Other(code) => code,
        }
    }

    /// Game is being played right now
    pub fn is_live(&self) -> bool {
        matches!(self, GameState::Live | GameState::Critical)
    }

    /// Game has not started yet
    pub fn is_scheduled(&self) -> bool {
        matches!(self, GameState::Future | GameState::PreGame)
    }

    /// Game is over
    pub fn is_complete(&self) -> bool {
        matches!(self, GameState::Final | GameState::Official)
    }

    /// States for which the live loop refreshes play-by-play details.
    ///
    /// `OFF` games are settled and excluded; `FINAL` still gets one more
    /// look since the clock and period can be corrected right after the horn.
    pub fn wants_live_details(&self) -> bool {
        matches!(
            self,
            GameState::Live | GameState::Critical | GameState::Final
        )
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::Other(String::new())
    }
}

impl From<String> for GameState {
    fn from(code: String) -> Self {
        match code.as_str() {
            "FUT" => GameState::Future,
            "PRE" => GameState::PreGame,
            "LIVE" => GameState::Live,
            "CRIT" => GameState::Critical,
            "FINAL" => GameState::Final,
            "OFF" => GameState::Official,
            _ => GameState::Other(code),
        }
    }
}

impl From<&str> for GameState {
    fn from(code: &str) -> Self {
        GameState::from(code.to_string())
    }
}

impl From<GameState> for String {
    fn from(state: GameState) -> Self {
        state.code().to_string()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A name with its default and optional French rendition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizedName {
    pub default: String,
    pub fr: Option<String>,
}

impl LocalizedName {
    pub fn new(default: &str) -> Self {
        LocalizedName {
            default: default.to_string(),
            fr: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub previous_start_date: String,
    pub next_start_date: String,
    pub game_week: Vec<GameDay>,
}

impl ScheduleResponse {
    /// All games of the week, in API order
    pub fn all_games(&self) -> Vec<&Game> {
        self.game_week.iter().flat_map(|day| day.games.iter()).collect()
    }

    pub fn game_count(&self) -> usize {
        self.game_week.iter().map(|day| day.games.len()).sum()
    }

    pub fn find_game(&self, game_id: i64) -> Option<&Game> {
        self.game_week
            .iter()
            .flat_map(|day| day.games.iter())
            .find(|game| game.id == game_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameDay {
    pub date: String,
    pub day_abbrev: String,
    pub number_of_games: u32,
    pub date_promo: Vec<Value>,
    pub games: Vec<Game>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Game {
    pub id: i64,
    pub season: i64,
    pub game_type: i32,
    pub neutral_site: bool,
    #[serde(rename = "startTimeUTC")]
    pub start_time_utc: String,
    #[serde(rename = "easternUTCOffset")]
    pub eastern_utc_offset: String,
    #[serde(rename = "venueUTCOffset")]
    pub venue_utc_offset: String,
    pub venue_timezone: String,
    pub game_state: GameState,
    pub game_schedule_state: String,
    pub tv_broadcasts: Vec<TvBroadcast>,
    pub away_team: TeamInfo,
    pub home_team: TeamInfo,
    pub period_descriptor: Option<PeriodDescriptor>,
    pub tickets_link: String,
    pub game_center_link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TvBroadcast {
    pub id: i64,
    pub market: String,
    pub country_code: String,
    pub network: String,
    pub sequence_number: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamInfo {
    pub id: i64,
    pub common_name: LocalizedName,
    pub place_name: LocalizedName,
    pub place_name_with_preposition: Option<LocalizedName>,
    pub abbrev: String,
    pub logo: String,
    pub dark_logo: String,
    pub away_split_squad: Option<bool>,
    pub home_split_squad: Option<bool>,
    pub radio_link: Option<String>,
    pub odds: Option<Vec<Odds>>,
    pub score: Option<i32>,
}

impl TeamInfo {
    /// "Toronto Maple Leafs"
    pub fn full_name(&self) -> String {
        match (self.place_name.default.is_empty(), self.common_name.default.is_empty()) {
            (true, _) => self.common_name.default.clone(),
            (false, true) => self.place_name.default.clone(),
            (false, false) => format!("{} {}", self.place_name.default, self.common_name.default),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Odds {
    pub provider_id: i32,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PeriodDescriptor {
    pub number: i32,
    pub period_type: String,
    pub max_regulation_periods: i32,
}

impl Default for PeriodDescriptor {
    fn default() -> Self {
        PeriodDescriptor {
            number: 0,
            period_type: String::new(),
            max_regulation_periods: 3,
        }
    }
}

/// Subset of the play-by-play document used for the live clock
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameDetailsResponse {
    pub id: i64,
    pub game_state: GameState,
    pub display_period: i32,
    pub clock: GameClock,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameClock {
    pub time_remaining: String,
    pub seconds_remaining: i32,
    pub running: bool,
    pub in_intermission: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamStatsResponse {
    pub data: Vec<TeamStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamStats {
    pub team_id: i64,
    pub team_full_name: String,
    pub games_played: i32,
    pub wins: i32,
    pub losses: i32,
    pub ot_losses: i32,
    pub points: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub goals_for_per_game: f64,
    pub goals_against_per_game: f64,
    pub shots_for_per_game: f64,
    pub shots_against_per_game: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerDetailsResponse {
    pub player_id: i64,
    pub first_name: LocalizedName,
    pub last_name: LocalizedName,
    pub position: String,
    pub sweater_number: i32,
    pub headshot: String,
    pub last5_games: Vec<PlayerGameStats>,
}

impl PlayerDetailsResponse {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.default, self.last_name.default)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerGameStats {
    pub game_date: String,
    pub points: i32,
    pub goals: i32,
    pub assists: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStoryResponse {
    pub summary: Option<GameSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameSummary {
    pub team_game_stats: Vec<TeamGameStat>,
}

/// One row of the game story comparison; values are numbers or strings
/// depending on the category (`"1/3"` for power play, `0.5` for faceoffs).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamGameStat {
    pub category: String,
    pub away_value: Value,
    pub home_value: Value,
}
