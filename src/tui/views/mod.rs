mod favorites;
mod game_detail;
mod game_list;
mod player_week;
mod team_stats;

pub use favorites::FavoritesView;
pub use game_detail::GameDetailView;
pub use game_list::GameListView;
pub use player_week::PlayerWeekView;
pub use team_stats::TeamStatsView;
