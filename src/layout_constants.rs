//! Shared layout constants for the terminal UI.

/// Height of the tab bar, including its bottom border
pub const TAB_BAR_HEIGHT: u16 = 2;

/// Height of the breadcrumb trail, including its bottom border
pub const BREADCRUMB_HEIGHT: u16 = 2;

/// Height of the status bar
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Rows used by one game in the game list (status, away, home, spacer)
pub const GAME_ROW_HEIGHT: usize = 4;

/// Width of team name columns in game rows
pub const TEAM_NAME_COL_WIDTH: usize = 28;

/// Width of team record columns in game rows
pub const RECORD_COL_WIDTH: usize = 12;

/// Width of score columns in game rows
pub const SCORE_COL_WIDTH: usize = 3;

/// How long the event loop waits for input before redrawing
pub const EVENT_POLL_INTERVAL_MS: u64 = 100;

/// Buffer size for manual refresh trigger channel
pub const REFRESH_CHANNEL_BUFFER_SIZE: usize = 10;
