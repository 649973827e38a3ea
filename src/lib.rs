pub mod api;
pub mod cache;
pub mod commands;
pub mod config;
pub mod data_provider;
pub mod favorites;
pub mod fixtures;
pub mod formatting;
pub mod layout_constants;
pub mod live;
pub mod models;
pub mod player_week;
pub mod sorting;
pub mod state;
pub mod tui;

#[cfg(any(test, feature = "development"))]
pub mod dev;
