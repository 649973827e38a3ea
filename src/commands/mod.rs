pub mod favorites;
pub mod game;
pub mod player;
pub mod scores;
pub mod teams;

use crate::config::Config;
use crate::favorites::FavoriteStore;
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;

/// Parse an optional `YYYY-MM-DD` argument.
///
/// `None` means "the current week", which the API serves from `schedule/now`.
pub fn parse_date(date: Option<String>) -> Result<Option<NaiveDate>> {
    match date {
        Some(date_str) => {
            let parsed = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .with_context(|| format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str))?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

/// Open the favorites database named by the config
pub fn open_store(config: &Config) -> Result<FavoriteStore> {
    let path = config
        .database_path()
        .ok_or_else(|| anyhow!("Unable to determine favorites database path"))?;
    let path_str = path.to_string_lossy();
    FavoriteStore::open(&path_str)
        .with_context(|| format!("Failed to open favorites database {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_valid() {
        let date = parse_date(Some("2025-04-23".to_string())).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 4, 23));
    }

    #[test]
    fn test_parse_date_none_is_current_week() {
        assert_eq!(parse_date(None).unwrap(), None);
    }

    #[test]
    fn test_parse_date_invalid() {
        let err = parse_date(Some("04/23/2025".to_string())).unwrap_err();
        assert!(err.to_string().contains("Use YYYY-MM-DD"));
    }

    #[tokio::test]
    async fn test_open_store_uses_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favs.db");
        let config = Config {
            database_path: Some(path.to_string_lossy().into_owned()),
            ..Config::default()
        };

        let store = open_store(&config).unwrap();
        store.add_favorite("Oilers").await.unwrap();
        assert!(path.exists());
    }
}
