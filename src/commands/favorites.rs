use crate::favorites::{FavoriteStore, FavoriteTeam};
use crate::formatting::format_header;
use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesAction {
    List,
    Add(String),
    Remove(i64),
}

pub fn format_favorites(favorites: &[FavoriteTeam]) -> String {
    let mut output = format_header("Favorite Teams", true);
    if favorites.is_empty() {
        output.push_str("No favorite teams yet.\n");
        return output;
    }
    for favorite in favorites {
        output.push_str(&format!("{:>4}  {}\n", favorite.id, favorite.team_name));
    }
    output
}

/// Apply the action and return what to print
pub async fn apply(store: &FavoriteStore, action: FavoritesAction) -> Result<String> {
    match action {
        FavoritesAction::List => {
            let favorites = store
                .all_favorites()
                .await
                .context("Failed to read favorites")?;
            Ok(format_favorites(&favorites))
        }
        FavoritesAction::Add(name) => {
            let id = store
                .add_favorite(&name)
                .await
                .with_context(|| format!("Failed to add {}", name))?;
            Ok(format!("Added {} ({})\n", name, id))
        }
        FavoritesAction::Remove(id) => {
            store
                .remove_favorite(id)
                .await
                .with_context(|| format!("Failed to remove favorite {}", id))?;
            Ok(format!("Removed favorite {}\n", id))
        }
    }
}

pub async fn run(store: &FavoriteStore, action: FavoritesAction) -> Result<()> {
    print!("{}", apply(store, action).await?);
    Ok(())
}
