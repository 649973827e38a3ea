//! Favorite teams persisted in a local SQLite database.
//!
//! Diesel is synchronous, so every operation checks a connection out of the
//! r2d2 pool on a blocking thread.

mod schema;

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::path::Path;
use thiserror::Error;
use tokio::task;
use tracing::{debug, info};

use schema::teams;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Path accepted by SQLite for a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Pool size for file databases
const FILE_POOL_SIZE: u32 = 4;

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for favorite store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Query error: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// A team the user starred
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = teams)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FavoriteTeam {
    pub id: i64,
    pub team_name: String,
}

#[derive(Insertable)]
#[diesel(table_name = teams)]
struct NewFavorite<'a> {
    team_name: &'a str,
}

/// Diesel-backed favorites table
#[derive(Clone)]
pub struct FavoriteStore {
    pool: SqlitePool,
}

impl FavoriteStore {
    /// Open (or create) the database at `path` and run pending migrations
    pub fn open(path: &str) -> StoreResult<Self> {
        let in_memory = path == IN_MEMORY;
        if !in_memory {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        StoreError::Connection(format!("cannot create {}: {}", parent.display(), e))
                    })?;
                }
            }
        }

        // Each in-memory connection is its own database, so share a single one
        let max_size = if in_memory { 1 } else { FILE_POOL_SIZE };
        let manager = ConnectionManager::<SqliteConnection>::new(path);
        let mut builder = Pool::builder().max_size(max_size);
        if in_memory {
            builder = builder.idle_timeout(None).max_lifetime(None);
        }
        let pool = builder
            .build(manager)
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        {
            let mut conn = pool
                .get()
                .map_err(|e| StoreError::Connection(e.to_string()))?;
            conn.run_pending_migrations(MIGRATIONS)
                .map_err(|e| StoreError::Migration(e.to_string()))?;
        }

        info!("Favorites database ready at {}", path);
        Ok(FavoriteStore { pool })
    }

    /// Private in-memory store, used by tests and `--mock` runs
    pub fn in_memory() -> StoreResult<Self> {
        Self::open(IN_MEMORY)
    }

    async fn with_conn<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> StoreResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| StoreError::Connection(e.to_string()))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| StoreError::Internal(e.to_string()))?
    }

    /// Store a team name, returning its row id
    pub async fn add_favorite(&self, team_name: &str) -> StoreResult<i64> {
        let name = team_name.to_string();
        let id = self
            .with_conn(move |conn| insert_favorite(conn, &name))
            .await?;
        debug!("Added favorite {} ({})", team_name, id);
        Ok(id)
    }

    /// All favorites, alphabetical by team name
    pub async fn all_favorites(&self) -> StoreResult<Vec<FavoriteTeam>> {
        self.with_conn(|conn| {
            Ok(teams::table
                .order(teams::team_name.asc())
                .select(FavoriteTeam::as_select())
                .load(conn)?)
        })
        .await
    }

    /// Delete a favorite by id; unknown ids are ignored
    pub async fn remove_favorite(&self, id: i64) -> StoreResult<()> {
        let deleted = self
            .with_conn(move |conn| Ok(diesel::delete(teams::table.find(id)).execute(conn)?))
            .await?;
        debug!("Removed favorite {} ({} rows)", id, deleted);
        Ok(())
    }

    pub async fn find_by_name(&self, team_name: &str) -> StoreResult<Option<FavoriteTeam>> {
        let name = team_name.to_string();
        self.with_conn(move |conn| {
            Ok(teams::table
                .filter(teams::team_name.eq(name))
                .select(FavoriteTeam::as_select())
                .first(conn)
                .optional()?)
        })
        .await
    }

    /// Add the team if absent, otherwise remove every row with that name.
    ///
    /// Returns whether the team is a favorite afterwards.
    pub async fn toggle_favorite(&self, team_name: &str) -> StoreResult<bool> {
        let name = team_name.to_string();
        let now_favorite = self
            .with_conn(move |conn| {
                conn.transaction::<_, StoreError, _>(|conn| {
                    let removed = diesel::delete(teams::table.filter(teams::team_name.eq(&name)))
                        .execute(conn)?;
                    if removed > 0 {
                        return Ok(false);
                    }
                    insert_favorite(conn, &name)?;
                    Ok(true)
                })
            })
            .await?;
        debug!("Toggled favorite {}: now {}", team_name, now_favorite);
        Ok(now_favorite)
    }
}

fn insert_favorite(conn: &mut SqliteConnection, team_name: &str) -> StoreResult<i64> {
    Ok(diesel::insert_into(teams::table)
        .values(&NewFavorite { team_name })
        .returning(teams::id)
        .get_result(conn)?)
}
