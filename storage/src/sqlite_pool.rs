//! SQLite connection pool wrapper for the storage module.
//!
//! Provides [`SqlitePoolManager`] to create one pool per database URL; the database file is
//! created if it does not exist.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

const FILE_POOL_MAX_CONNECTIONS: u32 = 5;

/// Manages a single SQLite pool; creates the database file if missing.
///
/// Accepts `sqlite:` URLs (including `sqlite::memory:`) and bare file paths. In-memory databases
/// get a single connection that never expires, otherwise the data would vanish with it.
#[derive(Clone, Debug)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Creates a pool for the given database URL or path.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        info!(database_url = %database_url, "Initializing SQLite pool");

        let options = if database_url.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(database_url)?
        } else {
            SqliteConnectOptions::new().filename(database_url)
        }
        .create_if_missing(true);

        let pool = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(FILE_POOL_MAX_CONNECTIONS)
                .connect_with(options)
                .await?
        };

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
