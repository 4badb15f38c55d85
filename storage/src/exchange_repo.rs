//! Exchange repository: the append-only `messages` table.
//!
//! Uses SqlitePoolManager and the models (NewExchange, ExchangeRecord, ExchangeQuery).
//! Rows are only ever inserted; nothing here updates or deletes.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{QueryBuilder, Sqlite};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::{parse_stored_timestamp, ExchangeQuery, ExchangeRecord, ExchangeRow, NewExchange};
use crate::sqlite_pool::SqlitePoolManager;

const SELECT_COLUMNS: &str =
    "SELECT id, user_id, username, message_type, user_input, ai_response, timestamp FROM messages";

#[derive(Clone, Debug)]
pub struct ExchangeRepository {
    pub(crate) pool_manager: SqlitePoolManager,
    /// Last timestamp written through this handle. Held across the INSERT so ids and timestamps
    /// are assigned in the same order.
    pub(crate) last_timestamp: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl ExchangeRepository {
    /// Opens (or creates) the database and makes sure the table exists.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self {
            pool_manager,
            last_timestamp: Arc::new(Mutex::new(None)),
        };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Creates the `messages` table and its index if missing. Safe to call any number of times;
    /// existing rows are left alone.
    pub async fn initialize(&self) -> Result<(), StorageError> {
        info!("Creating messages table if not exists");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                username TEXT,
                message_type TEXT NOT NULL CHECK (message_type IN ('text', 'photo')),
                user_input TEXT NOT NULL,
                ai_response TEXT NOT NULL,
                timestamp TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_messages_user_id ON messages(user_id)")
            .execute(pool)
            .await?;

        let latest: Option<String> = sqlx::query_scalar("SELECT MAX(timestamp) FROM messages")
            .fetch_one(pool)
            .await?;
        if let Some(latest) = latest.as_deref().and_then(parse_stored_timestamp) {
            let mut last = self.last_timestamp.lock().await;
            if last.map_or(true, |l| l < latest) {
                *last = Some(latest);
            }
        }

        info!("Messages table ready");
        Ok(())
    }

    /// Inserts one exchange in a single statement and returns the stored row.
    ///
    /// The timestamp is the capture time of the write, clamped so it never goes below the previous
    /// one written through this handle.
    pub async fn append(&self, exchange: &NewExchange) -> Result<ExchangeRecord, StorageError> {
        let pool = self.pool_manager.pool();

        let mut last = self.last_timestamp.lock().await;
        let now = Utc::now();
        let timestamp = match *last {
            Some(prev) if prev > now => prev,
            _ => now,
        };

        let result = sqlx::query(
            r#"
            INSERT INTO messages (user_id, username, message_type, user_input, ai_response, timestamp)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(exchange.user_id)
        .bind(&exchange.username)
        .bind(exchange.kind.as_str())
        .bind(&exchange.user_input)
        .bind(&exchange.ai_response)
        .bind(timestamp.to_rfc3339_opts(SecondsFormat::Micros, true))
        .execute(pool)
        .await?;

        *last = Some(timestamp);
        drop(last);

        let id = result.last_insert_rowid();
        info!(
            id,
            user_id = exchange.user_id,
            message_type = %exchange.kind,
            response_len = exchange.ai_response.len(),
            "Saved exchange"
        );

        Ok(ExchangeRecord {
            id,
            user_id: exchange.user_id,
            username: exchange.username.clone(),
            kind: exchange.kind,
            user_input: exchange.user_input.clone(),
            ai_response: exchange.ai_response.clone(),
            timestamp,
        })
    }

    /// Returns stored exchanges newest first, filtered by `query`.
    pub async fn recent(&self, query: &ExchangeQuery) -> Result<Vec<ExchangeRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_COLUMNS);
        builder.push(" WHERE 1=1");
        if let Some(uid) = query.user_id {
            builder.push(" AND user_id = ").push_bind(uid);
        }
        if let Some(kind) = query.message_type {
            builder.push(" AND message_type = ").push_bind(kind.as_str());
        }
        builder.push(" ORDER BY id DESC");
        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(limit);
        }

        let rows: Vec<ExchangeRow> = builder.build_query_as::<ExchangeRow>().fetch_all(pool).await?;
        debug!(count = rows.len(), "Retrieved exchanges");

        rows.into_iter().map(ExchangeRecord::try_from).collect()
    }

    /// Returns the exchange with the given id, if any.
    pub async fn get(&self, id: i64) -> Result<Option<ExchangeRecord>, StorageError> {
        let pool = self.pool_manager.pool();
        let row: Option<ExchangeRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        row.map(ExchangeRecord::try_from).transpose()
    }

    /// Total number of stored exchanges.
    pub async fn count(&self) -> Result<i64, StorageError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
            .fetch_one(self.pool_manager.pool())
            .await?;
        Ok(count)
    }

    /// Names of the user tables in the database (excludes SQLite's internal tables).
    pub async fn table_names(&self) -> Result<Vec<String>, StorageError> {
        let names: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(names)
    }
}
