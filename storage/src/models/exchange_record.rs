//! Exchange models for persistence.
//!
//! [`NewExchange`] is what handlers write; [`ExchangeRecord`] is a row of the `messages` table
//! as stored, with the store-assigned id and timestamp.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ExchangeKind;
use crate::error::StorageError;

/// One exchange to append. The store assigns `id` and `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExchange {
    pub user_id: i64,
    pub username: Option<String>,
    pub kind: ExchangeKind,
    /// Text verbatim, or the photo placeholder.
    pub user_input: String,
    /// Completion text, or the error text shown to the user.
    pub ai_response: String,
}

impl NewExchange {
    pub fn new(
        user_id: i64,
        username: Option<String>,
        kind: ExchangeKind,
        user_input: impl Into<String>,
        ai_response: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            username,
            kind,
            user_input: user_input.into(),
            ai_response: ai_response.into(),
        }
    }
}

/// One row from the messages table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRecord {
    /// Auto-increment primary key.
    pub id: i64,
    pub user_id: i64,
    pub username: Option<String>,
    pub kind: ExchangeKind,
    pub user_input: String,
    pub ai_response: String,
    /// Capture time of the write; stored as RFC 3339 text.
    pub timestamp: DateTime<Utc>,
}

/// Naive layouts found in older databases (`2025-04-05 15:00:00`), read as UTC.
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a stored timestamp: RFC 3339 first, then the naive layouts.
pub(crate) fn parse_stored_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Raw column values as sqlx reads them; converted with `TryFrom`.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ExchangeRow {
    pub id: i64,
    pub user_id: i64,
    pub username: Option<String>,
    pub message_type: String,
    pub user_input: String,
    pub ai_response: String,
    pub timestamp: String,
}

impl TryFrom<ExchangeRow> for ExchangeRecord {
    type Error = StorageError;

    fn try_from(row: ExchangeRow) -> Result<Self, Self::Error> {
        let kind = row
            .message_type
            .parse::<ExchangeKind>()
            .map_err(|reason| StorageError::InvalidRow { id: row.id, reason })?;
        let timestamp =
            parse_stored_timestamp(&row.timestamp).ok_or_else(|| StorageError::InvalidRow {
                id: row.id,
                reason: format!("bad timestamp '{}'", row.timestamp),
            })?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            username: row.username,
            kind,
            user_input: row.user_input,
            ai_response: row.ai_response,
            timestamp,
        })
    }
}
