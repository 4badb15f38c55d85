//! Query parameters for listing stored exchanges.
//!
//! Used by ExchangeRepository::recent.

use serde::{Deserialize, Serialize};

use super::ExchangeKind;

/// Filters for [`crate::ExchangeRepository::recent`]; `None` means "no filter".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeQuery {
    /// Only exchanges of this Telegram user.
    pub user_id: Option<i64>,
    /// Only text or only photo exchanges.
    pub message_type: Option<ExchangeKind>,
    /// Maximum number of rows to return.
    pub limit: Option<i64>,
}
