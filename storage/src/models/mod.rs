//! Data models for storage (exchange kinds, records, queries).

mod exchange_kind;
mod exchange_query;
mod exchange_record;

pub use exchange_kind::ExchangeKind;
pub use exchange_query::ExchangeQuery;
pub use exchange_record::{ExchangeRecord, NewExchange};
pub(crate) use exchange_record::{parse_stored_timestamp, ExchangeRow};
