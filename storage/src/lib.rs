//! Storage crate: persistence of user/AI exchanges.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – ExchangeKind, NewExchange, ExchangeRecord, ExchangeQuery
//! - [`exchange_repo`] – ExchangeRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod exchange_repo;
mod models;
mod sqlite_pool;


pub use error::StorageError;
pub use exchange_repo::ExchangeRepository;
pub use models::{ExchangeKind, ExchangeQuery, ExchangeRecord, NewExchange};
pub use sqlite_pool::SqlitePoolManager;
