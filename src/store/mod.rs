//! Persistent query memoization
//!
//! One SQLite database holds three relations: recipes by id, queries by
//! canonical key pair, and the many-to-many links between them. The store is
//! append-only; rows are never updated or expired, so a query answered once
//! never touches the network again.

pub mod query_cache;

pub use query_cache::{CacheEntry, QueryCache};
