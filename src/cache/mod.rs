//! Scorta query cache
//!
//! Stale-while-revalidate caching for paginated list queries:
//!
//! - one entry per [`QueryKey`], owned exclusively by the store
//! - concurrent fetches for one key share a single in-flight request
//! - invalidation marks entries stale without deleting them, so a list keeps
//!   rendering its previous rows until the revalidation lands
//!
//! Capacity, freshness window, and debounce interval come from
//! `scorta.toml`:
//!
//! ```toml
//! [cache]
//! entry_limit = 64
//! ttl_ms = 30000
//! debounce_ms = 300
//! ```

mod config;
mod keys;
pub(crate) mod lock;
mod store;

pub use config::CacheConfig;
pub use keys::{QueryKey, hash_value};
pub use store::{EntrySnapshot, EntryStatus, QueryCache};
