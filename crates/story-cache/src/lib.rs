//! # story-cache
//!
//! Keeps the last aggregated snapshot between runs so the gallery can skip
//! the upstream walk while the copy is fresh.

pub mod error;
pub mod session;
pub mod store;

pub use error::CacheError;
pub use session::{
    ARTICLES_KEY, CacheLookup, CacheState, CacheStatus, SessionCache, TIMESTAMP_KEY, WriteOutcome,
};
pub use store::{CacheStore, FileStore, MemoryStore};
