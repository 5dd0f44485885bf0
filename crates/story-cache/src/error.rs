//! Cache error types.
//!
//! Read-side errors never leave this crate: [`crate::SessionCache`] turns
//! them into cache misses. Only writes report failures to the caller.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    /// Filesystem error while reading or writing an entry.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required entry is not present.
    #[error("cache entry '{key}' is missing")]
    Missing { key: &'static str },

    /// An entry exists but cannot be decoded.
    #[error("cache entry '{key}' is malformed: {reason}")]
    Malformed { key: &'static str, reason: String },

    /// The stored snapshot does not match the record list schema.
    #[error("cached snapshot failed schema validation: {errors:?}")]
    Schema { errors: Vec<String> },

    /// Key contains characters that are not safe as a file name.
    #[error("invalid cache key: '{0}'")]
    InvalidKey(String),

    /// Snapshot could not be serialized.
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}
