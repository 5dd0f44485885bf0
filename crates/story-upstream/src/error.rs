//! Upstream error types.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while aggregating a collection.
///
/// [`FetchError::Auth`] is the only variant that means "the token was
/// refused"; everything else is a transient upstream failure the caller may
/// retry by triggering a new aggregation.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The content API refused the bearer token.
    #[error("content API rejected the access token ({status})")]
    Auth {
        /// HTTP status code (401 or 403).
        status: u16,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Content API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The content API returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds the API asked us to wait.
        retry_after_secs: u64,
    },

    /// A page body could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// A page request exceeded the per-request ceiling.
    #[error("page {page} timed out after {after:?}")]
    Timeout { page: u32, after: Duration },

    /// The collection never signalled its end.
    #[error("collection did not end within {max_pages} pages")]
    PageCeiling { max_pages: u32 },
}

impl FetchError {
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}
