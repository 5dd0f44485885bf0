//! Shared HTTP response helpers for the content API.
//!
//! Centralizes status-code checks (401/403 → [`FetchError::Auth`], 429 with
//! `Retry-After` parsing, non-success → [`FetchError::Api`]) so the page
//! source stays focused on request construction and body decoding.

use crate::error::FetchError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, FetchError> {
    let status = resp.status().as_u16();
    if matches!(status, 401 | 403) {
        return Err(FetchError::Auth { status });
    }
    if status == 429 {
        return Err(FetchError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(FetchError::Api {
            status,
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
