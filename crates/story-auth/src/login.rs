//! Password login against the CMS `/auth/login` endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::expiry::decode_expiry;
use crate::provider::TokenProvider;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    data: Option<LoginData>,
}

#[derive(Deserialize)]
struct LoginData {
    access_token: Option<String>,
    /// Token lifetime in milliseconds, as reported by the CMS.
    expires: Option<u64>,
}

/// Exchanges email/password for a short-lived access token on every call.
pub struct DirectusLogin {
    http: reqwest::Client,
    login_url: String,
    email: String,
    password: String,
}

impl DirectusLogin {
    /// # Errors
    ///
    /// Returns `AuthError::Transport` if the HTTP client cannot be built.
    pub fn new(
        endpoint: &str,
        email: impl Into<String>,
        password: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .user_agent("stories/0.1")
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            login_url: format!("{}/auth/login", endpoint.trim_end_matches('/')),
            email: email.into(),
            password: password.into(),
        })
    }

    async fn login(&self) -> Result<String, AuthError> {
        let resp = self
            .http
            .post(&self.login_url)
            .json(&LoginRequest {
                email: &self.email,
                password: &self.password,
            })
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        let resp = check_login_response(resp).await?;
        let body: LoginResponse = resp
            .json()
            .await
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;
        let data = body.data.ok_or(AuthError::MissingToken)?;
        let token = extract_token(data)?;
        Ok(token)
    }
}

impl TokenProvider for DirectusLogin {
    async fn access_token(&self) -> Result<String, AuthError> {
        self.login().await
    }
}

fn extract_token(data: LoginData) -> Result<String, AuthError> {
    let token = data
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)?;
    match decode_expiry(&token) {
        Ok(expires_at) => tracing::debug!(%expires_at, "obtained access token"),
        Err(_) => tracing::debug!(expires_ms = ?data.expires, "obtained opaque access token"),
    }
    Ok(token)
}

/// Map login status codes onto [`AuthError`].
///
/// 400/401/403 mean the credentials were refused; any other non-success
/// status is a login failure carrying the response body.
async fn check_login_response(resp: reqwest::Response) -> Result<reqwest::Response, AuthError> {
    let status = resp.status();
    if matches!(status.as_u16(), 400 | 401 | 403) {
        return Err(AuthError::Rejected {
            status: status.as_u16(),
        });
    }
    if !status.is_success() {
        return Err(AuthError::LoginFailed {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry::token_with_claims;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn unauthorized_is_rejection() {
        let err = check_login_response(mock_response(401, ""))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Rejected { status: 401 }));
        assert!(err.is_rejection());
    }

    #[tokio::test]
    async fn server_error_is_login_failure() {
        let err = check_login_response(mock_response(503, "maintenance"))
            .await
            .unwrap_err();
        match err {
            AuthError::LoginFailed { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_login_response(mock_response(200, "{}")).await.is_ok());
    }

    #[test]
    fn parses_login_payload() {
        let jwt = token_with_claims(r#"{"id":"user-1","exp":1710000900}"#);
        let body = format!(
            r#"{{"data":{{"access_token":"{jwt}","expires":900000,"refresh_token":"r"}}}}"#
        );
        let parsed: LoginResponse = serde_json::from_str(&body).unwrap();
        let token = extract_token(parsed.data.unwrap()).unwrap();
        assert_eq!(token, jwt);
    }

    #[test]
    fn missing_or_empty_token_is_an_error() {
        let parsed: LoginResponse =
            serde_json::from_str(r#"{"data":{"access_token":""}}"#).unwrap();
        let err = extract_token(parsed.data.unwrap()).unwrap_err();
        assert!(matches!(err, AuthError::MissingToken));

        let parsed: LoginResponse = serde_json::from_str(r#"{"errors":[]}"#).unwrap();
        assert!(parsed.data.is_none());
    }

    #[test]
    fn login_url_is_normalized() {
        let login = DirectusLogin::new(
            "https://cms.example.com/",
            "ops@example.com",
            "pw",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(login.login_url, "https://cms.example.com/auth/login");
    }
}
