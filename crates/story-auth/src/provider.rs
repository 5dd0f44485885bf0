use std::future::Future;

use crate::error::AuthError;
use crate::login::DirectusLogin;

/// Source of short-lived bearer tokens for the content API.
pub trait TokenProvider {
    fn access_token(&self) -> impl Future<Output = Result<String, AuthError>> + Send;
}

/// A pre-issued token, returned as-is.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Result<String, AuthError> {
        if self.0.trim().is_empty() {
            return Err(AuthError::MissingToken);
        }
        Ok(self.0.clone())
    }
}

/// Runtime choice between the credential sources.
pub enum Credentials {
    Static(StaticToken),
    Login(DirectusLogin),
}

impl TokenProvider for Credentials {
    async fn access_token(&self) -> Result<String, AuthError> {
        match self {
            Self::Static(token) => token.access_token().await,
            Self::Login(login) => login.access_token().await,
        }
    }
}
