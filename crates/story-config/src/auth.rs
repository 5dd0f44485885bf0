//! Upstream credential configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// CMS account email for password login.
    #[serde(default)]
    pub email: String,

    /// CMS account password for password login.
    #[serde(default)]
    pub password: String,

    /// Pre-issued bearer token. Takes precedence over email/password.
    #[serde(default)]
    pub token: String,
}

impl AuthConfig {
    /// Check if any credential source is available.
    pub fn is_configured(&self) -> bool {
        self.has_static_token() || self.has_login()
    }

    pub fn has_static_token(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn has_login(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        assert!(!AuthConfig::default().is_configured());
    }

    #[test]
    fn configured_with_login() {
        let config = AuthConfig {
            email: "ops@example.com".into(),
            password: "hunter2".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
        assert!(!config.has_static_token());
    }

    #[test]
    fn not_configured_when_missing_password() {
        let config = AuthConfig {
            email: "ops@example.com".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }
}
