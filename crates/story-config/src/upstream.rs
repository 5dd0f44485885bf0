//! Upstream content API configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_collection() -> String {
    "success_stories".to_string()
}

fn default_status() -> String {
    "published".to_string()
}

/// Records requested per page.
const fn default_page_size() -> u32 {
    100
}

/// Pages walked before an aggregation is abandoned.
const fn default_max_pages() -> u32 {
    1_000
}

/// Per-request ceiling in seconds.
const fn default_timeout_secs() -> u64 {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// CMS base URL (e.g., `https://cms.example.com`).
    #[serde(default)]
    pub endpoint: String,

    /// Collection holding the stories.
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Value required in the `status` field (`filter[status][_eq]`).
    #[serde(default = "default_status")]
    pub status: String,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            collection: default_collection(),
            status: default_status(),
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl UpstreamConfig {
    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty() && !self.collection.is_empty()
    }

    /// Endpoint without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 || self.page_size > 1_000 {
            return Err(ConfigError::InvalidValue {
                field: "upstream.page_size".into(),
                reason: format!("must be within 1..=1000, got {}", self.page_size),
            });
        }
        if self.max_pages == 0 {
            return Err(ConfigError::InvalidValue {
                field: "upstream.max_pages".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "upstream.timeout_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
