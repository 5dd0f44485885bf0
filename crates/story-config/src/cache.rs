//! Session cache configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Snapshot lifetime in hours.
const fn default_ttl_hours() -> u64 {
    24
}

/// Ten years. Larger values cannot be turned into an expiry time.
const MAX_TTL_HOURS: u64 = 87_600;

const fn default_touch_unchanged() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Directory holding cache entries. Empty means the platform cache dir.
    #[serde(default)]
    pub dir: String,

    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,

    /// Refresh the stored timestamp when a refetch returns identical content.
    #[serde(default = "default_touch_unchanged")]
    pub touch_unchanged: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: String::new(),
            ttl_hours: default_ttl_hours(),
            touch_unchanged: default_touch_unchanged(),
        }
    }
}

impl CacheConfig {
    /// Configured directory, or `<platform cache dir>/stories`.
    pub fn resolved_dir(&self) -> Option<PathBuf> {
        if self.dir.is_empty() {
            dirs::cache_dir().map(|p| p.join("stories"))
        } else {
            Some(PathBuf::from(&self.dir))
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.ttl_hours == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cache.ttl_hours".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.ttl_hours > MAX_TTL_HOURS {
            return Err(ConfigError::InvalidValue {
                field: "cache.ttl_hours".into(),
                reason: format!("must be at most {MAX_TTL_HOURS}"),
            });
        }
        Ok(())
    }
}
