//! # story-config
//!
//! Layered configuration loading for the stories gallery using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`STORIES_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `.stories/config.toml`
//! 4. User-level `~/.config/stories/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `STORIES_UPSTREAM__ENDPOINT` -> `upstream.endpoint`,
//! `STORIES_AUTH__TOKEN` -> `auth.token`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use story_config::StoriesConfig;
//!
//! let config = StoriesConfig::load().expect("config");
//! if config.upstream.is_configured() {
//!     println!("CMS: {}", config.upstream.base_url());
//! }
//! ```

mod auth;
mod cache;
mod error;
mod gallery;
mod upstream;

pub use auth::AuthConfig;
pub use cache::CacheConfig;
pub use error::ConfigError;
pub use gallery::GalleryConfig;
pub use upstream::UpstreamConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StoriesConfig {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
}

impl StoriesConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// `.env` files are the caller's concern; the CLI loads one before this.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Like [`Self::load`], with an extra TOML file layered above the
    /// project config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is out of range.
    pub fn load_from(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_with(extra).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the default figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        Self::figment_with(None)
    }

    fn figment_with(extra: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".stories/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit --config file
        if let Some(path) = extra {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("STORIES_").split("__"))
    }

    /// Reject values the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.upstream.validate()?;
        self.cache.validate()?;
        self.gallery.validate()
    }

    /// Fail unless both upstream and credentials are configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] naming the missing section.
    pub fn require_upstream(&self) -> Result<(), ConfigError> {
        if !self.upstream.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "upstream".into(),
            });
        }
        if !self.auth.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "auth".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stories").join("config.toml"))
    }
}
