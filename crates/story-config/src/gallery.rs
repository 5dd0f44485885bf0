//! Gallery presentation configuration.

use serde::{Deserialize, Serialize};
use story_core::{FacetScope, SortOrder};

use crate::ConfigError;

const fn default_viewport_width() -> u32 {
    1280
}

const fn default_viewport_height() -> u32 {
    800
}

const fn default_tile_width() -> u32 {
    220
}

const fn default_tile_height() -> u32 {
    260
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GalleryConfig {
    /// Where facet option lists come from.
    #[serde(default)]
    pub facet_scope: FacetScope,

    #[serde(default)]
    pub sort: SortOrder,

    /// Rolling window in months (0 disables the window).
    #[serde(default)]
    pub window_months: u32,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,

    #[serde(default = "default_tile_width")]
    pub tile_width: u32,

    #[serde(default = "default_tile_height")]
    pub tile_height: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            facet_scope: FacetScope::default(),
            sort: SortOrder::default(),
            window_months: 0,
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            tile_width: default_tile_width(),
            tile_height: default_tile_height(),
        }
    }
}

impl GalleryConfig {
    /// Rolling window length, if enabled.
    pub const fn window(&self) -> Option<u32> {
        if self.window_months == 0 {
            None
        } else {
            Some(self.window_months)
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("gallery.viewport_width", self.viewport_width),
            ("gallery.viewport_height", self.viewport_height),
            ("gallery.tile_width", self.tile_width),
            ("gallery.tile_height", self.tile_height),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    reason: "must be at least 1".into(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GalleryConfig::default();
        assert_eq!(config.facet_scope, FacetScope::Full);
        assert_eq!(config.sort, SortOrder::Source);
        assert_eq!(config.window(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_tile_is_rejected() {
        let config = GalleryConfig {
            tile_height: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
