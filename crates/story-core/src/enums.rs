//! Facet names, sort orders, and facet scopes.
//!
//! All enums use `snake_case` serialization so they read the same in TOML
//! config, JSON output, and CLI arguments.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// FacetName
// ---------------------------------------------------------------------------

/// A filterable record attribute.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FacetName {
    Program,
    Company,
    Month,
}

impl FacetName {
    /// Every facet, in the order selection controls are laid out.
    pub const ALL: [Self; 3] = [Self::Program, Self::Company, Self::Month];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Program => "program",
            Self::Company => "company",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for FacetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FacetName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "program" | "program_detail" => Ok(Self::Program),
            "company" | "company_name" => Ok(Self::Company),
            "month" => Ok(Self::Month),
            _ => Err(CoreError::Parse {
                kind: "facet",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// SortOrder
// ---------------------------------------------------------------------------

/// Ordering applied to a filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Snapshot order, as upstream returned it.
    #[default]
    Source,
    /// Month descending; records within the same month keep snapshot order.
    Recent,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Recent => "recent",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FacetScope
// ---------------------------------------------------------------------------

/// Which records facet option lists are derived from.
///
/// Fixed for the lifetime of a view session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FacetScope {
    /// Option lists come from the whole snapshot and never change with the selection.
    #[default]
    Full,
    /// Option lists come from the currently filtered view.
    Narrowing,
}

impl FacetScope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Narrowing => "narrowing",
        }
    }
}

impl fmt::Display for FacetScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
