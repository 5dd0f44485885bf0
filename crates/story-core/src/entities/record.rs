use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::FacetName;
use crate::errors::CoreError;
use crate::period::{MonthPeriod, parse_timestamp};

/// Opaque record key. Upstream may send it as a string or an integer; it is
/// always carried as a string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Text(id) => Self(id),
            Wire::Signed(id) => Self(id.to_string()),
            Wire::Unsigned(id) => Self(id.to_string()),
        })
    }
}

/// One published success story.
///
/// Every attribute is optional on the wire: a record missing a required
/// attribute is kept in the snapshot but never matches a filter and never
/// contributes facet options (see [`Record::is_well_formed`]). Attributes the
/// gallery does not interpret are kept in `extra` so a cached snapshot
/// round-trips what upstream sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_detail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    /// Raw point-in-time value; see [`Record::period`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,

    /// Asset reference used to build the display URL.
    #[serde(
        default,
        rename = "learner_image",
        alias = "image_ref",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_ref: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Record {
    /// Parsed `month` timestamp, if present and well-formed.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.month.as_deref().and_then(parse_timestamp)
    }

    /// Calendar month of `month`.
    #[must_use]
    pub fn period(&self) -> Option<MonthPeriod> {
        self.timestamp().map(|at| MonthPeriod::of(&at))
    }

    /// Normalized value this record contributes to `facet`.
    ///
    /// String facets are returned verbatim (no trimming or case folding);
    /// the month facet is returned as its period display key.
    #[must_use]
    pub fn facet_value(&self, facet: FacetName) -> Option<String> {
        match facet {
            FacetName::Program => self.program_detail.clone(),
            FacetName::Company => self.company_name.clone(),
            FacetName::Month => self.period().map(MonthPeriod::key),
        }
    }

    /// Check that every attribute the pipeline relies on is present.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the first missing or
    /// unparseable attribute.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.is_none() {
            return Err(CoreError::Validation("record has no id".into()));
        }
        let id = self.id.as_ref().map_or("", RecordId::as_str);
        if self.program_detail.is_none() {
            return Err(CoreError::Validation(format!(
                "record {id} has no program_detail"
            )));
        }
        if self.company_name.is_none() {
            return Err(CoreError::Validation(format!(
                "record {id} has no company_name"
            )));
        }
        if self.period().is_none() {
            return Err(CoreError::Validation(format!(
                "record {id} has a missing or unparseable month"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.validate().is_ok()
    }
}
