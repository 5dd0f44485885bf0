//! Facet selection state and its reducer.

use std::collections::BTreeMap;

use serde::Serialize;
use story_core::{FacetName, MonthPeriod};

/// A user action on the selection controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// Choose `value` for `facet`. An empty value is the "All" option.
    Select { facet: FacetName, value: String },
    Clear(FacetName),
    ClearAll,
}

/// Active facet selections. Unselected facets match everything.
///
/// The value is immutable; [`FacetSelection::reduce`] returns the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FacetSelection {
    active: BTreeMap<FacetName, String>,
}

impl FacetSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, facet: FacetName) -> Option<&str> {
        self.active.get(&facet).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Active `(facet, value)` pairs in facet order.
    pub fn active(&self) -> impl Iterator<Item = (FacetName, &str)> {
        self.active.iter().map(|(facet, value)| (*facet, value.as_str()))
    }

    /// Apply `event` and return the resulting selection.
    #[must_use]
    pub fn reduce(&self, event: SelectionEvent) -> Self {
        let mut next = self.clone();
        match event {
            SelectionEvent::Select { facet, value } => {
                if value.is_empty() {
                    next.active.remove(&facet);
                } else {
                    next.active.insert(facet, normalize(facet, value));
                }
            }
            SelectionEvent::Clear(facet) => {
                next.active.remove(&facet);
            }
            SelectionEvent::ClearAll => next.active.clear(),
        }
        next
    }

    /// Shorthand for a `Select` event.
    #[must_use]
    pub fn with(self, facet: FacetName, value: impl Into<String>) -> Self {
        self.reduce(SelectionEvent::Select {
            facet,
            value: value.into(),
        })
    }
}

/// Month selections are stored as period display keys so `2024-03` and
/// `march 2024` select the same thing as `March 2024`. Values that are not a
/// recognizable month are kept verbatim and simply match nothing.
fn normalize(facet: FacetName, value: String) -> String {
    if facet != FacetName::Month {
        return value;
    }
    MonthPeriod::parse_key(&value)
        .or_else(|| MonthPeriod::from_raw(&value))
        .map_or(value, MonthPeriod::key)
}
