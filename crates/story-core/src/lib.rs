//! # story-core
//!
//! Core types and error types for the stories gallery.
//!
//! This crate provides the foundational types shared across all story crates:
//! - [`entities::Record`] and [`entities::DatasetSnapshot`]
//! - Facet, sort, and scope enums
//! - Month period normalization for the `month` facet
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod period;

pub use entities::{DatasetSnapshot, Record, RecordId};
pub use enums::{FacetName, FacetScope, SortOrder};
pub use errors::CoreError;
pub use period::MonthPeriod;
