//! Gallery domain objects.
//!
//! `Record` derives `Serialize`, `Deserialize`, and `JsonSchema` so cached
//! snapshots can be validated structurally before they are trusted.

mod record;
mod snapshot;

pub use record::{Record, RecordId};
pub use snapshot::DatasetSnapshot;
