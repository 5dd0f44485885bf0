use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::Record;

/// Immutable result of one complete aggregation run.
///
/// Records sit behind a shared slice so filtered views and presentation
/// windows can index into them without copying. A refresh produces a new
/// snapshot; an existing one is never mutated.
#[derive(Debug, Clone)]
pub struct DatasetSnapshot {
    records: Arc<[Record]>,
    captured_at: DateTime<Utc>,
}

impl DatasetSnapshot {
    #[must_use]
    pub fn new(records: Vec<Record>, captured_at: DateTime<Utc>) -> Self {
        Self {
            records: records.into(),
            captured_at,
        }
    }

    #[must_use]
    pub fn empty(captured_at: DateTime<Utc>) -> Self {
        Self::new(Vec::new(), captured_at)
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Shared handle to the record slice.
    #[must_use]
    pub fn shared(&self) -> Arc<[Record]> {
        Arc::clone(&self.records)
    }

    #[must_use]
    pub const fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records that pass [`Record::is_well_formed`].
    #[must_use]
    pub fn well_formed_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_well_formed()).count()
    }
}
