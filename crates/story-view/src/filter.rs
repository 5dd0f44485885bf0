//! Filter Engine: snapshot + selection -> ordered matching subset.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use story_core::{DatasetSnapshot, FacetName, MonthPeriod, Record, SortOrder};

use crate::selection::FacetSelection;

/// Knobs that are not part of the user's facet selection.
#[derive(Debug, Clone, Copy)]
pub struct FilterOptions {
    pub sort: SortOrder,
    /// Keep only the last N calendar months (including the current one).
    pub window_months: Option<u32>,
    /// Reference time for the rolling window.
    pub now: DateTime<Utc>,
}

impl FilterOptions {
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            sort: SortOrder::Source,
            window_months: None,
            now,
        }
    }

    #[must_use]
    pub const fn sorted(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// `0` disables the window.
    #[must_use]
    pub const fn windowed(mut self, months: u32) -> Self {
        self.window_months = if months == 0 { None } else { Some(months) };
        self
    }
}

/// Ordered subsequence of a snapshot, held as indices into its shared
/// record slice.
#[derive(Debug, Clone)]
pub struct FilteredView {
    records: Arc<[Record]>,
    indices: Vec<usize>,
}

impl FilteredView {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            indices: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Record> {
        self.indices.get(position).map(|&i| &self.records[i])
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Record> + '_ {
        self.indices.iter().map(|&i| &self.records[i])
    }

    /// The first `n` records (or all of them if fewer).
    pub fn prefix(&self, n: usize) -> impl ExactSizeIterator<Item = &Record> + '_ {
        self.indices[..n.min(self.indices.len())]
            .iter()
            .map(|&i| &self.records[i])
    }

    /// Positions of the matching records in the source snapshot.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Materialize the view as a snapshot of its own.
    #[must_use]
    pub fn to_snapshot(&self, captured_at: DateTime<Utc>) -> DatasetSnapshot {
        DatasetSnapshot::new(self.iter().cloned().collect(), captured_at)
    }
}

/// Compiled form of a selection so each record is checked without
/// re-normalizing the selection.
struct Matcher<'a> {
    program: Option<&'a str>,
    company: Option<&'a str>,
    month: Option<&'a str>,
    window: Option<(MonthPeriod, DateTime<Utc>)>,
}

impl<'a> Matcher<'a> {
    fn new(selection: &'a FacetSelection, options: &FilterOptions) -> Self {
        let window = options.window_months.map(|months| {
            let floor = MonthPeriod::of(&options.now).minus_months(months.saturating_sub(1));
            (floor, options.now)
        });
        Self {
            program: selection.get(FacetName::Program),
            company: selection.get(FacetName::Company),
            month: selection.get(FacetName::Month),
            window,
        }
    }

    fn matches(&self, record: &Record) -> bool {
        let (Some(_), Some(program), Some(company), Some(at)) = (
            record.id.as_ref(),
            record.program_detail.as_deref(),
            record.company_name.as_deref(),
            record.timestamp(),
        ) else {
            return false;
        };
        let period = MonthPeriod::of(&at);

        if self.program.is_some_and(|want| want != program) {
            return false;
        }
        if self.company.is_some_and(|want| want != company) {
            return false;
        }
        if self.month.is_some_and(|want| want != period.key()) {
            return false;
        }
        if let Some((floor, now)) = self.window {
            if period < floor || at > now {
                return false;
            }
        }
        true
    }
}

/// Compute the records of `snapshot` that satisfy every active facet in
/// `selection`. Pure and deterministic; malformed records never match.
#[must_use]
pub fn apply(
    snapshot: &DatasetSnapshot,
    selection: &FacetSelection,
    options: &FilterOptions,
) -> FilteredView {
    let matcher = Matcher::new(selection, options);
    let records = snapshot.shared();
    let mut indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| matcher.matches(record))
        .map(|(i, _)| i)
        .collect();

    if options.sort == SortOrder::Recent {
        // Stable: ties keep snapshot order.
        indices.sort_by(|&a, &b| records[b].period().cmp(&records[a].period()));
    }

    tracing::debug!(
        total = records.len(),
        matched = indices.len(),
        filters = selection.active().count(),
        "applied filter"
    );
    FilteredView { records, indices }
}
