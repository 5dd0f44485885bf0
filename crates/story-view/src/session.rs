//! One gallery session: snapshot + selection -> facets, view, window.

use chrono::{DateTime, Utc};
use story_core::{DatasetSnapshot, FacetScope, Record, SortOrder};

use crate::facets::{FacetOptions, derive_facets};
use crate::filter::{FilterOptions, FilteredView, apply};
use crate::presenter::{Presenter, PresenterState};
use crate::probe::CapacityProbe;
use crate::selection::{FacetSelection, SelectionEvent};

/// Per-session settings. Fixed for the lifetime of a [`ViewSession`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionSettings {
    pub scope: FacetScope,
    pub sort: SortOrder,
    /// `0` disables the rolling window.
    pub window_months: u32,
    /// Reference time for the rolling window; wall clock when unset.
    pub now: Option<DateTime<Utc>>,
}

/// Holds the latest snapshot and selection and keeps every derivation
/// (facet options, filtered view, presentation window) in step with them.
pub struct ViewSession<P> {
    settings: SessionSettings,
    probe: P,
    snapshot: DatasetSnapshot,
    selection: FacetSelection,
    facets: FacetOptions,
    presenter: Presenter,
    closed: bool,
}

impl<P: CapacityProbe> ViewSession<P> {
    #[must_use]
    pub fn new(settings: SessionSettings, probe: P) -> Self {
        let snapshot = DatasetSnapshot::empty(settings.now.unwrap_or_else(Utc::now));
        let mut session = Self {
            settings,
            presenter: Presenter::init(FilteredView::empty(), probe.capacity()),
            probe,
            snapshot,
            selection: FacetSelection::new(),
            facets: FacetOptions::default(),
            closed: false,
        };
        session.recompute();
        session
    }

    /// Replace the dataset. Ignored after [`Self::teardown`]; returns
    /// whether it was applied.
    pub fn apply_snapshot(&mut self, snapshot: DatasetSnapshot) -> bool {
        if self.closed {
            tracing::debug!(records = snapshot.len(), "session closed; ignoring snapshot");
            return false;
        }
        self.snapshot = snapshot;
        self.recompute();
        true
    }

    /// Feed a selection event through the reducer and re-derive.
    pub fn select(&mut self, event: SelectionEvent) {
        let next = self.selection.reduce(event);
        if next == self.selection {
            return;
        }
        self.selection = next;
        self.recompute();
    }

    /// Re-derive facets and the filtered view from the current snapshot and
    /// selection, restarting the presenter at its first batch.
    pub fn recompute(&mut self) {
        let now = self.settings.now.unwrap_or_else(Utc::now);
        let options = FilterOptions::new(now)
            .sorted(self.settings.sort)
            .windowed(self.settings.window_months);
        let view = apply(&self.snapshot, &self.selection, &options);

        self.facets = match self.settings.scope {
            FacetScope::Full => derive_facets(self.snapshot.records()),
            FacetScope::Narrowing => derive_facets(view.iter()),
        };
        self.presenter = Presenter::init(view, self.probe.capacity());
        tracing::debug!(
            matched = self.presenter.total(),
            visible = self.presenter.visible(),
            "session recomputed"
        );
    }

    /// Viewport changed: take the new probe and resize the current window.
    pub fn resize(&mut self, probe: P) {
        self.probe = probe;
        self.presenter.resize(self.probe.capacity());
    }

    pub fn load_more(&mut self) -> usize {
        self.presenter.load_more()
    }

    pub fn signal_load_more(&mut self) -> bool {
        self.presenter.signal_load_more()
    }

    pub fn flush(&mut self) -> bool {
        self.presenter.flush()
    }

    /// Drop the dataset and ignore any snapshot that arrives later.
    pub fn teardown(&mut self) {
        self.closed = true;
        self.snapshot = DatasetSnapshot::empty(self.snapshot.captured_at());
        self.presenter = Presenter::init(FilteredView::empty(), 1);
        self.facets = FacetOptions::default();
    }

    pub fn window(&self) -> impl ExactSizeIterator<Item = &Record> + '_ {
        self.presenter.window()
    }

    #[must_use]
    pub const fn facets(&self) -> &FacetOptions {
        &self.facets
    }

    #[must_use]
    pub const fn selection(&self) -> &FacetSelection {
        &self.selection
    }

    #[must_use]
    pub const fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    #[must_use]
    pub fn state(&self) -> PresenterState {
        self.presenter.state()
    }

    #[must_use]
    pub const fn snapshot(&self) -> &DatasetSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub const fn probe(&self) -> &P {
        &self.probe
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }
}
