//! Batch Presenter: reveals a filtered view one viewport-sized batch at a
//! time.

use serde::Serialize;
use story_core::Record;

use crate::filter::FilteredView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenterState {
    /// The view has no records.
    Empty,
    /// Some records are still hidden.
    Partial,
    /// Every record is revealed.
    Exhausted,
}

/// Growing prefix of a [`FilteredView`].
///
/// The window never shrinks for a given view. A filter change builds a new
/// presenter with [`Presenter::init`].
#[derive(Debug, Clone)]
pub struct Presenter {
    view: FilteredView,
    batch: usize,
    revealed: usize,
    pages: usize,
    pending: bool,
}

impl Presenter {
    /// Start presenting `view` with the first batch already revealed.
    #[must_use]
    pub fn init(view: FilteredView, batch_size: usize) -> Self {
        let batch = batch_size.max(1);
        let revealed = batch.min(view.len());
        Self {
            view,
            batch,
            revealed,
            pages: 1,
            pending: false,
        }
    }

    /// Reveal one more batch (or the remainder). Returns how many records
    /// became visible.
    pub fn load_more(&mut self) -> usize {
        if self.state() != PresenterState::Partial {
            return 0;
        }
        let before = self.revealed;
        self.revealed = (self.revealed + self.batch).min(self.view.len());
        self.pages += 1;
        tracing::debug!(
            revealed = self.revealed,
            total = self.view.len(),
            pages = self.pages,
            "revealed batch"
        );
        self.revealed - before
    }

    /// Adopt a new batch size after a viewport change, revealing up to
    /// `batch × pages` records without hiding any that are already shown.
    pub fn resize(&mut self, batch_size: usize) {
        self.batch = batch_size.max(1);
        let target = self.batch.saturating_mul(self.pages).min(self.view.len());
        self.revealed = self.revealed.max(target);
    }

    /// Scroll sentinel reached. Returns `true` if this scheduled a new
    /// extension; repeated signals before [`Presenter::flush`] are absorbed.
    pub fn signal_load_more(&mut self) -> bool {
        if self.pending || self.state() != PresenterState::Partial {
            return false;
        }
        self.pending = true;
        true
    }

    /// Apply the pending extension, if any. Returns `true` if one was applied.
    pub fn flush(&mut self) -> bool {
        if !std::mem::take(&mut self.pending) {
            return false;
        }
        self.load_more();
        true
    }

    pub fn window(&self) -> impl ExactSizeIterator<Item = &Record> + '_ {
        self.view.prefix(self.revealed)
    }

    #[must_use]
    pub const fn visible(&self) -> usize {
        self.revealed
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.view.len()
    }

    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch
    }

    #[must_use]
    pub const fn pages(&self) -> usize {
        self.pages
    }

    #[must_use]
    pub const fn view(&self) -> &FilteredView {
        &self.view
    }

    #[must_use]
    pub fn state(&self) -> PresenterState {
        if self.view.is_empty() {
            PresenterState::Empty
        } else if self.revealed >= self.view.len() {
            PresenterState::Exhausted
        } else {
            PresenterState::Partial
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterOptions, apply};
    use crate::selection::FacetSelection;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use story_core::{DatasetSnapshot, RecordId};

    fn view(len: usize) -> FilteredView {
        let records = (0..len)
            .map(|i| Record {
                id: Some(RecordId::new(i.to_string())),
                program_detail: Some("Cloud".into()),
                company_name: Some("Acme".into()),
                month: Some("2024-01-10".into()),
                ..Record::default()
            })
            .collect();
        let now = Utc::now();
        apply(
            &DatasetSnapshot::new(records, now),
            &FacetSelection::new(),
            &FilterOptions::new(now),
        )
    }

    #[rstest]
    #[case(50, 20)]
    #[case(40, 20)]
    #[case(1, 20)]
    #[case(7, 1)]
    #[case(100, 33)]
    fn exhausts_after_ceil_steps(#[case] len: usize, #[case] batch: usize) {
        let mut presenter = Presenter::init(view(len), batch);
        let mut steps = 1;
        let mut last = presenter.visible();
        while presenter.state() == PresenterState::Partial {
            presenter.load_more();
            steps += 1;
            assert!(presenter.visible() > last);
            assert!(presenter.visible() <= len);
            last = presenter.visible();
        }
        assert_eq!(presenter.state(), PresenterState::Exhausted);
        assert_eq!(steps, len.div_ceil(batch));
        assert_eq!(presenter.window().count(), len);
    }

    #[test]
    fn empty_view_is_empty_state() {
        let mut presenter = Presenter::init(view(0), 20);
        assert_eq!(presenter.state(), PresenterState::Empty);
        assert_eq!(presenter.load_more(), 0);
        assert!(!presenter.signal_load_more());
        assert_eq!(presenter.window().count(), 0);
    }

    #[test]
    fn load_more_after_exhausted_is_noop() {
        let mut presenter = Presenter::init(view(5), 10);
        assert_eq!(presenter.state(), PresenterState::Exhausted);
        assert_eq!(presenter.load_more(), 0);
        assert_eq!(presenter.pages(), 1);
    }

    #[test]
    fn zero_batch_is_clamped() {
        let mut presenter = Presenter::init(view(3), 0);
        assert_eq!(presenter.batch_size(), 1);
        assert_eq!(presenter.visible(), 1);
        presenter.resize(0);
        assert_eq!(presenter.batch_size(), 1);
    }

    #[test]
    fn resize_grows_to_pages_times_batch() {
        let mut presenter = Presenter::init(view(100), 10);
        presenter.load_more();
        assert_eq!(presenter.visible(), 20);

        presenter.resize(25);
        assert_eq!(presenter.visible(), 50);
        assert_eq!(presenter.load_more(), 25);
        assert_eq!(presenter.visible(), 75);
    }

    #[test]
    fn resize_smaller_never_hides_records() {
        let mut presenter = Presenter::init(view(100), 30);
        presenter.load_more();
        assert_eq!(presenter.visible(), 60);
        presenter.resize(10);
        assert_eq!(presenter.visible(), 60);
        assert_eq!(presenter.load_more(), 10);
    }

    #[test]
    fn repeated_signals_extend_once_per_flush() {
        let mut presenter = Presenter::init(view(100), 20);
        assert!(presenter.signal_load_more());
        assert!(!presenter.signal_load_more());
        assert!(!presenter.signal_load_more());
        assert!(presenter.flush());
        assert_eq!(presenter.visible(), 40);
        assert!(!presenter.flush());
        assert_eq!(presenter.visible(), 40);
    }

    #[test]
    fn signal_when_exhausted_is_absorbed() {
        let mut presenter = Presenter::init(view(20), 20);
        assert!(!presenter.signal_load_more());
        assert!(!presenter.flush());
    }
}
