//! The aggregation loop: walk pages until the collection is exhausted.

use std::collections::HashSet;
use std::time::Duration;

use chrono::Utc;
use story_core::DatasetSnapshot;

use crate::error::FetchError;
use crate::page::Page;
use crate::source::{PageRequest, PageSource};

/// Walks a [`PageSource`] from page 1 until the collection ends.
///
/// The loop stops on the first page that is shorter than the page size or
/// that metadata marks as last. It never retries: one failed page fails the
/// whole aggregation. A collection that never signals its end fails with
/// [`FetchError::PageCeiling`] after `max_pages` requests.
pub struct Fetcher<S> {
    source: S,
    page_size: u32,
    max_pages: u32,
    request_timeout: Duration,
}

impl<S: PageSource> Fetcher<S> {
    /// `page_size` and `max_pages` are clamped to at least 1.
    #[must_use]
    pub fn new(source: S, page_size: u32, max_pages: u32, request_timeout: Duration) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
            max_pages: max_pages.max(1),
            request_timeout,
        }
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Retrieve every record of `collection`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Auth`] if the token is refused, and any other
    /// [`FetchError`] if a page request fails, times out, or the page
    /// ceiling is reached.
    pub async fn fetch_all(
        &self,
        collection: &str,
        token: &str,
    ) -> Result<DatasetSnapshot, FetchError> {
        let mut records = Vec::new();
        let mut seen = HashSet::new();

        for page in 1..=self.max_pages {
            let request = PageRequest {
                collection,
                token,
                page,
                limit: self.page_size,
            };
            let Page {
                records: batch,
                received,
                meta,
            } = tokio::time::timeout(self.request_timeout, self.source.fetch_page(request))
                .await
                .map_err(|_| FetchError::Timeout {
                    page,
                    after: self.request_timeout,
                })??;

            let short_page = received < self.page_size as usize;
            let last_by_meta = meta.is_some_and(|m| m.is_last(page, self.page_size));
            tracing::debug!(collection, page, received, short_page, last_by_meta, "fetched page");

            for record in batch {
                if let Some(id) = &record.id {
                    if !seen.insert(id.clone()) {
                        tracing::warn!(collection, page, %id, "dropping duplicate record id");
                        continue;
                    }
                }
                records.push(record);
            }

            if short_page || last_by_meta {
                tracing::info!(collection, pages = page, records = records.len(), "aggregation complete");
                return Ok(DatasetSnapshot::new(records, Utc::now()));
            }
        }

        Err(FetchError::PageCeiling {
            max_pages: self.max_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageMeta;
    use std::sync::atomic::{AtomicU32, Ordering};
    use story_core::{Record, RecordId};

    /// Serves a fixed list of ids in pages, optionally with metadata.
    struct VecSource {
        ids: Vec<u32>,
        with_meta: bool,
        calls: AtomicU32,
    }

    impl VecSource {
        fn new(total: u32, with_meta: bool) -> Self {
            Self {
                ids: (1..=total).collect(),
                with_meta,
                calls: AtomicU32::new(0),
            }
        }
    }

    impl PageSource for VecSource {
        async fn fetch_page(&self, request: PageRequest<'_>) -> Result<Page, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let start = ((request.page - 1) * request.limit) as usize;
            let records = self
                .ids
                .iter()
                .skip(start)
                .take(request.limit as usize)
                .map(|id| Record {
                    id: Some(RecordId::new(id.to_string())),
                    ..Record::default()
                })
                .collect();
            let total = u32::try_from(self.ids.len()).unwrap();
            let meta = self.with_meta.then(|| PageMeta {
                page: Some(request.page),
                page_count: Some(total.div_ceil(request.limit)),
                filter_count: None,
            });
            Ok(Page::from_records(records, meta))
        }
    }

    fn fetcher(source: VecSource, page_size: u32) -> Fetcher<VecSource> {
        Fetcher::new(source, page_size, 100, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn exact_multiple_needs_one_trailing_request_without_meta() {
        let f = fetcher(VecSource::new(200, false), 100);
        let snapshot = f.fetch_all("stories", "t").await.unwrap();
        assert_eq!(snapshot.len(), 200);
        assert_eq!(f.source().calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn meta_stops_on_last_full_page() {
        let f = fetcher(VecSource::new(200, true), 100);
        let snapshot = f.fetch_all("stories", "t").await.unwrap();
        assert_eq!(snapshot.len(), 200);
        assert_eq!(f.source().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_collection_is_empty_snapshot() {
        let f = fetcher(VecSource::new(0, false), 100);
        let snapshot = f.fetch_all("stories", "t").await.unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(f.source().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_page_size_is_clamped() {
        let f = fetcher(VecSource::new(3, false), 0);
        assert_eq!(f.page_size(), 1);
        let snapshot = f.fetch_all("stories", "t").await.unwrap();
        assert_eq!(snapshot.len(), 3);
    }
}
