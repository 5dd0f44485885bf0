//! Aggregation loop behavior against scripted page sources.

use std::sync::Mutex;
use std::time::Duration;

use pretty_assertions::assert_eq;
use rstest::rstest;
use story_core::{Record, RecordId};
use story_upstream::{FetchError, Fetcher, Page, PageMeta, PageRequest, PageSource};

fn record(id: usize, company: &str) -> Record {
    Record {
        id: Some(RecordId::new(id.to_string())),
        program_detail: Some("Data Analytics".into()),
        company_name: Some(company.into()),
        month: Some("2024-03-05T00:00:00Z".into()),
        ..Record::default()
    }
}

/// Serves `total` records and logs every requested page.
struct Collection {
    records: Vec<Record>,
    requests: Mutex<Vec<PageRequest<'static>>>,
}

impl Collection {
    fn sized(total: usize) -> Self {
        Self::from_records((1..=total).map(|i| record(i, "Globex")).collect())
    }

    fn from_records(records: Vec<Record>) -> Self {
        Self {
            records,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn pages_requested(&self) -> Vec<u32> {
        self.requests.lock().unwrap().iter().map(|r| r.page).collect()
    }
}

impl PageSource for Collection {
    async fn fetch_page(&self, request: PageRequest<'_>) -> Result<Page, FetchError> {
        self.requests.lock().unwrap().push(PageRequest {
            collection: "logged",
            token: "logged",
            page: request.page,
            limit: request.limit,
        });
        let start = (request.page as usize - 1) * request.limit as usize;
        let records = self
            .records
            .iter()
            .skip(start)
            .take(request.limit as usize)
            .cloned()
            .collect();
        Ok(Page::from_records(records, None))
    }
}

fn fetcher<S: PageSource>(source: S, page_size: u32) -> Fetcher<S> {
    Fetcher::new(source, page_size, 1_000, Duration::from_secs(5))
}

#[rstest]
#[case(0, 100)]
#[case(1, 100)]
#[case(99, 100)]
#[case(100, 100)]
#[case(101, 100)]
#[case(250, 100)]
#[case(57, 7)]
#[case(49, 7)]
#[tokio::test]
async fn returns_concatenation_within_request_bound(#[case] total: usize, #[case] page_size: u32) {
    let f = fetcher(Collection::sized(total), page_size);
    let snapshot = f.fetch_all("success_stories", "token").await.unwrap();

    let ids: Vec<String> = snapshot
        .records()
        .iter()
        .map(|r| r.id.as_ref().unwrap().to_string())
        .collect();
    let expected: Vec<String> = (1..=total).map(|i| i.to_string()).collect();
    assert_eq!(ids, expected);

    let bound = total.div_ceil(page_size as usize) + 1;
    let pages = f.source().pages_requested();
    assert!(pages.len() <= bound, "{} requests > bound {bound}", pages.len());
    let in_order: Vec<u32> = (1..=u32::try_from(pages.len()).unwrap()).collect();
    assert_eq!(pages, in_order);
}

#[tokio::test]
async fn two_hundred_fifty_records_take_three_requests() {
    let f = fetcher(Collection::sized(250), 100);
    let snapshot = f.fetch_all("success_stories", "token").await.unwrap();
    assert_eq!(snapshot.len(), 250);
    assert_eq!(f.source().pages_requested(), vec![1, 2, 3]);
}

/// Fails on a chosen page.
struct FailingOn {
    page: u32,
    error: fn() -> FetchError,
    calls: Mutex<u32>,
}

impl PageSource for FailingOn {
    async fn fetch_page(&self, request: PageRequest<'_>) -> Result<Page, FetchError> {
        *self.calls.lock().unwrap() += 1;
        if request.page == self.page {
            return Err((self.error)());
        }
        let records = (0..request.limit as usize)
            .map(|i| record(i + (request.page as usize) * 1_000, "Acme"))
            .collect();
        Ok(Page::from_records(records, None))
    }
}

#[tokio::test]
async fn failed_page_aborts_without_retry() {
    let source = FailingOn {
        page: 2,
        error: || FetchError::Api {
            status: 500,
            message: "boom".into(),
        },
        calls: Mutex::new(0),
    };
    let f = fetcher(source, 10);
    let err = f.fetch_all("success_stories", "token").await.unwrap_err();
    assert!(matches!(err, FetchError::Api { status: 500, .. }));
    assert!(!err.is_auth());
    assert_eq!(*f.source().calls.lock().unwrap(), 2);
}

#[tokio::test]
async fn rejected_token_is_auth_error() {
    let source = FailingOn {
        page: 1,
        error: || FetchError::Auth { status: 401 },
        calls: Mutex::new(0),
    };
    let err = fetcher(source, 10)
        .fetch_all("success_stories", "expired")
        .await
        .unwrap_err();
    assert!(err.is_auth());
}

/// Always returns a full page and never reports an end.
struct Endless;

impl PageSource for Endless {
    async fn fetch_page(&self, request: PageRequest<'_>) -> Result<Page, FetchError> {
        let records = (0..request.limit as usize)
            .map(|i| record(i + request.page as usize * 10_000, "Initech"))
            .collect();
        Ok(Page::from_records(records, Some(PageMeta::default())))
    }
}

#[tokio::test]
async fn endless_collection_hits_page_ceiling() {
    let f = Fetcher::new(Endless, 5, 4, Duration::from_secs(5));
    let err = f.fetch_all("success_stories", "token").await.unwrap_err();
    assert!(matches!(err, FetchError::PageCeiling { max_pages: 4 }));
}

/// Never answers.
struct Hanging;

impl PageSource for Hanging {
    async fn fetch_page(&self, _request: PageRequest<'_>) -> Result<Page, FetchError> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn hanging_page_times_out() {
    let f = Fetcher::new(Hanging, 100, 10, Duration::from_millis(50));
    let err = f.fetch_all("success_stories", "token").await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout { page: 1, .. }));
}

#[tokio::test]
async fn duplicate_ids_across_pages_are_dropped() {
    // Page 2 repeats the last record of page 1 (offset drift).
    let mut records: Vec<Record> = (1..=3).map(|i| record(i, "Acme")).collect();
    records.push(record(3, "Acme"));
    records.push(record(4, "Acme"));
    let f = fetcher(Collection::from_records(records), 3);
    let snapshot = f.fetch_all("success_stories", "token").await.unwrap();
    let ids: Vec<&str> = snapshot
        .records()
        .iter()
        .map(|r| r.id.as_ref().unwrap().as_str())
        .collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
}
