//! Freshness, corruption, and write semantics against an on-disk store.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use story_cache::{
    ARTICLES_KEY, CacheLookup, CacheState, CacheStore, FileStore, SessionCache, TIMESTAMP_KEY,
    WriteOutcome,
};
use story_core::{DatasetSnapshot, Record, RecordId};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 9, 30, 0).unwrap()
}

fn snapshot(n: usize) -> DatasetSnapshot {
    let records = (1..=n)
        .map(|i| Record {
            id: Some(RecordId::new(i.to_string())),
            program_detail: Some("UX Design".into()),
            company_name: Some(if i % 2 == 0 { "Acme" } else { "Globex" }.into()),
            month: Some("2024-02-14T00:00:00Z".into()),
            image_ref: Some(format!("img-{i}")),
            ..Record::default()
        })
        .collect();
    DatasetSnapshot::new(records, t0())
}

fn cache(dir: &std::path::Path) -> SessionCache<FileStore> {
    SessionCache::new(FileStore::new(dir), TimeDelta::hours(24))
}

#[rstest]
#[case(TimeDelta::zero(), false)]
#[case(TimeDelta::hours(23) + TimeDelta::minutes(59), false)]
#[case(TimeDelta::hours(24) + TimeDelta::seconds(1), true)]
#[case(TimeDelta::days(3), true)]
fn refetch_follows_ttl(#[case] elapsed: TimeDelta, #[case] refetch: bool) {
    let tmp = tempfile::tempdir().unwrap();
    let cache = cache(tmp.path());
    cache.write(&snapshot(3), t0()).unwrap();
    assert_eq!(cache.should_refetch(t0() + elapsed), refetch);
}

#[test]
fn read_returns_stored_records_with_write_time() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = cache(tmp.path());
    let original = snapshot(4);
    cache.write(&original, t0()).unwrap();

    let later = t0() + TimeDelta::hours(1);
    let read = cache.read(later).unwrap();
    assert_eq!(read.records(), original.records());
    assert_eq!(read.captured_at(), t0());

    // Stale snapshots are still readable; only freshness changes.
    let stale = t0() + TimeDelta::days(2);
    assert!(matches!(cache.lookup(stale), CacheLookup::Stale(_)));
    assert_eq!(cache.read(stale).unwrap().len(), 4);
}

#[test]
fn timestamp_is_epoch_millis() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = cache(tmp.path());
    cache.write(&snapshot(1), t0()).unwrap();
    let raw = cache.store().get(TIMESTAMP_KEY).unwrap().unwrap();
    assert_eq!(raw, t0().timestamp_millis().to_string());
}

#[rstest]
#[case::not_json("{{{ definitely not json")]
#[case::wrong_shape(r#"{"records": []}"#)]
#[case::wrong_field_type(r#"[{"id": "1", "company_name": 42}]"#)]
fn corrupt_articles_are_a_miss(#[case] payload: &str) {
    let tmp = tempfile::tempdir().unwrap();
    let cache = cache(tmp.path());
    cache.write(&snapshot(2), t0()).unwrap();
    cache.store().set(ARTICLES_KEY, payload).unwrap();

    assert!(cache.read(t0()).is_none());
    assert!(cache.should_refetch(t0()));
    assert_eq!(cache.status(t0()).state, CacheState::Corrupt);
}

#[rstest]
#[case::garbage("yesterday")]
#[case::future("1893456000000")]
fn bad_timestamp_is_a_miss(#[case] stamp: &str) {
    let tmp = tempfile::tempdir().unwrap();
    let cache = cache(tmp.path());
    cache.write(&snapshot(2), t0()).unwrap();
    cache.store().set(TIMESTAMP_KEY, stamp).unwrap();
    assert!(cache.should_refetch(t0()));
    assert!(cache.read(t0()).is_none());
}

#[test]
fn identical_write_touches_timestamp_only() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = cache(tmp.path());
    let snap = snapshot(3);
    assert_eq!(cache.write(&snap, t0()).unwrap(), WriteOutcome::Written);

    let later = t0() + TimeDelta::hours(20);
    assert_eq!(
        cache.write(&snap, later).unwrap(),
        WriteOutcome::Unchanged { touched: true }
    );
    // Fresh relative to the touched time, not the first write.
    assert!(!cache.should_refetch(later + TimeDelta::hours(23)));
}

#[test]
fn identical_write_without_touch_keeps_old_timestamp() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = cache(tmp.path()).with_touch_unchanged(false);
    let snap = snapshot(3);
    cache.write(&snap, t0()).unwrap();

    let later = t0() + TimeDelta::hours(20);
    assert_eq!(
        cache.write(&snap, later).unwrap(),
        WriteOutcome::Unchanged { touched: false }
    );
    assert!(cache.should_refetch(later + TimeDelta::hours(5)));
}

#[test]
fn changed_write_replaces_payload() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = cache(tmp.path());
    cache.write(&snapshot(3), t0()).unwrap();
    assert_eq!(
        cache.write(&snapshot(5), t0()).unwrap(),
        WriteOutcome::Written
    );
    assert_eq!(cache.read(t0()).unwrap().len(), 5);
}

#[test]
fn clear_removes_both_entries() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = cache(tmp.path());
    cache.write(&snapshot(3), t0()).unwrap();
    cache.clear().unwrap();
    assert!(cache.store().get(ARTICLES_KEY).unwrap().is_none());
    assert!(cache.store().get(TIMESTAMP_KEY).unwrap().is_none());
    assert_eq!(cache.status(t0()).state, CacheState::Missing);
    // Clearing twice is fine.
    cache.clear().unwrap();
}

#[test]
fn status_reports_expiry() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = cache(tmp.path());
    cache.write(&snapshot(6), t0()).unwrap();
    let status = cache.status(t0() + TimeDelta::hours(2));
    assert_eq!(status.state, CacheState::Fresh);
    assert_eq!(status.records, 6);
    assert_eq!(status.stored_at, Some(t0()));
    assert_eq!(status.expires_at, Some(t0() + TimeDelta::hours(24)));
}

#[test]
fn unbounded_ttl_has_no_expiry() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = SessionCache::new(FileStore::new(tmp.path()), TimeDelta::MAX);
    cache.write(&DatasetSnapshot::empty(t0()), t0()).unwrap();
    let status = cache.status(t0());
    assert_eq!(status.state, CacheState::Fresh);
    assert_eq!(status.stored_at, Some(t0()));
    assert_eq!(status.expires_at, None);
}
