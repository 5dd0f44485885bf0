//! Snapshot cache with a time-to-live.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use story_core::{DatasetSnapshot, Record};

use crate::error::CacheError;
use crate::store::CacheStore;

/// Key holding the JSON-encoded record list.
pub const ARTICLES_KEY: &str = "articles";
/// Key holding the write time as epoch milliseconds.
pub const TIMESTAMP_KEY: &str = "cacheTimestamp";

/// Result of looking up the cached snapshot.
#[derive(Debug, Clone)]
pub enum CacheLookup {
    /// Nothing usable is stored (absent, corrupt, or inconsistent).
    Miss,
    Fresh(DatasetSnapshot),
    Stale(DatasetSnapshot),
}

impl CacheLookup {
    /// Snapshot if one is stored, fresh or not.
    #[must_use]
    pub fn into_snapshot(self) -> Option<DatasetSnapshot> {
        match self {
            Self::Fresh(s) | Self::Stale(s) => Some(s),
            Self::Miss => None,
        }
    }
}

/// Outcome of [`SessionCache::write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// Payload matched the stored one and was left alone. `touched` reports
    /// whether the timestamp was refreshed.
    Unchanged { touched: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheState {
    Fresh,
    Stale,
    Missing,
    Corrupt,
}

/// Summary for `stories cache status`.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub state: CacheState,
    pub records: usize,
    pub stored_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Persists one [`DatasetSnapshot`] plus its write time in a [`CacheStore`].
///
/// Reads never fail: an absent, unparsable, schema-invalid, or future-dated
/// entry is a miss. A snapshot is fresh while `now - stored < ttl`.
pub struct SessionCache<S> {
    store: S,
    ttl: TimeDelta,
    touch_unchanged: bool,
    validator: Option<jsonschema::Validator>,
}

impl<S: CacheStore> SessionCache<S> {
    #[must_use]
    pub fn new(store: S, ttl: TimeDelta) -> Self {
        Self {
            store,
            ttl,
            touch_unchanged: true,
            validator: record_list_validator(),
        }
    }

    /// Whether an identical write refreshes the timestamp (default `true`).
    #[must_use]
    pub const fn with_touch_unchanged(mut self, touch: bool) -> Self {
        self.touch_unchanged = touch;
        self
    }

    #[must_use]
    pub const fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Look up the stored snapshot and classify it against `now`.
    pub fn lookup(&self, now: DateTime<Utc>) -> CacheLookup {
        match self.load(now) {
            Ok(snapshot) if self.is_fresh(snapshot.captured_at(), now) => {
                CacheLookup::Fresh(snapshot)
            }
            Ok(snapshot) => CacheLookup::Stale(snapshot),
            Err(CacheError::Missing { key }) => {
                tracing::debug!(key, "cache miss");
                CacheLookup::Miss
            }
            Err(error) => {
                tracing::warn!(%error, "ignoring unusable cache entry");
                CacheLookup::Miss
            }
        }
    }

    /// `true` unless a fresh snapshot is stored.
    pub fn should_refetch(&self, now: DateTime<Utc>) -> bool {
        !matches!(self.lookup(now), CacheLookup::Fresh(_))
    }

    /// Stored snapshot regardless of age, or `None` on any problem.
    pub fn read(&self, now: DateTime<Utc>) -> Option<DatasetSnapshot> {
        self.lookup(now).into_snapshot()
    }

    /// Store `snapshot` as written at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the snapshot cannot be encoded or the store
    /// refuses the write.
    pub fn write(
        &self,
        snapshot: &DatasetSnapshot,
        now: DateTime<Utc>,
    ) -> Result<WriteOutcome, CacheError> {
        let payload = serde_json::to_string(snapshot.records())?;
        let existing = self.store.get(ARTICLES_KEY).unwrap_or_else(|error| {
            tracing::debug!(%error, "could not read previous payload");
            None
        });

        if existing.as_deref() == Some(payload.as_str()) {
            if self.touch_unchanged {
                self.write_timestamp(now)?;
            }
            tracing::debug!(touched = self.touch_unchanged, "cache payload unchanged");
            return Ok(WriteOutcome::Unchanged {
                touched: self.touch_unchanged,
            });
        }

        self.store.set(ARTICLES_KEY, &payload)?;
        self.write_timestamp(now)?;
        tracing::info!(records = snapshot.len(), "cache written");
        Ok(WriteOutcome::Written)
    }

    /// Remove both entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if either entry cannot be removed.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.store.remove(ARTICLES_KEY)?;
        self.store.remove(TIMESTAMP_KEY)
    }

    pub fn status(&self, now: DateTime<Utc>) -> CacheStatus {
        let (state, snapshot) = match self.load(now) {
            Ok(s) if self.is_fresh(s.captured_at(), now) => (CacheState::Fresh, Some(s)),
            Ok(s) => (CacheState::Stale, Some(s)),
            Err(CacheError::Missing { .. }) => (CacheState::Missing, None),
            Err(_) => (CacheState::Corrupt, None),
        };
        let stored_at = snapshot.as_ref().map(DatasetSnapshot::captured_at);
        CacheStatus {
            state,
            records: snapshot.as_ref().map_or(0, DatasetSnapshot::len),
            stored_at,
            expires_at: stored_at.and_then(|t| t.checked_add_signed(self.ttl)),
        }
    }

    fn is_fresh(&self, stored: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - stored < self.ttl
    }

    fn write_timestamp(&self, now: DateTime<Utc>) -> Result<(), CacheError> {
        self.store
            .set(TIMESTAMP_KEY, &now.timestamp_millis().to_string())
    }

    fn stored_at(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, CacheError> {
        let raw = self.store.get(TIMESTAMP_KEY)?.ok_or(CacheError::Missing {
            key: TIMESTAMP_KEY,
        })?;
        let millis: i64 = raw.trim().parse().map_err(|_| CacheError::Malformed {
            key: TIMESTAMP_KEY,
            reason: format!("not an integer: '{raw}'"),
        })?;
        let stored =
            DateTime::from_timestamp_millis(millis).ok_or_else(|| CacheError::Malformed {
                key: TIMESTAMP_KEY,
                reason: format!("out of range: {millis}"),
            })?;
        if stored > now {
            return Err(CacheError::Malformed {
                key: TIMESTAMP_KEY,
                reason: format!("in the future: {stored}"),
            });
        }
        Ok(stored)
    }

    fn load(&self, now: DateTime<Utc>) -> Result<DatasetSnapshot, CacheError> {
        let stored_at = self.stored_at(now)?;
        let raw = self.store.get(ARTICLES_KEY)?.ok_or(CacheError::Missing {
            key: ARTICLES_KEY,
        })?;
        let value: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| CacheError::Malformed {
                key: ARTICLES_KEY,
                reason: e.to_string(),
            })?;

        if let Some(validator) = &self.validator {
            let errors: Vec<String> = validator
                .iter_errors(&value)
                .map(|e| e.to_string())
                .collect();
            if !errors.is_empty() {
                return Err(CacheError::Schema { errors });
            }
        }

        let records: Vec<Record> =
            serde_json::from_value(value).map_err(|e| CacheError::Malformed {
                key: ARTICLES_KEY,
                reason: e.to_string(),
            })?;
        Ok(DatasetSnapshot::new(records, stored_at))
    }
}

fn record_list_validator() -> Option<jsonschema::Validator> {
    let schema = match serde_json::to_value(schemars::schema_for!(Vec<Record>)) {
        Ok(schema) => schema,
        Err(error) => {
            tracing::warn!(%error, "record schema unavailable; skipping validation");
            return None;
        }
    };
    match jsonschema::validator_for(&schema) {
        Ok(validator) => Some(validator),
        Err(error) => {
            tracing::warn!(%error, "record schema did not compile; skipping validation");
            None
        }
    }
}
