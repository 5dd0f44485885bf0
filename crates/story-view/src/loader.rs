//! Dataset loading: cache first, otherwise one gated aggregation run.

use chrono::{DateTime, Utc};
use story_auth::{AuthError, TokenProvider};
use story_cache::{CacheLookup, CacheStore, SessionCache, WriteOutcome};
use story_core::DatasetSnapshot;
use story_upstream::{FetchError, Fetcher, PageSource};
use thiserror::Error;

use crate::gate::AggregationGate;

/// What a load produced.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// Fresh snapshot from the session cache; no request was made.
    Cached(DatasetSnapshot),
    /// New snapshot from upstream, already written to the cache.
    Fetched(DatasetSnapshot),
    /// Another aggregation was already in flight; nothing was requested.
    Coalesced,
    /// The session was torn down while aggregating; the result was dropped.
    Discarded,
}

impl LoadOutcome {
    #[must_use]
    pub fn snapshot(&self) -> Option<&DatasetSnapshot> {
        match self {
            Self::Cached(s) | Self::Fetched(s) => Some(s),
            Self::Coalesced | Self::Discarded => None,
        }
    }

    #[must_use]
    pub fn into_snapshot(self) -> Option<DatasetSnapshot> {
        match self {
            Self::Cached(s) | Self::Fetched(s) => Some(s),
            Self::Coalesced | Self::Discarded => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl LoadError {
    /// The credentials or token were refused.
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        match self {
            Self::Auth(_) => true,
            Self::Fetch(error) => error.is_auth(),
        }
    }

    /// Short message for the person looking at the gallery.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(error) if !error.is_rejection() => {
                "Cannot load content: signing in to the content service failed.".to_string()
            }
            _ if self.is_auth() => {
                "Cannot load content: the content service did not accept our credentials."
                    .to_string()
            }
            Self::Fetch(FetchError::RateLimited { retry_after_secs }) => format!(
                "Content is temporarily unavailable (rate limited). Try again in {retry_after_secs}s."
            ),
            _ => "Content is temporarily unavailable. Try again later.".to_string(),
        }
    }
}

/// Ties the session cache, the token provider, and the fetcher together.
pub struct DatasetLoader<S, C, T> {
    fetcher: Fetcher<S>,
    cache: SessionCache<C>,
    tokens: T,
    collection: String,
    gate: AggregationGate,
}

impl<S, C, T> DatasetLoader<S, C, T>
where
    S: PageSource,
    C: CacheStore,
    T: TokenProvider,
{
    #[must_use]
    pub fn new(
        fetcher: Fetcher<S>,
        cache: SessionCache<C>,
        tokens: T,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            cache,
            tokens,
            collection: collection.into(),
            gate: AggregationGate::new(),
        }
    }

    #[must_use]
    pub const fn fetcher(&self) -> &Fetcher<S> {
        &self.fetcher
    }

    #[must_use]
    pub const fn cache(&self) -> &SessionCache<C> {
        &self.cache
    }

    #[must_use]
    pub const fn gate(&self) -> &AggregationGate {
        &self.gate
    }

    /// Load against the wall clock. See [`Self::load_at`].
    ///
    /// # Errors
    ///
    /// See [`Self::load_at`].
    pub async fn load(&self, force: bool) -> Result<LoadOutcome, LoadError> {
        self.load_at(Utc::now(), force).await
    }

    /// Return the cached snapshot if it is fresh at `now` (and `force` is
    /// not set), otherwise aggregate from upstream and cache the result.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Auth`] if no token could be obtained and
    /// [`LoadError::Fetch`] if the aggregation failed. Cache write failures
    /// are logged, not returned.
    pub async fn load_at(&self, now: DateTime<Utc>, force: bool) -> Result<LoadOutcome, LoadError> {
        if !force {
            if let CacheLookup::Fresh(snapshot) = self.cache.lookup(now) {
                tracing::info!(records = snapshot.len(), "using cached snapshot");
                return Ok(LoadOutcome::Cached(snapshot));
            }
        }

        let Some(ticket) = self.gate.try_begin() else {
            tracing::warn!(collection = %self.collection, "aggregation already in flight; coalescing");
            return Ok(LoadOutcome::Coalesced);
        };

        let token = self.tokens.access_token().await?;
        let snapshot = self.fetcher.fetch_all(&self.collection, &token).await?;

        if !ticket.is_current() {
            tracing::warn!(
                records = snapshot.len(),
                "session torn down during aggregation; discarding result"
            );
            return Ok(LoadOutcome::Discarded);
        }

        match self.cache.write(&snapshot, snapshot.captured_at()) {
            Ok(WriteOutcome::Written) => tracing::debug!("snapshot cached"),
            Ok(WriteOutcome::Unchanged { touched }) => {
                tracing::debug!(touched, "snapshot identical to cached copy");
            }
            Err(error) => tracing::warn!(%error, "failed to cache snapshot"),
        }
        Ok(LoadOutcome::Fetched(snapshot))
    }

    /// Stop accepting results from runs that are still in flight.
    pub fn teardown(&self) {
        self.gate.teardown();
    }
}
