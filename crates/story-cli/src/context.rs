use std::time::Duration;

use anyhow::Context;
use chrono::TimeDelta;
use story_auth::{Credentials, DirectusLogin, StaticToken};
use story_cache::{FileStore, SessionCache};
use story_config::{CacheConfig, StoriesConfig};
use story_core::{DatasetSnapshot, SortOrder};
use story_upstream::{DirectusSource, Fetcher};
use story_view::{DatasetLoader, GridProbe, LoadOutcome, SessionSettings};

use crate::cli::root_commands::ViewportArgs;
use crate::progress::{Finish, Spinner};

pub type Loader = DatasetLoader<DirectusSource, FileStore, Credentials>;

/// Everything a gallery command needs: configuration plus a wired loader.
pub struct AppContext {
    pub config: StoriesConfig,
    pub loader: Loader,
}

impl AppContext {
    pub fn init(config: StoriesConfig) -> anyhow::Result<Self> {
        config
            .require_upstream()
            .context("set upstream.endpoint and auth credentials (see STORIES_* variables)")?;

        let upstream = &config.upstream;
        let timeout = Duration::from_secs(upstream.timeout_secs);
        let source = DirectusSource::new(upstream.base_url(), &upstream.status, timeout)
            .context("failed to build content API client")?;
        let fetcher = Fetcher::new(source, upstream.page_size, upstream.max_pages, timeout);

        let credentials = if config.auth.has_static_token() {
            Credentials::Static(StaticToken::new(config.auth.token.clone()))
        } else {
            Credentials::Login(
                DirectusLogin::new(
                    upstream.base_url(),
                    config.auth.email.clone(),
                    config.auth.password.clone(),
                    timeout,
                )
                .context("failed to build login client")?,
            )
        };

        let loader = DatasetLoader::new(
            fetcher,
            open_cache(&config.cache)?,
            credentials,
            upstream.collection.clone(),
        );
        Ok(Self { config, loader })
    }

    /// Load the dataset, showing a spinner while upstream is walked.
    pub async fn load(&self, force: bool) -> anyhow::Result<(DatasetSnapshot, &'static str)> {
        let spinner = Spinner::start("Loading stories");
        match self.loader.load(force).await {
            Ok(LoadOutcome::Cached(snapshot)) => {
                spinner.finish(Finish::Clear);
                Ok((snapshot, "cache"))
            }
            Ok(LoadOutcome::Fetched(snapshot)) => {
                spinner.finish(Finish::Done(&format!("Loaded {} stories", snapshot.len())));
                Ok((snapshot, "upstream"))
            }
            Ok(outcome @ (LoadOutcome::Coalesced | LoadOutcome::Discarded)) => {
                spinner.finish(Finish::Clear);
                anyhow::bail!("aggregation produced no snapshot ({outcome:?})")
            }
            Err(error) => {
                spinner.finish(Finish::Failed("Loading failed"));
                let message = error.user_message();
                Err(anyhow::Error::new(error).context(message))
            }
        }
    }

    /// Session settings from `[gallery]`, with command-line overrides.
    pub fn session_settings(&self, viewport: &ViewportArgs) -> SessionSettings {
        let gallery = &self.config.gallery;
        SessionSettings {
            scope: gallery.facet_scope,
            sort: if viewport.recent {
                SortOrder::Recent
            } else {
                gallery.sort
            },
            window_months: viewport.window.or_else(|| gallery.window()).unwrap_or(0),
            now: None,
        }
    }

    pub fn probe(&self, viewport: &ViewportArgs) -> GridProbe {
        let gallery = &self.config.gallery;
        GridProbe {
            viewport_width: viewport.width.unwrap_or(gallery.viewport_width),
            viewport_height: viewport.height.unwrap_or(gallery.viewport_height),
            tile_width: gallery.tile_width,
            tile_height: gallery.tile_height,
        }
    }
}

/// Session cache over the configured directory. Does not need upstream
/// settings, so `stories cache` works before the CMS is configured.
pub fn open_cache(config: &CacheConfig) -> anyhow::Result<SessionCache<FileStore>> {
    let dir = config
        .resolved_dir()
        .context("no cache directory: set cache.dir or STORIES_CACHE__DIR")?;
    let ttl = i64::try_from(config.ttl_hours)
        .ok()
        .and_then(TimeDelta::try_hours)
        .unwrap_or(TimeDelta::MAX);
    Ok(SessionCache::new(FileStore::new(dir), ttl).with_touch_unchanged(config.touch_unchanged))
}
