use chrono::Utc;
use serde::Serialize;
use story_cache::CacheStatus;
use story_config::StoriesConfig;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CacheCommands;
use crate::context::open_cache;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StatusResponse {
    dir: String,
    #[serde(flatten)]
    status: CacheStatus,
}

#[derive(Debug, Serialize)]
struct ClearResponse {
    dir: String,
    cleared: bool,
}

/// Handle `stories cache`.
pub fn handle(
    action: &CacheCommands,
    config: &StoriesConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let cache = open_cache(&config.cache)?;
    let dir = cache.store().dir().display().to_string();
    match action {
        CacheCommands::Status => output(
            &StatusResponse {
                dir,
                status: cache.status(Utc::now()),
            },
            flags.format,
        ),
        CacheCommands::Clear => {
            cache.clear()?;
            tracing::info!(%dir, "cache cleared");
            output(&ClearResponse { dir, cleared: true }, flags.format)
        }
    }
}
