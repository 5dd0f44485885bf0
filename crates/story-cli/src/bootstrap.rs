use std::path::Path;

use anyhow::Context;
use story_config::StoriesConfig;

use crate::cli::GlobalFlags;

/// Load `.env` from the working directory (if present), then the layered
/// configuration with the `--config` file on top.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<StoriesConfig> {
    load_dotenv(Path::new(".env"))?;

    if let Some(path) = &flags.config {
        anyhow::ensure!(
            path.is_file(),
            "config file '{}' does not exist",
            path.display()
        );
    }

    StoriesConfig::load_from(flags.config.as_deref()).context("failed to load stories configuration")
}

fn load_dotenv(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        return Ok(());
    }
    dotenvy::from_path(path)
        .with_context(|| format!("failed to load dotenv file at {}", path.display()))
}
