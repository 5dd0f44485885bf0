use clap::{Args, Subcommand};

use crate::cli::subcommands::CacheCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Load the dataset (from cache when fresh) and report what was loaded.
    Fetch(FetchArgs),
    /// Show the option lists for each facet.
    Facets(FetchArgs),
    /// Filter the gallery and print the revealed stories.
    List(ListArgs),
    /// Interactive gallery driven by line commands on stdin.
    Browse(BrowseArgs),
    /// Snapshot cache management.
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },
}

#[derive(Clone, Debug, Default, Args)]
pub struct FetchArgs {
    /// Ignore a fresh cache and aggregate from upstream.
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, Debug, Default, Args)]
pub struct ViewportArgs {
    /// Viewport width in pixels (overrides `gallery.viewport_width`).
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height in pixels (overrides `gallery.viewport_height`).
    #[arg(long)]
    pub height: Option<u32>,

    /// Newest months first instead of upstream order.
    #[arg(long)]
    pub recent: bool,

    /// Only the last N months (0 disables; overrides `gallery.window_months`).
    #[arg(long)]
    pub window: Option<u32>,
}

#[derive(Clone, Debug, Default, Args)]
pub struct ListArgs {
    /// Program to filter on (exact match).
    #[arg(long)]
    pub program: Option<String>,

    /// Company to filter on (exact match).
    #[arg(long)]
    pub company: Option<String>,

    /// Month to filter on, e.g. "March 2024" or 2024-03.
    #[arg(long)]
    pub month: Option<String>,

    /// Number of batches to reveal.
    #[arg(long, default_value_t = 1)]
    pub pages: usize,

    /// Reveal every matching story.
    #[arg(long, conflicts_with = "pages")]
    pub all: bool,

    #[command(flatten)]
    pub viewport: ViewportArgs,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

#[derive(Clone, Debug, Default, Args)]
pub struct BrowseArgs {
    #[command(flatten)]
    pub viewport: ViewportArgs,

    #[command(flatten)]
    pub fetch: FetchArgs,
}
