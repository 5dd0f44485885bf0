use clap::Subcommand;

/// Local snapshot cache management.
#[derive(Clone, Debug, Subcommand)]
pub enum CacheCommands {
    /// Show whether a snapshot is cached and when it expires.
    Status,
    /// Remove the cached snapshot.
    Clear,
}
