pub mod browse;
pub mod cache;
pub mod facets;
pub mod fetch;
pub mod list;
pub mod shared;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

/// Route a gallery command to its handler.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Fetch(args) => fetch::handle(&args, ctx, flags).await,
        Commands::Facets(args) => facets::handle(&args, ctx, flags).await,
        Commands::List(args) => list::handle(&args, ctx, flags).await,
        Commands::Browse(args) => browse::handle(&args, ctx, flags).await,
        Commands::Cache { .. } => {
            anyhow::bail!("cache commands are handled before the gallery context is built")
        }
    }
}
