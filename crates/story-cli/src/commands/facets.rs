use story_view::derive_facets;

use crate::cli::root_commands::FetchArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::facet_rows;
use crate::context::AppContext;
use crate::output::output;

/// Handle `stories facets`.
pub async fn handle(args: &FetchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (snapshot, _) = ctx.load(args.force).await?;
    let options = derive_facets(snapshot.records());
    match flags.format {
        OutputFormat::Table => output(&facet_rows(&options), flags.format),
        OutputFormat::Json | OutputFormat::Raw => output(&options, flags.format),
    }
}
