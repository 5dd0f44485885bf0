use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::FetchArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct FetchResponse {
    source: &'static str,
    records: usize,
    well_formed: usize,
    captured_at: DateTime<Utc>,
}

/// Handle `stories fetch`.
pub async fn handle(args: &FetchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (snapshot, source) = ctx.load(args.force).await?;
    let skipped = snapshot.len() - snapshot.well_formed_count();
    if skipped > 0 {
        tracing::warn!(skipped, "some records are missing required attributes");
    }
    output(
        &FetchResponse {
            source,
            records: snapshot.len(),
            well_formed: snapshot.well_formed_count(),
            captured_at: snapshot.captured_at(),
        },
        flags.format,
    )
}
