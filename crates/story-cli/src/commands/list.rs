use story_core::FacetName;
use story_view::{PresenterState, SelectionEvent, ViewSession};

use crate::cli::root_commands::ListArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::{GalleryResponse, rows};
use crate::context::AppContext;
use crate::output::output;

/// Handle `stories list`.
pub async fn handle(args: &ListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (snapshot, _) = ctx.load(args.fetch.force).await?;

    let mut session =
        ViewSession::new(ctx.session_settings(&args.viewport), ctx.probe(&args.viewport));
    session.apply_snapshot(snapshot);
    for event in selection_events(args) {
        session.select(event);
    }

    if args.all {
        while session.state() == PresenterState::Partial {
            session.load_more();
        }
    } else {
        for _ in 1..args.pages.max(1) {
            session.load_more();
        }
    }

    let endpoint = ctx.config.upstream.base_url();
    let stories = rows(session.window(), endpoint);
    if flags.format == OutputFormat::Table {
        if !flags.quiet {
            eprintln!(
                "showing {} of {} ({})",
                session.presenter().visible(),
                session.presenter().total(),
                state_label(session.state())
            );
        }
        return output(&stories, flags.format);
    }

    output(
        &GalleryResponse {
            selection: session.selection(),
            matched: session.presenter().total(),
            visible: session.presenter().visible(),
            state: session.state(),
            stories,
        },
        flags.format,
    )
}

fn selection_events(args: &ListArgs) -> Vec<SelectionEvent> {
    [
        (FacetName::Program, &args.program),
        (FacetName::Company, &args.company),
        (FacetName::Month, &args.month),
    ]
    .into_iter()
    .filter_map(|(facet, value)| {
        value.clone().map(|value| SelectionEvent::Select { facet, value })
    })
    .collect()
}

pub const fn state_label(state: PresenterState) -> &'static str {
    match state {
        PresenterState::Empty => "empty",
        PresenterState::Partial => "partial",
        PresenterState::Exhausted => "exhausted",
    }
}
