use anyhow::Context;
use story_core::{DatasetSnapshot, FacetName};
use story_view::{GridProbe, SelectionEvent, ViewSession};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::root_commands::BrowseArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::list::state_label;
use crate::commands::shared::{GalleryResponse, facet_rows, rows};
use crate::context::AppContext;
use crate::output::output;

const HELP: &str = "\
commands:
  program|company|month <value>   select a facet value (empty value = all)
  clear [program|company|month]   clear one facet, or all of them
  more                            reveal the next batch
  scroll [n]                      scroll sentinel reached n times this frame
  resize <width> <height>         viewport changed
  facets                          show facet options
  show                            print the whole window again
  refresh                         reload from upstream
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Select { facet: FacetName, value: String },
    Clear(Option<FacetName>),
    More,
    Scroll(usize),
    Resize { width: u32, height: u32 },
    Facets,
    Show,
    Refresh,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<BrowseCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    let command = match word.to_ascii_lowercase().as_str() {
        "program" | "company" | "month" => BrowseCommand::Select {
            facet: word.parse().map_err(|e| format!("{e}"))?,
            value: rest.to_string(),
        },
        "clear" => match rest {
            "" | "all" => BrowseCommand::Clear(None),
            facet => BrowseCommand::Clear(Some(
                facet.parse().map_err(|_| format!("unknown facet '{facet}'"))?,
            )),
        },
        "more" => BrowseCommand::More,
        "scroll" => BrowseCommand::Scroll(if rest.is_empty() {
            1
        } else {
            rest.parse()
                .map_err(|_| format!("scroll expects a count, got '{rest}'"))?
        }),
        "resize" => {
            let mut dims = rest.split_whitespace().map(str::parse::<u32>);
            match (dims.next(), dims.next(), dims.next()) {
                (Some(Ok(width)), Some(Ok(height)), None) => {
                    BrowseCommand::Resize { width, height }
                }
                _ => return Err(String::from("resize expects <width> <height>")),
            }
        }
        "facets" => BrowseCommand::Facets,
        "show" => BrowseCommand::Show,
        "refresh" => BrowseCommand::Refresh,
        "help" | "?" => BrowseCommand::Help,
        "quit" | "exit" | "q" => BrowseCommand::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

/// Handle `stories browse`: one frame per input line until EOF or `quit`.
pub async fn handle(
    args: &BrowseArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let (snapshot, _) = ctx.load(args.fetch.force).await?;
    let mut session = ViewSession::new(
        ctx.session_settings(&args.viewport),
        ctx.probe(&args.viewport),
    );
    session.apply_snapshot(snapshot);

    let result = drive(&mut session, ctx, flags).await;
    session.teardown();
    ctx.loader.teardown();
    result
}

/// Read commands until EOF or `quit`, printing a frame after each one.
async fn drive(
    session: &mut ViewSession<GridProbe>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    print_frame(session, 0, ctx, flags)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        let from = match step(session, command) {
            Step::Frame(from) => from,
            Step::Facets => {
                print_facets(session, flags)?;
                continue;
            }
            Step::Refresh => match apply_refresh(session, ctx.load(true).await) {
                Some(from) => from,
                None => continue,
            },
            Step::Help => {
                eprintln!("{HELP}");
                continue;
            }
            Step::Quit => break,
        };
        print_frame(session, from, ctx, flags)?;
    }
    Ok(())
}

/// What the loop does after a command has been applied.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    /// Print the window from this position.
    Frame(usize),
    Facets,
    Refresh,
    Help,
    Quit,
}

fn step(session: &mut ViewSession<GridProbe>, command: BrowseCommand) -> Step {
    let before = session.presenter().visible();
    match command {
        BrowseCommand::Select { facet, value } => {
            session.select(SelectionEvent::Select { facet, value });
            Step::Frame(0)
        }
        BrowseCommand::Clear(Some(facet)) => {
            session.select(SelectionEvent::Clear(facet));
            Step::Frame(0)
        }
        BrowseCommand::Clear(None) => {
            session.select(SelectionEvent::ClearAll);
            Step::Frame(0)
        }
        BrowseCommand::More => {
            session.load_more();
            Step::Frame(before)
        }
        BrowseCommand::Scroll(signals) => {
            // Signals after the first are absorbed until the flush.
            if signals > 0 {
                session.signal_load_more();
            }
            session.flush();
            Step::Frame(before)
        }
        BrowseCommand::Resize { width, height } => {
            let probe = session.probe().resized(width, height);
            session.resize(probe);
            Step::Frame(before)
        }
        BrowseCommand::Show => Step::Frame(0),
        BrowseCommand::Facets => Step::Facets,
        BrowseCommand::Refresh => Step::Refresh,
        BrowseCommand::Help => Step::Help,
        BrowseCommand::Quit => Step::Quit,
    }
}

/// Install a reloaded snapshot. A failed reload is reported and the current
/// snapshot stays, so the user can try again.
fn apply_refresh(
    session: &mut ViewSession<GridProbe>,
    loaded: anyhow::Result<(DatasetSnapshot, &'static str)>,
) -> Option<usize> {
    match loaded {
        Ok((snapshot, _)) => {
            session.apply_snapshot(snapshot);
            Some(0)
        }
        Err(error) => {
            eprintln!("{error:#}");
            None
        }
    }
}

/// Print the window from position `from` onward.
fn print_frame(
    session: &ViewSession<GridProbe>,
    from: usize,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let presenter = session.presenter();
    let stories = rows(session.window().skip(from), ctx.config.upstream.base_url());

    if flags.format != OutputFormat::Table {
        return output(
            &GalleryResponse {
                selection: session.selection(),
                matched: presenter.total(),
                visible: presenter.visible(),
                state: presenter.state(),
                stories,
            },
            flags.format,
        );
    }

    eprintln!(
        "showing {} of {} ({}, batch {})",
        presenter.visible(),
        presenter.total(),
        state_label(presenter.state()),
        presenter.batch_size()
    );
    if stories.is_empty() {
        return Ok(());
    }
    output(&stories, flags.format)
}

fn print_facets(session: &ViewSession<GridProbe>, flags: &GlobalFlags) -> anyhow::Result<()> {
    match flags.format {
        OutputFormat::Table => output(&facet_rows(session.facets()), flags.format),
        OutputFormat::Json | OutputFormat::Raw => output(session.facets(), flags.format),
    }
}
