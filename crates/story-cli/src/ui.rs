use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

/// Narrower `COLUMNS` values are ignored and tables use natural widths.
const MIN_TABLE_WIDTH: usize = 40;

/// Rendering choices fixed once per process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiPrefs {
    pub table_color: bool,
    pub progress: bool,
    pub term_width: Option<usize>,
}

/// What the process can observe about where its output goes.
#[derive(Clone, Copy, Debug, Default)]
pub struct Terminal {
    pub stdout_tty: bool,
    pub stderr_tty: bool,
    pub no_color: bool,
    pub columns: Option<usize>,
}

impl Terminal {
    fn detect() -> Self {
        Self {
            stdout_tty: std::io::stdout().is_terminal(),
            stderr_tty: std::io::stderr().is_terminal(),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            columns: std::env::var("COLUMNS").ok().and_then(|v| v.parse().ok()),
        }
    }
}

impl UiPrefs {
    const PLAIN: Self = Self {
        table_color: false,
        progress: false,
        term_width: None,
    };

    pub fn resolve(flags: &GlobalFlags, terminal: Terminal) -> Self {
        let table = flags.format == OutputFormat::Table;
        let table_color = table
            && match flags.color {
                ColorMode::Always => true,
                ColorMode::Never => false,
                ColorMode::Auto => terminal.stdout_tty && !flags.quiet && !terminal.no_color,
            };
        // Spinner goes to stderr, so raw and table output can still be piped.
        let progress = terminal.stderr_tty && !flags.quiet && flags.format != OutputFormat::Json;

        Self {
            table_color,
            progress,
            term_width: terminal.columns.filter(|w| *w >= MIN_TABLE_WIDTH),
        }
    }
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(UiPrefs::resolve(flags, Terminal::detect()));
}

#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or(UiPrefs::PLAIN)
}
