use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

/// How a spinner leaves the terminal.
pub enum Finish<'a> {
    /// Keep a final line with this message.
    Done(&'a str),
    /// Remove the spinner line.
    Clear,
    /// Keep a final line marked as abandoned.
    Failed(&'a str),
}

/// Stderr spinner shown while stories load. Does nothing when
/// [`ui::prefs`] disables progress.
pub struct Spinner(Option<ProgressBar>);

impl Spinner {
    #[must_use]
    pub fn start(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self(None);
        }

        let style = ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")
            .map_or_else(|_| ProgressStyle::default_spinner(), |s| {
                s.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            });
        let bar = ProgressBar::new_spinner()
            .with_style(style)
            .with_message(message.to_owned());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self(Some(bar))
    }

    pub fn finish(self, how: Finish<'_>) {
        let Some(bar) = self.0 else { return };
        match how {
            Finish::Done(message) => bar.finish_with_message(message.to_owned()),
            Finish::Clear => bar.finish_and_clear(),
            Finish::Failed(message) => bar.abandon_with_message(message.to_owned()),
        }
    }
}
