//! Terminal progress reporting for the long-running stages.
//!
//! Progress is an observability concern only: hidden bars accept the same
//! calls and draw nothing, so stage code never branches on visibility.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const BYTES_TEMPLATE: &str = "{spinner:.green} {msg} {binary_bytes} ({binary_bytes_per_sec})";
const COUNT_TEMPLATE: &str =
    "{msg} [{bar:40.cyan/blue}] {human_pos}/{human_len} ({per_sec}, eta {eta})";
const TICK: Duration = Duration::from_millis(120);

/// Whether progress bars are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Progress {
    /// Draw progress bars on stderr.
    #[default]
    Visible,
    /// Suppress all progress output.
    Hidden,
}

impl Progress {
    /// Select visibility from a "show progress" flag.
    #[must_use]
    pub const fn from_enabled(enabled: bool) -> Self {
        if enabled { Self::Visible } else { Self::Hidden }
    }

    /// Spinner counting transferred bytes of unknown total size.
    #[must_use]
    pub fn bytes(self, message: impl Into<String>) -> ProgressBar {
        match self {
            Self::Hidden => ProgressBar::hidden(),
            Self::Visible => {
                let bar = ProgressBar::new_spinner()
                    .with_style(style(BYTES_TEMPLATE, ProgressStyle::default_spinner))
                    .with_message(message.into());
                bar.enable_steady_tick(TICK);
                bar
            }
        }
    }

    /// Bar counting `len` discrete items.
    #[must_use]
    pub fn items(self, len: u64, message: impl Into<String>) -> ProgressBar {
        match self {
            Self::Hidden => ProgressBar::hidden(),
            Self::Visible => ProgressBar::new(len)
                .with_style(style(COUNT_TEMPLATE, ProgressStyle::default_bar))
                .with_message(message.into()),
        }
    }
}

fn style(template: &str, fallback: fn() -> ProgressStyle) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| fallback())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(true, Progress::Visible)]
    #[case(false, Progress::Hidden)]
    fn maps_enabled_flag(#[case] enabled: bool, #[case] expected: Progress) {
        assert_eq!(Progress::from_enabled(enabled), expected);
    }

    #[rstest]
    fn hidden_bars_still_count() {
        let bar = Progress::Hidden.items(3, "exporting");
        bar.inc(2);
        assert!(bar.is_hidden());
        assert_eq!(bar.position(), 2);
    }

    #[rstest]
    fn templates_parse() {
        assert!(ProgressStyle::with_template(BYTES_TEMPLATE).is_ok());
        assert!(ProgressStyle::with_template(COUNT_TEMPLATE).is_ok());
    }
}
