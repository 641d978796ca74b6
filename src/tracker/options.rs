//! Tracker configuration: ordered options, the fluent builder, and the
//! immutable config they produce.

use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use crate::term::{StdoutTerminal, TerminalSize, DEFAULT_COLUMNS};
use crate::url_model::filename_from_url_path;

use super::ProgressTracker;

pub const DEFAULT_PREFIX: &str = "Loading";
pub const DEFAULT_BAR_WIDTH: usize = DEFAULT_COLUMNS;
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(50);

/// Glyphs used to draw the bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Filled cells behind the leading edge.
    pub filled: String,
    /// Last filled cell.
    pub leading_edge: String,
    /// Unfilled cells.
    pub padding: String,
    pub left: String,
    pub right: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            filled: "-".to_string(),
            leading_edge: ">".to_string(),
            padding: " ".to_string(),
            left: "[".to_string(),
            right: "]".to_string(),
        }
    }
}

/// One configuration change. Options are applied in order; when two options
/// set the same field the later one wins.
pub enum TrackerOption {
    CleanAfterFinish(bool),
    Invisible(bool),
    Prefix(String),
    FullWidth(bool),
    ShowFileName(bool),
    Url(String),
    Theme(Theme),
    /// Bar width used when full-width is off.
    Width(usize),
    Throttle(Duration),
    Writer(Box<dyn Write + Send>),
    Terminal(Box<dyn TerminalSize>),
}

impl fmt::Debug for TrackerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerOption::CleanAfterFinish(v) => f.debug_tuple("CleanAfterFinish").field(v).finish(),
            TrackerOption::Invisible(v) => f.debug_tuple("Invisible").field(v).finish(),
            TrackerOption::Prefix(v) => f.debug_tuple("Prefix").field(v).finish(),
            TrackerOption::FullWidth(v) => f.debug_tuple("FullWidth").field(v).finish(),
            TrackerOption::ShowFileName(v) => f.debug_tuple("ShowFileName").field(v).finish(),
            TrackerOption::Url(v) => f.debug_tuple("Url").field(v).finish(),
            TrackerOption::Theme(v) => f.debug_tuple("Theme").field(v).finish(),
            TrackerOption::Width(v) => f.debug_tuple("Width").field(v).finish(),
            TrackerOption::Throttle(v) => f.debug_tuple("Throttle").field(v).finish(),
            TrackerOption::Writer(_) => f.write_str("Writer(..)"),
            TrackerOption::Terminal(_) => f.write_str("Terminal(..)"),
        }
    }
}

/// Immutable settings of a tracker, fixed at construction.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub max_units: u64,
    pub visible: bool,
    pub clean_on_finish: bool,
    pub prefix: String,
    pub full_width: bool,
    pub show_file_name: bool,
    pub url: String,
    pub theme: Theme,
    pub throttle: Duration,
    pub bar_width: usize,
}

impl TrackerConfig {
    fn new(max_units: u64) -> Self {
        Self {
            max_units,
            visible: true,
            clean_on_finish: true,
            prefix: DEFAULT_PREFIX.to_string(),
            full_width: true,
            show_file_name: false,
            url: String::new(),
            theme: Theme::default(),
            throttle: DEFAULT_THROTTLE,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }

    /// A zero maximum or an invisible tracker never counts or draws.
    pub fn is_noop(&self) -> bool {
        self.max_units == 0 || !self.visible
    }
}

/// Config plus the collaborators that live behind the tracker's lock.
pub(crate) struct Assembled {
    pub config: TrackerConfig,
    pub writer: Box<dyn Write + Send>,
    pub terminal: Box<dyn TerminalSize>,
}

pub(crate) fn assemble(max_units: u64, options: impl IntoIterator<Item = TrackerOption>) -> Assembled {
    let mut config = TrackerConfig::new(max_units);
    let mut writer: Box<dyn Write + Send> = Box::new(io::stdout());
    let mut terminal: Box<dyn TerminalSize> = Box::new(StdoutTerminal);

    for opt in options {
        match opt {
            TrackerOption::CleanAfterFinish(v) => config.clean_on_finish = v,
            TrackerOption::Invisible(v) => config.visible = !v,
            TrackerOption::Prefix(v) => config.prefix = v,
            TrackerOption::FullWidth(v) => config.full_width = v,
            TrackerOption::ShowFileName(v) => config.show_file_name = v,
            TrackerOption::Url(v) => config.url = v,
            TrackerOption::Theme(v) => config.theme = v,
            TrackerOption::Width(v) => config.bar_width = v,
            TrackerOption::Throttle(v) => config.throttle = v,
            TrackerOption::Writer(w) => writer = w,
            TrackerOption::Terminal(t) => terminal = t,
        }
    }

    if config.show_file_name && !config.url.is_empty() {
        if let Some(name) = filename_from_url_path(&config.url) {
            config.prefix = name;
        }
    }

    Assembled {
        config,
        writer,
        terminal,
    }
}

/// Fluent construction of a [`ProgressTracker`]. Each call appends an option,
/// so the same last-writer-wins rule applies.
#[derive(Debug)]
pub struct TrackerBuilder {
    max_units: u64,
    options: Vec<TrackerOption>,
}

impl TrackerBuilder {
    pub fn new(max_units: u64) -> Self {
        Self {
            max_units,
            options: Vec::new(),
        }
    }

    pub fn option(mut self, opt: TrackerOption) -> Self {
        self.options.push(opt);
        self
    }

    pub fn options(mut self, opts: impl IntoIterator<Item = TrackerOption>) -> Self {
        self.options.extend(opts);
        self
    }

    pub fn clean_after_finish(self, enable: bool) -> Self {
        self.option(TrackerOption::CleanAfterFinish(enable))
    }

    pub fn invisible(self, enable: bool) -> Self {
        self.option(TrackerOption::Invisible(enable))
    }

    pub fn prefix(self, prefix: impl Into<String>) -> Self {
        self.option(TrackerOption::Prefix(prefix.into()))
    }

    pub fn full_width(self, enable: bool) -> Self {
        self.option(TrackerOption::FullWidth(enable))
    }

    pub fn show_file_name(self, enable: bool) -> Self {
        self.option(TrackerOption::ShowFileName(enable))
    }

    pub fn url(self, url: impl Into<String>) -> Self {
        self.option(TrackerOption::Url(url.into()))
    }

    pub fn theme(self, theme: Theme) -> Self {
        self.option(TrackerOption::Theme(theme))
    }

    pub fn width(self, columns: usize) -> Self {
        self.option(TrackerOption::Width(columns))
    }

    pub fn throttle(self, interval: Duration) -> Self {
        self.option(TrackerOption::Throttle(interval))
    }

    pub fn writer(self, writer: impl Write + Send + 'static) -> Self {
        self.option(TrackerOption::Writer(Box::new(writer)))
    }

    pub fn terminal(self, terminal: impl TerminalSize + 'static) -> Self {
        self.option(TrackerOption::Terminal(Box::new(terminal)))
    }

    pub fn build(self) -> ProgressTracker {
        ProgressTracker::with_options(self.max_units, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let a = assemble(100, []);
        let cfg = a.config;
        assert_eq!(cfg.max_units, 100);
        assert!(cfg.visible);
        assert!(cfg.clean_on_finish);
        assert!(cfg.full_width);
        assert_eq!(cfg.prefix, "Loading");
        assert_eq!(cfg.bar_width, 80);
        assert_eq!(cfg.theme, Theme::default());
        assert_eq!(cfg.throttle, DEFAULT_THROTTLE);
    }

    #[test]
    fn later_option_wins() {
        let a = assemble(
            10,
            [
                TrackerOption::Prefix("first".into()),
                TrackerOption::CleanAfterFinish(false),
                TrackerOption::Prefix("second".into()),
                TrackerOption::CleanAfterFinish(true),
            ],
        );
        assert_eq!(a.config.prefix, "second");
        assert!(a.config.clean_on_finish);
    }

    #[test]
    fn file_name_overrides_prefix() {
        let a = assemble(
            10,
            [
                TrackerOption::ShowFileName(true),
                TrackerOption::Url("https://x/y/report.csv".into()),
            ],
        );
        assert_eq!(a.config.prefix, "report.csv");
    }

    #[test]
    fn file_name_applies_after_explicit_prefix() {
        let a = assemble(
            10,
            [
                TrackerOption::Url("https://x/y/report.csv".into()),
                TrackerOption::ShowFileName(true),
                TrackerOption::Prefix("Fetching".into()),
            ],
        );
        assert_eq!(a.config.prefix, "report.csv");
    }

    #[test]
    fn file_name_needs_both_options() {
        let a = assemble(10, [TrackerOption::Url("https://x/y/report.csv".into())]);
        assert_eq!(a.config.prefix, "Loading");

        let a = assemble(10, [TrackerOption::ShowFileName(true)]);
        assert_eq!(a.config.prefix, "Loading");
    }

    #[test]
    fn empty_segment_keeps_prefix() {
        let a = assemble(
            10,
            [
                TrackerOption::ShowFileName(true),
                TrackerOption::Url("https://example.com/".into()),
                TrackerOption::Prefix("Sync".into()),
            ],
        );
        assert_eq!(a.config.prefix, "Sync");
    }

    #[test]
    fn invisible_and_zero_max_are_noops() {
        assert!(assemble(0, []).config.is_noop());
        assert!(assemble(5, [TrackerOption::Invisible(true)]).config.is_noop());
        assert!(!assemble(5, [TrackerOption::Invisible(true), TrackerOption::Invisible(false)])
            .config
            .is_noop());
    }
}
