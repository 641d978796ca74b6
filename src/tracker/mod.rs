//! The progress tracker: counts units against a known maximum and redraws a
//! single terminal line when the whole-number percentage moves.
//!
//! All mutation and drawing happens under one mutex, so concurrent callers
//! sharing a tracker (it is a cheap clonable handle) are serialized, and one
//! caller's render blocks another's advance until it returns.

mod options;
mod render;
mod state;

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::error::{ProgressError, Result};
use crate::term::TerminalSize;

pub use options::{
    Theme, TrackerBuilder, TrackerConfig, TrackerOption, DEFAULT_BAR_WIDTH, DEFAULT_PREFIX,
    DEFAULT_THROTTLE,
};

use state::ProgressState;

/// Handle to a progress bar. Clones share the same state and output.
#[derive(Clone)]
pub struct ProgressTracker {
    config: Arc<TrackerConfig>,
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    state: ProgressState,
    out: Box<dyn Write + Send>,
    terminal: Box<dyn TerminalSize>,
}

/// Point-in-time view of a tracker, read under its lock.
#[derive(Debug, Clone)]
pub struct ProgressSnapshot {
    pub units_done: u64,
    pub max_units: u64,
    /// Floored whole percent.
    pub percent: u32,
    pub saucer_size: usize,
    pub finished: bool,
    /// Throughput samples, oldest first.
    pub recent_rates: Vec<f64>,
    /// Mean of `recent_rates` in units per second (None before the first sample).
    pub units_per_sec: Option<f64>,
    pub elapsed_secs: f64,
}

impl ProgressSnapshot {
    /// Fraction complete in [0.0, 1.0].
    pub fn fraction(&self) -> f64 {
        if self.max_units == 0 {
            return 1.0;
        }
        (self.units_done as f64 / self.max_units as f64).min(1.0)
    }

    /// Estimated seconds remaining from the smoothed rate.
    pub fn eta_secs(&self) -> Option<f64> {
        let remaining = self.max_units.saturating_sub(self.units_done);
        if remaining == 0 {
            return Some(0.0);
        }
        let rate = self.units_per_sec?;
        if rate <= 0.0 {
            return None;
        }
        Some(remaining as f64 / rate)
    }
}

impl ProgressTracker {
    /// Tracker with default options. A `max_units` of 0 makes every call a no-op.
    pub fn new(max_units: u64) -> Self {
        Self::with_options(max_units, [])
    }

    /// Applies `options` in order over the defaults.
    pub fn with_options(max_units: u64, options: impl IntoIterator<Item = TrackerOption>) -> Self {
        let assembled = options::assemble(max_units, options);
        let config = assembled.config;
        tracing::debug!(
            max_units,
            prefix = %config.prefix,
            full_width = config.full_width,
            visible = config.visible,
            "progress tracker created"
        );
        Self {
            config: Arc::new(config),
            inner: Arc::new(Mutex::new(Inner {
                state: ProgressState::new(Instant::now()),
                out: assembled.writer,
                terminal: assembled.terminal,
            })),
        }
    }

    pub fn builder(max_units: u64) -> TrackerBuilder {
        TrackerBuilder::new(max_units)
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Counts `n` more units and redraws if the whole percent changed.
    ///
    /// Fails with [`ProgressError::LimitExceeded`] when the total passes the
    /// maximum; the count keeps the increment in that case. Sink failures are
    /// returned as [`ProgressError::Write`].
    pub fn advance(&self, n: u64) -> Result<()> {
        let cfg = &*self.config;
        if cfg.is_noop() {
            return Ok(());
        }

        let mut inner = self.lock();
        let now = Instant::now();
        let state = &mut inner.state;

        state.units_done = state.units_done.saturating_add(n);
        if state.units_done > cfg.max_units {
            tracing::warn!(
                units_done = state.units_done,
                max_units = cfg.max_units,
                "progress advanced past limit"
            );
            return Err(ProgressError::LimitExceeded {
                units_done: state.units_done,
                max_units: cfg.max_units,
            });
        }

        if let Some(rate) = state.rates.record(n, now) {
            tracing::trace!(rate, samples = state.rates.len(), "rate sample");
        }

        state.update_derived(n, cfg.max_units, cfg.bar_width);

        if state.take_render_trigger() {
            inner.render(cfg, now)?;
        }
        Ok(())
    }

    pub fn advance_usize(&self, n: usize) -> Result<()> {
        self.advance(n as u64)
    }

    /// Marks all units done without drawing. Call [`advance`](Self::advance)
    /// with 0 afterwards to draw the completion.
    pub fn finish(&self) {
        let mut inner = self.lock();
        inner.state.units_done = self.config.max_units;
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let inner = self.lock();
        let s = &inner.state;
        ProgressSnapshot {
            units_done: s.units_done,
            max_units: self.config.max_units,
            percent: s.percent,
            saucer_size: s.saucer_size,
            finished: s.finished,
            recent_rates: s.rates.samples().collect(),
            units_per_sec: s.rates.smoothed(),
            elapsed_secs: s.started.elapsed().as_secs_f64(),
        }
    }

    /// Text of the last drawn line, without the leading carriage return.
    pub fn rendered(&self) -> String {
        self.lock().state.rendered.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Draw state stays consistent even if a writer panicked mid-render.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Inner {
    fn render(&mut self, cfg: &TrackerConfig, now: Instant) -> Result<()> {
        let throttled = self
            .state
            .last_render
            .is_some_and(|t| now.saturating_duration_since(t) < cfg.throttle);
        if throttled && self.state.units_done < cfg.max_units {
            tracing::trace!(percent = self.state.percent, "render throttled");
            return Ok(());
        }

        let erase = render::erase_sequence(self.state.max_line_width);
        self.write_str(&erase)?;

        if !self.state.finished && self.state.units_done >= cfg.max_units {
            self.state.finished = true;
            tracing::debug!(units_done = self.state.units_done, "progress finished");
            if !cfg.clean_on_finish {
                self.draw(cfg)?;
            }
        }

        if self.state.finished {
            let tail = if cfg.clean_on_finish { "\r" } else { "\n" };
            return self.write_str(tail);
        }

        let width = self.draw(cfg)?;
        self.state.max_line_width = self.state.max_line_width.max(width);
        self.state.last_render = Some(now);
        Ok(())
    }

    /// Writes the bar line and returns its length in bytes.
    fn draw(&mut self, cfg: &TrackerConfig) -> Result<usize> {
        let left_text = render::timestamp();
        let right_text = "";

        let mut width = cfg.bar_width;
        if cfg.full_width {
            width = render::fit_width(self.terminal.columns(), &cfg.prefix, &left_text, right_text);
            self.state.saucer_size = self.state.percent as usize * width / 100;
        }

        let bar = render::compose_bar(&cfg.theme, self.state.saucer_size, width);
        let line = render::compose_line(
            &left_text,
            &cfg.prefix,
            &bar,
            self.state.units_done,
            cfg.max_units,
        );
        self.write_str(&line)?;
        self.state.rendered = line.trim_start_matches('\r').to_string();
        Ok(line.len())
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.out.write_all(s.as_bytes())?;
        let _ = self.out.flush();
        Ok(())
    }
}

impl fmt::Display for ProgressTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered())
    }
}

impl fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Counting sink: every write advances by the buffer length and reports it
/// fully written.
impl Write for &ProgressTracker {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.advance_usize(buf.len())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Write for ProgressTracker {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
