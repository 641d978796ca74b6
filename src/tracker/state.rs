//! Mutable progress state and the throughput sampling window.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// A rate sample is taken once the window has been open longer than this.
pub(crate) const RATE_SAMPLE_INTERVAL: Duration = Duration::from_millis(500);
/// Number of rate samples kept for smoothing.
pub(crate) const RATE_HISTORY: usize = 10;

/// Units-per-second samples over consecutive windows of at least
/// [`RATE_SAMPLE_INTERVAL`]. Oldest sample is dropped first.
#[derive(Debug, Clone)]
pub(crate) struct RateWindow {
    units: u64,
    start: Instant,
    samples: VecDeque<f64>,
}

impl RateWindow {
    pub fn new(now: Instant) -> Self {
        Self {
            units: 0,
            start: now,
            samples: VecDeque::with_capacity(RATE_HISTORY),
        }
    }

    /// Adds `n` units to the open window. Closes the window and returns the
    /// new sample when enough time has passed.
    pub fn record(&mut self, n: u64, now: Instant) -> Option<f64> {
        self.units = self.units.saturating_add(n);
        let elapsed = now.saturating_duration_since(self.start);
        if elapsed <= RATE_SAMPLE_INTERVAL {
            return None;
        }
        let rate = self.units as f64 / elapsed.as_secs_f64();
        if self.samples.len() == RATE_HISTORY {
            self.samples.pop_front();
        }
        self.samples.push_back(rate);
        self.start = now;
        self.units = 0;
        Some(rate)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// Mean of the kept samples.
    pub fn smoothed(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ProgressState {
    pub units_done: u64,
    /// Float mirror of `units_done` kept for rate math.
    pub bytes_done: f64,
    pub percent: u32,
    pub saucer_size: usize,
    pub last_percent: u32,
    pub last_render: Option<Instant>,
    pub rates: RateWindow,
    /// Widest line written so far; the next render blanks this many columns.
    pub max_line_width: usize,
    /// Terminal: never reset once set.
    pub finished: bool,
    pub rendered: String,
    pub started: Instant,
}

impl ProgressState {
    pub fn new(now: Instant) -> Self {
        Self {
            units_done: 0,
            bytes_done: 0.0,
            percent: 0,
            saucer_size: 0,
            last_percent: 0,
            last_render: None,
            rates: RateWindow::new(now),
            max_line_width: 0,
            finished: false,
            rendered: String::new(),
            started: now,
        }
    }

    /// Recomputes percent and saucer size for a bar `width` cells wide and
    /// folds `n` into the byte mirror.
    pub fn update_derived(&mut self, n: u64, max_units: u64, width: usize) {
        self.percent = floor_percent(self.units_done, max_units);
        self.saucer_size = scaled(self.units_done, max_units, width);
        self.bytes_done += n as f64;
    }

    /// Records the current percent as seen and reports whether it moved.
    pub fn take_render_trigger(&mut self) -> bool {
        let changed = self.percent != self.last_percent && self.units_done > 0;
        self.last_percent = self.percent;
        changed
    }
}

/// `floor(units * 100 / max)`, computed in integers.
pub(crate) fn floor_percent(units: u64, max_units: u64) -> u32 {
    scaled(units, max_units, 100) as u32
}

/// `floor(units * cells / max)`, computed in integers.
pub(crate) fn scaled(units: u64, max_units: u64, cells: usize) -> usize {
    if max_units == 0 {
        return 0;
    }
    (u128::from(units) * cells as u128 / u128::from(max_units)) as usize
}
