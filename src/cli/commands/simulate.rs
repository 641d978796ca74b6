//! `procbar simulate` – drive the bar with synthetic units.

use anyhow::{ensure, Result};
use procbar::{ProgressTracker, TrackerOption};
use std::thread;
use std::time::Duration;

pub fn run_simulate(total: u64, chunk: u64, delay_ms: u64, opts: Vec<TrackerOption>) -> Result<()> {
    ensure!(chunk > 0, "--chunk must be greater than 0");

    let tracker = ProgressTracker::with_options(total, opts);
    let delay = Duration::from_millis(delay_ms);
    let mut done = 0u64;
    while done < total {
        let step = chunk.min(total - done);
        tracker.advance(step)?;
        done += step;
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    let snap = tracker.snapshot();
    tracing::info!(
        units = snap.units_done,
        rate = snap.units_per_sec.unwrap_or_default(),
        "simulation finished"
    );
    Ok(())
}
