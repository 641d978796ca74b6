//! procbar: a single-line, in-place terminal progress bar for byte-counted I/O.
//!
//! Wrap a stream in [`io::ProgressReader`] / [`io::ProgressWriter`], or call
//! [`ProgressTracker::advance`] directly, and the bar redraws itself whenever
//! the whole-number percentage changes.

pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod term;
pub mod tracker;
pub mod url_model;

pub use error::{ProgressError, Result};
pub use io::{ProgressReader, ProgressWriter};
pub use tracker::{ProgressSnapshot, ProgressTracker, Theme, TrackerBuilder, TrackerOption};
