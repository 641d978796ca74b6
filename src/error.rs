//! Error type for progress tracking and rendering.

use std::io;

/// Failure returned by [`ProgressTracker::advance`](crate::tracker::ProgressTracker::advance).
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// The cumulative count passed the configured maximum. The increment that
    /// caused this has already been applied to the tracker's count.
    #[error("progress exceeds limit: {units_done} of {max_units} units")]
    LimitExceeded { units_done: u64, max_units: u64 },
    /// Writing to the output sink failed. Not retried.
    #[error("progress output write failed: {0}")]
    Write(#[from] io::Error),
}

impl ProgressError {
    /// True if this is [`ProgressError::LimitExceeded`].
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(self, ProgressError::LimitExceeded { .. })
    }
}

/// Stream adapters surface tracker errors as I/O errors. Sink failures keep
/// their original kind; limit errors become `Other` with the tracker error as source.
impl From<ProgressError> for io::Error {
    fn from(err: ProgressError) -> Self {
        match err {
            ProgressError::Write(e) => e,
            limit @ ProgressError::LimitExceeded { .. } => io::Error::new(io::ErrorKind::Other, limit),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProgressError>;
