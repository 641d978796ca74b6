//! Pass-through I/O wrappers that advance a [`ProgressTracker`].
//!
//! Every successful `read`/`write` on the inner stream advances the tracker by
//! the byte count the inner stream reported, and that count is returned
//! unchanged. A tracker error (limit exceeded, bar output failure) becomes the
//! I/O error of the call.

use std::io::{self, Read, Write};

use crate::tracker::ProgressTracker;

/// Wraps a [`Read`] and counts bytes read.
pub struct ProgressReader<R> {
    inner: R,
    tracker: ProgressTracker,
}

impl<R> ProgressReader<R> {
    pub fn new(inner: R, tracker: ProgressTracker) -> Self {
        Self { inner, tracker }
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.tracker.advance_usize(n)?;
        Ok(n)
    }
}

/// Wraps a [`Write`] and counts bytes written.
pub struct ProgressWriter<W> {
    inner: W,
    tracker: ProgressTracker,
}

impl<W> ProgressWriter<W> {
    pub fn new(inner: W, tracker: ProgressTracker) -> Self {
        Self { inner, tracker }
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for ProgressWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.tracker.advance_usize(n)?;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
