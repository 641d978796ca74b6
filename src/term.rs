//! Terminal size query used for full-width bars.

use std::io::IsTerminal;

/// Columns assumed when the output is not a terminal or the query fails.
pub const DEFAULT_COLUMNS: usize = 80;
const DEFAULT_ROWS: usize = 1;

/// Answers "how wide is the terminal right now". Injected into the tracker so
/// tests can pin the width.
pub trait TerminalSize: Send {
    /// Returns `(columns, rows)`.
    fn size(&self) -> (usize, usize);

    fn columns(&self) -> usize {
        self.size().0
    }
}

/// Queries the process's standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutTerminal;

impl TerminalSize for StdoutTerminal {
    fn size(&self) -> (usize, usize) {
        if !std::io::stdout().is_terminal() {
            return (DEFAULT_COLUMNS, DEFAULT_ROWS);
        }
        query_stdout().unwrap_or((DEFAULT_COLUMNS, DEFAULT_ROWS))
    }
}

/// Always reports the same size.
#[derive(Debug, Clone, Copy)]
pub struct FixedTerminal {
    pub columns: usize,
    pub rows: usize,
}

impl FixedTerminal {
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            rows: DEFAULT_ROWS,
        }
    }
}

impl TerminalSize for FixedTerminal {
    fn size(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }
}

#[cfg(unix)]
fn query_stdout() -> Option<(usize, usize)> {
    let mut ws = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let r = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };
    if r != 0 || ws.ws_col == 0 {
        tracing::trace!(result = r, "TIOCGWINSZ gave no size, using default");
        return None;
    }
    Some((usize::from(ws.ws_col), usize::from(ws.ws_row)))
}

#[cfg(not(unix))]
fn query_stdout() -> Option<(usize, usize)> {
    None
}
