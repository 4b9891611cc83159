//! Screen width detection.

use crossterm::terminal;

/// Columns assumed when the terminal cannot be queried (output is a pipe).
pub const FALLBACK_COLUMNS: usize = 80;

/// Source of the output width.
pub trait WidthProvider {
    /// Available columns.
    fn columns(&self) -> usize;
}

/// Width of the controlling terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalWidth;

impl WidthProvider for TerminalWidth {
    fn columns(&self) -> usize {
        match terminal::size() {
            Ok((width, _)) if width > 0 => usize::from(width),
            Ok(_) => FALLBACK_COLUMNS,
            Err(err) => {
                log::debug!("terminal size unavailable ({err}), using {FALLBACK_COLUMNS} columns");
                FALLBACK_COLUMNS
            }
        }
    }
}

/// A width set by the user or a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWidth(pub usize);

impl WidthProvider for FixedWidth {
    fn columns(&self) -> usize {
        self.0
    }
}
