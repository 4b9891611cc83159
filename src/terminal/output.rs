//! `OutputBuffer`: batched output of styled rows.

use std::io::{ErrorKind, Write};

use crate::style::{write_styled, StyledString};

/// What happened when the buffer was flushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flush {
    /// Everything was written.
    Written,
    /// The reader went away (e.g. the pager was quit). Not an error: the
    /// caller should stop producing output.
    Closed,
}

/// Pre-allocated buffer for styled rows.
///
/// Rows are accumulated here and written with one `write_all` per flush
/// instead of one per escape sequence.
pub struct OutputBuffer {
    data: Vec<u8>,
    color: bool,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize, color: bool) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            color,
        }
    }

    /// Create a buffer sized for a screenful of rows (16KB).
    pub fn new(color: bool) -> Self {
        Self::with_capacity(16 * 1024, color)
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append one row followed by a newline.
    pub fn push_row(&mut self, row: &StyledString) {
        write_styled(&mut self.data, row, self.color);
        self.data.push(b'\n');
    }

    /// Write the buffered rows to `writer` and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails for any reason other
    /// than a closed pipe.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> std::io::Result<Flush> {
        let result = writer.write_all(&self.data).and_then(|()| writer.flush());
        self.data.clear();
        match result {
            Ok(()) => Ok(Flush::Written),
            Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(Flush::Closed),
            Err(err) => Err(err),
        }
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new(true)
    }
}
