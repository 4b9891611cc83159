//! Hunk buffers and `@@` header parsing.

use crate::error::{Error, Result};

/// How a buffered hunk line relates to its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Present on every side.
    Context,
    /// Removed relative to this side.
    Deleted,
    /// Added on the final side.
    Inserted,
    /// `\ No newline at end of file`.
    NoNewline,
}

impl LineKind {
    /// Split a buffered line into its kind and its text.
    pub fn split(line: &str) -> (Self, &str) {
        let mut chars = line.chars();
        let kind = match chars.next() {
            Some('-') => Self::Deleted,
            Some('+') => Self::Inserted,
            Some('\\') => Self::NoNewline,
            _ => Self::Context,
        };
        (kind, chars.as_str())
    }

    /// The marker char stored in front of buffered lines of this kind.
    pub const fn marker(self) -> char {
        match self {
            Self::Context => ' ',
            Self::Deleted => '-',
            Self::Inserted => '+',
            Self::NoNewline => '\\',
        }
    }
}

/// One side's view of a hunk.
///
/// All parts of a hunk are index-aligned: row `i` of every part describes
/// the same output row, and `None` means the side has no line there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HunkPart {
    /// File name on this side; empty when the file is absent (added/deleted).
    pub label: String,
    /// First line number of the range, `-1` once the part has been flushed.
    pub start_line: i64,
    /// Buffered lines, each keeping its single marker char.
    pub lines: Vec<Option<String>>,
}

impl HunkPart {
    /// An empty part starting at `start_line`.
    pub fn new(label: impl Into<String>, start_line: i64) -> Self {
        Self {
            label: label.into(),
            start_line,
            lines: Vec::new(),
        }
    }

    /// Move the buffered state out, leaving this part cleared.
    pub fn take(&mut self) -> Self {
        let taken = Self {
            label: self.label.clone(),
            start_line: self.start_line,
            lines: std::mem::take(&mut self.lines),
        };
        self.start_line = -1;
        taken
    }

    /// Whether this side has a file at all.
    #[inline]
    pub fn is_missing(&self) -> bool {
        self.label.is_empty()
    }
}

/// A complete hunk: its header line and one part per side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// The `@@` line as it appeared in the input.
    pub header: String,
    /// Two parts for an ordinary diff, one per parent plus the result for a
    /// combined diff. The last part is always the current version.
    pub parts: Vec<HunkPart>,
}

impl Hunk {
    /// Number of aligned rows.
    pub fn row_count(&self) -> usize {
        self.parts.iter().map(|p| p.lines.len()).max().unwrap_or(0)
    }
}

/// One `-start,count` / `+start,count` range of a hunk header. The count
/// is validated but not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkRange {
    /// First line of the range.
    pub start: i64,
}

/// Parse a `@@ -a,b +c,d @@ context` header into per-side ranges.
///
/// The number of `@` in the marker run gives the number of sides: `@@` for
/// an ordinary diff, `@@@` for a two-parent combined diff.
pub fn parse_hunk_header(line: &str) -> Result<Vec<HunkRange>> {
    let malformed = |reason| Error::MalformedHunkHeader {
        line: line.to_string(),
        reason,
    };

    let sides = line.chars().take_while(|&c| c == '@').count();
    if sides < 2 {
        return Err(malformed("marker needs at least two '@'"));
    }
    let marker = &line[..sides];

    let mut ranges = Vec::with_capacity(sides);
    let mut closed = false;
    for token in line[sides..].split_whitespace() {
        if token == marker {
            closed = true;
            break;
        }
        let expected = if ranges.len() + 1 < sides { '-' } else { '+' };
        let Some(range) = token.strip_prefix(expected) else {
            return Err(malformed("unexpected range prefix"));
        };
        ranges.push(parse_range(range).ok_or_else(|| malformed("range is not a number"))?);
    }

    if !closed {
        return Err(malformed("missing closing marker"));
    }
    if ranges.len() != sides {
        return Err(malformed("range count does not match marker"));
    }
    Ok(ranges)
}

fn parse_range(range: &str) -> Option<HunkRange> {
    let start = match range.split_once(',') {
        Some((start, count)) => {
            count.parse::<i64>().ok()?;
            start
        }
        None => range,
    };
    Some(HunkRange {
        start: start.parse().ok()?,
    })
}
