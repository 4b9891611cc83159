//! Collaborators used while formatting hunk lines.
//!
//! Both are traits so the renderer can run with stand-ins in tests, or with
//! no syntax highlighting at all.

mod syntax;
mod words;

use crate::error::Result;
use crate::style::Rgb;

pub use syntax::SyntectHighlighter;
pub use words::{changed_ranges, ChangedRanges, SimilarWordDiff};

/// A colored stretch of a highlighted line, in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxToken {
    /// First char of the token.
    pub offset: usize,
    /// Length in chars.
    pub length: usize,
    /// Foreground color.
    pub color: Rgb,
}

/// Colors source lines by language.
pub trait SyntaxHighlighter {
    /// Tokens for one line of `file_name`.
    ///
    /// An unknown language yields no tokens rather than an error.
    fn highlight(&self, text: &str, file_name: &str) -> Result<Vec<SyntaxToken>>;
}

/// What happened to a stretch of text between two versions of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordChangeKind {
    /// Only in the old line.
    Removed,
    /// Only in the new line.
    Added,
    /// In both.
    Common,
}

/// One stretch of a word-level diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordChange {
    /// Kind of change.
    pub kind: WordChangeKind,
    /// The text.
    pub text: String,
}

impl WordChange {
    /// Convenience constructor.
    pub fn new(kind: WordChangeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Computes word-level differences between two lines.
pub trait WordDiff {
    /// Changes turning `old` into `new`. Concatenating the `Removed` and
    /// `Common` texts gives `old`; `Added` and `Common` give `new`.
    fn diff_words(&self, old: &str, new: &str) -> Vec<WordChange>;
}
