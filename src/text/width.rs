//! Display-width helpers.
//!
//! Widths follow East-Asian-width rules via `unicode-width`: most characters
//! occupy one column, wide CJK characters two, combining marks zero.
//! Control characters have no defined width and count as zero.

use unicode_width::UnicodeWidthChar;

/// Terminal columns occupied by `c`.
#[inline]
pub fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Terminal columns occupied by `s`, summed per character.
///
/// This deliberately matches what the word wrapper measures, so a string
/// whose width fits a column is never split by it.
#[inline]
pub fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}
