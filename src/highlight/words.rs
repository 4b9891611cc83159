//! Word-level diffing of a deleted/inserted line pair.

use std::ops::Range;

use similar::{capture_diff_slices, Algorithm, DiffOp};
use unicode_segmentation::UnicodeSegmentation;

use super::{WordChange, WordChangeKind, WordDiff};

/// Diffs on Unicode word boundaries with the Myers algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarWordDiff;

impl WordDiff for SimilarWordDiff {
    fn diff_words(&self, old: &str, new: &str) -> Vec<WordChange> {
        let old_tokens: Vec<&str> = old.split_word_bounds().collect();
        let new_tokens: Vec<&str> = new.split_word_bounds().collect();

        let mut changes = Vec::new();
        for op in capture_diff_slices(Algorithm::Myers, &old_tokens, &new_tokens) {
            match op {
                DiffOp::Equal { old_index, len, .. } => changes.push(WordChange::new(
                    WordChangeKind::Common,
                    old_tokens[old_index..old_index + len].concat(),
                )),
                DiffOp::Delete {
                    old_index, old_len, ..
                } => changes.push(WordChange::new(
                    WordChangeKind::Removed,
                    old_tokens[old_index..old_index + old_len].concat(),
                )),
                DiffOp::Insert {
                    new_index, new_len, ..
                } => changes.push(WordChange::new(
                    WordChangeKind::Added,
                    new_tokens[new_index..new_index + new_len].concat(),
                )),
                DiffOp::Replace {
                    old_index,
                    old_len,
                    new_index,
                    new_len,
                } => {
                    changes.push(WordChange::new(
                        WordChangeKind::Removed,
                        old_tokens[old_index..old_index + old_len].concat(),
                    ));
                    changes.push(WordChange::new(
                        WordChangeKind::Added,
                        new_tokens[new_index..new_index + new_len].concat(),
                    ));
                }
            }
        }
        changes
    }
}

/// Char ranges to emphasize in the old and new line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangedRanges {
    /// Removed stretches of the old line.
    pub old: Vec<Range<usize>>,
    /// Added stretches of the new line.
    pub new: Vec<Range<usize>>,
}

/// Turn word changes into ranges, unless the lines differ too much.
///
/// Returns `None` when changed words outnumber common words by more than
/// `max_ratio`; such a pair reads better with no word emphasis at all.
pub fn changed_ranges(changes: &[WordChange], max_ratio: f64) -> Option<ChangedRanges> {
    let mut ranges = ChangedRanges::default();
    let (mut old_offset, mut new_offset) = (0, 0);
    let (mut common_words, mut changed_words) = (0usize, 0usize);

    for change in changes {
        let length = change.text.chars().count();
        let words = count_words(&change.text);
        match change.kind {
            WordChangeKind::Common => {
                common_words += words;
                old_offset += length;
                new_offset += length;
            }
            WordChangeKind::Removed => {
                changed_words += words;
                ranges.old.push(old_offset..old_offset + length);
                old_offset += length;
            }
            WordChangeKind::Added => {
                changed_words += words;
                ranges.new.push(new_offset..new_offset + length);
                new_offset += length;
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let too_different = changed_words as f64 > common_words as f64 * max_ratio;
    (!too_different).then_some(ranges)
}

fn count_words(text: &str) -> usize {
    text.split_word_bounds()
        .filter(|token| token.chars().any(|c| !c.is_whitespace()))
        .count()
}
