//! `SpannedString`: text carrying attribute spans.
//!
//! # Representation
//!
//! Spans are stored as boundary markers rather than as ranges. Every char
//! offset `0..=len` owns a (usually empty) list of [`SpanMarker`]s; a span
//! over `[start, end)` is a `Start` marker at `start` and an `End` marker at
//! `end` that share an id.
//!
//! ```text
//!   text:      h   e   l   l   o
//!   offset:  0   1   2   3   4   5
//!   markers: S0      S1      E1  E0     (span 0 = [0,5), span 1 = [2,4))
//! ```
//!
//! Ids come from a per-string counter. They pair markers and order attributes
//! that are active at the same time: a lower id was applied earlier.
//!
//! Offsets are in chars, never bytes.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Bound, RangeBounds};

use super::width::char_width;
use crate::error::{Error, Result};

/// One end of a span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanMarker<T> {
    /// The span begins at this offset and carries `attribute`.
    Start {
        /// Pairing id.
        id: u64,
        /// Attribute applied over the span.
        attribute: T,
    },
    /// The span with this id ends before this offset.
    End {
        /// Pairing id.
        id: u64,
    },
}

impl<T> SpanMarker<T> {
    /// The id pairing this marker with its counterpart.
    #[inline]
    pub const fn id(&self) -> u64 {
        match self {
            Self::Start { id, .. } | Self::End { id } => *id,
        }
    }

    fn shifted(self, by: u64) -> Self {
        match self {
            Self::Start { id, attribute } => Self::Start {
                id: id + by,
                attribute,
            },
            Self::End { id } => Self::End { id: id + by },
        }
    }
}

/// Text with attribute spans over half-open char ranges.
///
/// Builder methods return `&mut Self` so construction chains:
///
/// ```
/// use split_diffs::text::SpannedString;
///
/// let mut s = SpannedString::new();
/// s.append_str("hello ", ["greeting"]).append_str("world", ["noun"]);
/// assert_eq!(s.as_str(), "hello world");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedString<T> {
    text: String,
    /// `len() + 1` marker lists, one per boundary.
    markers: Vec<Vec<SpanMarker<T>>>,
    next_id: u64,
}

impl<T> SpannedString<T> {
    /// Create an empty string with no spans.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            markers: vec![Vec::new()],
            next_id: 0,
        }
    }

    /// Length in chars.
    #[inline]
    pub fn len(&self) -> usize {
        self.markers.len() - 1
    }

    /// Whether the text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The raw text without attributes.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Marker lists by offset, `len() + 1` entries.
    #[inline]
    pub fn markers(&self) -> &[Vec<SpanMarker<T>>] {
        &self.markers
    }

    /// Apply `attribute` over `[start, end)`.
    ///
    /// # Panics
    ///
    /// Panics unless `start <= end <= self.len()`.
    pub fn add_span(&mut self, start: usize, end: usize, attribute: T) -> &mut Self {
        assert!(
            start <= end && end <= self.len(),
            "span {start}..{end} out of bounds for length {}",
            self.len()
        );
        let id = self.next_id;
        self.next_id += 1;
        self.markers[start].push(SpanMarker::Start { id, attribute });
        self.markers[end].push(SpanMarker::End { id });
        self
    }

    /// Append `text` with no attributes.
    pub fn append_plain(&mut self, text: &str) -> &mut Self {
        self.text.push_str(text);
        let added = text.chars().count();
        self.markers
            .extend(std::iter::repeat_with(Vec::new).take(added));
        self
    }

    /// Append `text`, then apply each attribute over the appended range in
    /// argument order.
    pub fn append_str<I>(&mut self, text: &str, attributes: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
    {
        let start = self.len();
        self.append_plain(text);
        let end = self.len();
        for attribute in attributes {
            self.add_span(start, end, attribute);
        }
        self
    }

    /// Display width in terminal columns.
    pub fn width(&self) -> usize {
        self.text.chars().map(char_width).sum()
    }

    /// Display width of every char, in order.
    pub fn char_widths(&self) -> Vec<usize> {
        self.text.chars().map(char_width).collect()
    }

    /// Append unattributed `fill` chars until the width reaches `width`.
    ///
    /// A wide fill char is never allowed to overshoot, so the result may stay
    /// one column short. Zero-width fill chars are ignored.
    pub fn fill_width(&mut self, width: usize, fill: char) -> &mut Self {
        let current = self.width();
        let step = char_width(fill);
        if current >= width || step == 0 {
            return self;
        }
        let padding: String = std::iter::repeat(fill).take((width - current) / step).collect();
        self.append_plain(&padding)
    }

    /// Runs of text with the attributes active over each run.
    ///
    /// Attributes are ordered by application (ascending id). The iterator
    /// borrows the string, so calling this again restarts from the beginning.
    pub fn iter_substrings(&self) -> Substrings<'_, T> {
        Substrings {
            text: &self.text,
            markers: &self.markers,
            chars: self.text.chars(),
            active: BTreeMap::new(),
            offset: 0,
            byte: 0,
        }
    }

    fn byte_offset(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map_or(self.text.len(), |(byte, _)| byte)
    }
}

impl<T: Clone> SpannedString<T> {
    /// Append `other`, keeping its spans.
    ///
    /// `other` is left untouched. Its ids are shifted past every id in
    /// `self`, and the marker lists at the junction are merged.
    pub fn append_spanned(&mut self, other: &Self) -> &mut Self {
        let shift = self.next_id;
        let junction = self.len();
        self.text.push_str(&other.text);

        let mut lists = other.markers.iter();
        if let Some(first) = lists.next() {
            self.markers[junction].extend(first.iter().cloned().map(|m| m.shifted(shift)));
        }
        self.markers.extend(
            lists.map(|list| list.iter().cloned().map(|m| m.shifted(shift)).collect()),
        );
        self.next_id += other.next_id;
        self
    }

    /// An independent copy of the chars in `range`.
    ///
    /// Spans active at the start of the range begin at offset 0 of the
    /// result; spans still active at the end of the range end at its last
    /// offset. Spans wholly outside are dropped. Bounds past the end are
    /// clamped, and an empty or inverted range yields an empty string.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Self {
        let len = self.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        }
        .min(len);

        if start >= end {
            return Self {
                next_id: self.next_id,
                ..Self::new()
            };
        }

        let mut active: BTreeMap<u64, &T> = BTreeMap::new();
        for list in &self.markers[..=start] {
            apply_markers(list, &mut active);
        }

        let mut markers = Vec::with_capacity(end - start + 1);
        markers.push(
            active
                .iter()
                .map(|(&id, &attribute)| SpanMarker::Start {
                    id,
                    attribute: attribute.clone(),
                })
                .collect(),
        );
        for list in &self.markers[start + 1..end] {
            markers.push(list.clone());
            apply_markers(list, &mut active);
        }
        markers.push(active.keys().map(|&id| SpanMarker::End { id }).collect());

        let (from, to) = (self.byte_offset(start), self.byte_offset(end));
        Self {
            text: self.text[from..to].to_string(),
            markers,
            next_id: self.next_id,
        }
    }

    /// Like [`slice`](Self::slice), but accepts signed bounds and rejects
    /// negative ones.
    pub fn checked_slice(&self, start: i64, end: i64) -> Result<Self> {
        if start < 0 || end < 0 {
            return Err(Error::InvalidRange { start, end });
        }
        let start = usize::try_from(start).unwrap_or(usize::MAX);
        let end = usize::try_from(end).unwrap_or(usize::MAX);
        Ok(self.slice(start..end))
    }

    /// The longest prefix that fits in `width` columns.
    pub fn truncate_to_width(&self, width: usize) -> Self {
        let mut used = 0;
        let mut count = 0;
        for w in self.text.chars().map(char_width) {
            if used + w > width {
                break;
            }
            used += w;
            count += 1;
        }
        self.slice(..count)
    }
}

fn apply_markers<'a, T>(list: &'a [SpanMarker<T>], active: &mut BTreeMap<u64, &'a T>) {
    for marker in list {
        match marker {
            SpanMarker::Start { id, attribute } => {
                active.insert(*id, attribute);
            }
            SpanMarker::End { id } => {
                active.remove(id);
            }
        }
    }
}

impl<T> Default for SpannedString<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<&str> for SpannedString<T> {
    fn from(text: &str) -> Self {
        let mut s = Self::new();
        s.append_plain(text);
        s
    }
}

impl<T> fmt::Display for SpannedString<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Iterator over attributed runs, see [`SpannedString::iter_substrings`].
pub struct Substrings<'a, T> {
    text: &'a str,
    markers: &'a [Vec<SpanMarker<T>>],
    chars: std::str::Chars<'a>,
    active: BTreeMap<u64, &'a T>,
    offset: usize,
    byte: usize,
}

impl<'a, T> Iterator for Substrings<'a, T> {
    type Item = (&'a str, Vec<&'a T>);

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.markers.len() - 1;
        if self.offset >= len {
            return None;
        }

        apply_markers(&self.markers[self.offset], &mut self.active);
        let attributes = self.active.values().copied().collect();

        let from = self.byte;
        // Advance at least one char, then stop at the next boundary with markers.
        while let Some(c) = self.chars.next() {
            self.byte += c.len_utf8();
            self.offset += 1;
            if self.offset >= len || !self.markers[self.offset].is_empty() {
                break;
            }
        }
        Some((&self.text[from..self.byte], attributes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn runs<T: Clone>(s: &SpannedString<T>) -> Vec<(String, Vec<T>)> {
        s.iter_substrings()
            .map(|(text, attrs)| (text.to_string(), attrs.into_iter().cloned().collect()))
            .collect()
    }

    #[test]
    fn test_empty() {
        let s: SpannedString<u8> = SpannedString::new();
        assert_eq!(s.len(), 0);
        assert_eq!(s.as_str(), "");
        assert_eq!(s.iter_substrings().count(), 0);
    }

    #[test]
    fn test_append_str_applies_attributes_in_order() {
        let mut s = SpannedString::new();
        s.append_str("abc", ['x', 'y']);
        assert_eq!(runs(&s), vec![("abc".to_string(), vec!['x', 'y'])]);
    }

    #[test]
    fn test_render_as_tags() {
        let mut s = SpannedString::new();
        s.append_str("one", ['b'])
            .append_plain(" ")
            .append_str("two", ['b', 'i']);
        let tagged: String = s
            .iter_substrings()
            .map(|(text, attrs)| {
                let open: String = attrs.iter().map(|a| format!("<{a}>")).collect();
                let close: String = attrs.iter().rev().map(|a| format!("</{a}>")).collect();
                format!("{open}{text}{close}")
            })
            .collect();
        assert_eq!(tagged, "<b>one</b> <b><i>two</i></b>");
    }

    #[test]
    fn test_slice_then_append_leaves_no_stale_span() {
        let mut s = SpannedString::from("12");
        s.add_span(0, 1, 'x');
        let mut tail = s.slice(1..2);
        tail.append_plain("3");
        assert_eq!(tail.as_str(), "23");
        assert_eq!(runs(&tail), vec![("23".to_string(), vec![])]);
    }

    #[test]
    fn test_overlapping_spans_split_runs() {
        let mut s = SpannedString::new();
        s.append_plain("hello");
        s.add_span(0, 5, 'a').add_span(2, 4, 'b');
        assert_eq!(
            runs(&s),
            vec![
                ("he".to_string(), vec!['a']),
                ("ll".to_string(), vec!['a', 'b']),
                ("o".to_string(), vec!['a']),
            ]
        );
    }

    #[test]
    fn test_zero_length_span_is_never_active() {
        let mut s = SpannedString::new();
        s.append_plain("ab");
        s.add_span(1, 1, 'z');
        let attrs: Vec<Vec<char>> = runs(&s).into_iter().map(|(_, a)| a).collect();
        assert!(attrs.iter().all(Vec::is_empty));
        assert_eq!(runs(&s).concat_text(), "ab");
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_add_span_past_end_panics() {
        let mut s: SpannedString<u8> = SpannedString::from("abc");
        s.add_span(1, 4, 0);
    }

    #[test]
    fn test_append_spanned_remaps_ids() {
        let mut left = SpannedString::new();
        left.append_str("ab", ['l']);
        let mut right = SpannedString::new();
        right.append_str("cd", ['r']);

        left.append_spanned(&right);
        assert_eq!(left.as_str(), "abcd");
        assert_eq!(
            runs(&left),
            vec![("ab".to_string(), vec!['l']), ("cd".to_string(), vec!['r'])]
        );
        // The right-hand span got a fresh id.
        let ids: Vec<u64> = left.markers().iter().flatten().map(SpanMarker::id).collect();
        assert_eq!(ids, vec![0, 0, 1, 1]);
        // The argument is untouched.
        assert_eq!(right.markers()[0], vec![SpanMarker::Start { id: 0, attribute: 'r' }]);
    }

    #[test]
    fn test_append_spanned_twice_keeps_ids_unique() {
        let mut piece = SpannedString::new();
        piece.append_str("x", [1u8]);
        let mut s = SpannedString::new();
        s.append_spanned(&piece).append_spanned(&piece);
        s.add_span(0, 2, 9);
        assert_eq!(
            runs(&s),
            vec![("x".to_string(), vec![1, 9]), ("x".to_string(), vec![1, 9])]
        );
    }

    #[test]
    fn test_slice_synthesizes_boundaries() {
        let mut s = SpannedString::new();
        s.append_plain("0123456789");
        s.add_span(0, 10, 'a').add_span(2, 5, 'b').add_span(6, 8, 'c');

        let sliced = s.slice(3..7);
        assert_eq!(sliced.as_str(), "3456");
        assert_eq!(
            runs(&sliced),
            vec![
                ("34".to_string(), vec!['a', 'b']),
                ("5".to_string(), vec!['a']),
                ("6".to_string(), vec!['a', 'c']),
            ]
        );
    }

    #[test]
    fn test_slice_drops_spans_ending_at_start() {
        let mut s = SpannedString::new();
        s.append_plain("abcd");
        s.add_span(0, 2, 'x');
        assert_eq!(runs(&s.slice(2..)), vec![("cd".to_string(), vec![])]);
    }

    #[test]
    fn test_slice_clamps_and_handles_empty() {
        let s: SpannedString<u8> = SpannedString::from("abc");
        assert_eq!(s.slice(1..100).as_str(), "bc");
        assert!(s.slice(2..1).is_empty());
        assert!(s.slice(5..).is_empty());
        assert_eq!(s.slice(..).as_str(), "abc");
    }

    #[test]
    fn test_slice_multibyte() {
        let mut s = SpannedString::new();
        s.append_str("のオリ", ['w']);
        let sliced = s.slice(1..2);
        assert_eq!(sliced.as_str(), "オ");
        assert_eq!(runs(&sliced), vec![("オ".to_string(), vec!['w'])]);
    }

    #[test]
    fn test_checked_slice_rejects_negative() {
        let s: SpannedString<u8> = SpannedString::from("abc");
        assert!(matches!(
            s.checked_slice(-1, 2),
            Err(Error::InvalidRange { start: -1, end: 2 })
        ));
        assert_eq!(s.checked_slice(1, 2).unwrap().as_str(), "b");
    }

    #[test]
    fn test_width_and_fill() {
        let mut s: SpannedString<u8> = SpannedString::from("aの");
        assert_eq!(s.width(), 3);
        assert_eq!(s.char_widths(), vec![1, 2]);
        s.fill_width(6, ' ');
        assert_eq!(s.as_str(), "aの   ");
        s.fill_width(2, ' ');
        assert_eq!(s.width(), 6);
    }

    #[test]
    fn test_fill_with_wide_char_never_overshoots() {
        let mut s: SpannedString<u8> = SpannedString::from("a");
        s.fill_width(4, 'の');
        assert_eq!(s.as_str(), "aの");
        assert_eq!(s.width(), 3);
    }

    #[test]
    fn test_truncate_to_width() {
        let mut s = SpannedString::new();
        s.append_str("abのc", [1u8]);
        let cut = s.truncate_to_width(3);
        assert_eq!(cut.as_str(), "ab");
        assert_eq!(runs(&cut), vec![("ab".to_string(), vec![1])]);
        assert_eq!(s.truncate_to_width(4).as_str(), "abの");
    }

    trait ConcatText {
        fn concat_text(&self) -> String;
    }

    impl<T> ConcatText for Vec<(String, T)> {
        fn concat_text(&self) -> String {
            self.iter().map(|(t, _)| t.as_str()).collect()
        }
    }

    fn build(text: &str, spans: &[(usize, usize)]) -> SpannedString<usize> {
        let mut s = SpannedString::from(text);
        let len = s.len();
        for (i, &(a, b)) in spans.iter().enumerate() {
            let (a, b) = (a % (len + 1), b % (len + 1));
            s.add_span(a.min(b), a.max(b), i);
        }
        s
    }

    /// Attributes active at every char, as sets.
    fn per_char_attributes(s: &SpannedString<usize>) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        for (text, attrs) in s.iter_substrings() {
            let mut attrs: Vec<usize> = attrs.into_iter().copied().collect();
            attrs.sort_unstable();
            for _ in text.chars() {
                out.push(attrs.clone());
            }
        }
        out
    }

    proptest! {
        #[test]
        fn prop_substrings_round_trip(text in "[a-zのオ ]{0,24}", spans in prop::collection::vec((0usize..30, 0usize..30), 0..6)) {
            let s = build(&text, &spans);
            prop_assert_eq!(runs(&s).concat_text(), text);
        }

        #[test]
        fn prop_slice_composition(
            text in "[a-z ]{1,24}",
            spans in prop::collection::vec((0usize..30, 0usize..30), 0..6),
            a in 0usize..25, b in 0usize..25, c in 0usize..25,
        ) {
            let s = build(&text, &spans);
            let len = s.len();
            let mut bounds = [a.min(len), b.min(len), c.min(len)];
            bounds.sort_unstable();
            let [a, b, c] = bounds;

            let direct = s.slice(a..b);
            let nested = s.slice(a..c).slice(0..b - a);
            prop_assert_eq!(direct.as_str(), nested.as_str());
            prop_assert_eq!(per_char_attributes(&direct), per_char_attributes(&nested));
        }
    }
}
