//! Streaming parser for `git log -p` / `git diff` transcripts.
//!
//! The parser is a line-driven state machine. Each input line first runs
//! through the transition rules (first match wins), then is handled by the
//! state it left the machine in:
//!
//! | # | condition                                   | next state     |
//! |---|---------------------------------------------|----------------|
//! | 1 | starts with `commit `                       | `CommitHeader` |
//! | 2 | in `CommitHeader`, starts with body indent  | `CommitBody`   |
//! | 3 | starts with `diff `                         | `Diff`         |
//! | 4 | starts with `@@`                            | `HunkHeader`   |
//! | 5 | in `HunkHeader`                             | `HunkBody`     |
//! | 6 | in `CommitBody`, non-empty and not indented | `Unknown`      |
//!
//! Only the hunk currently being read is buffered. It is flushed as a
//! [`DiffEvent::Hunk`] as soon as a line that ends it arrives, or at the end
//! of input.

use std::collections::VecDeque;

use super::file_header::FileLabels;
use super::hunk::{parse_hunk_header, Hunk, HunkPart, LineKind};
use crate::error::{Error, Result};

/// Indentation git puts in front of commit message lines.
pub const COMMIT_BODY_INDENT: &str = "    ";

/// Parser states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserState {
    /// Outside any recognized structure; lines pass through.
    #[default]
    Unknown,
    /// `commit`, `Author:`, `Date:` lines.
    CommitHeader,
    /// Indented commit message.
    CommitBody,
    /// File metadata between `diff` and the first `@@`.
    Diff,
    /// The `@@` line itself.
    HunkHeader,
    /// Lines of a hunk.
    HunkBody,
}

/// Structural output of the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffEvent {
    /// A line outside any recognized structure.
    Passthrough(String),
    /// A commit header line, split into its leading token and the rest.
    CommitHeader {
        /// `commit`, `Author:`, `Date:`, `Merge:` ... (may be empty).
        label: String,
        /// Everything after the label, leading spaces included.
        rest: String,
    },
    /// A commit message line.
    CommitBody {
        /// The line as written, indentation included.
        text: String,
        /// Whether this is the first message line.
        is_title: bool,
    },
    /// Names of the file the following hunks belong to.
    FileHeader {
        /// Name before the change; empty when the file was added.
        old: String,
        /// Name after the change; empty when the file was deleted.
        new: String,
    },
    /// A complete, aligned hunk.
    Hunk(Hunk),
    /// Visual break between the last hunk of a commit and the next commit.
    Separator,
}

/// The parser. Feed it lines with [`push_line`](Self::push_line) and call
/// [`finish`](Self::finish) at the end of input.
#[derive(Debug, Default)]
pub struct DiffParser {
    state: ParserState,
    labels: FileLabels,
    file_pending: bool,
    header: Option<String>,
    parts: Vec<HunkPart>,
    /// Sides that received the previous hunk body line.
    last_sides: Vec<usize>,
}

impl DiffParser {
    /// Create a parser in the `Unknown` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[inline]
    pub const fn state(&self) -> ParserState {
        self.state
    }

    /// Wrap a line iterator into an iterator of events.
    pub fn events<I>(self, lines: I) -> Events<I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Events {
            parser: self,
            lines: lines.into_iter(),
            pending: VecDeque::new(),
            error: None,
            done: false,
        }
    }

    /// Consume one normalized input line, appending any events it completes.
    ///
    /// Fails only on a malformed hunk header, after which the parser should
    /// not be fed further. The hunk that header would have ended is still
    /// appended to `out` first.
    pub fn push_line(&mut self, line: &str, out: &mut Vec<DiffEvent>) -> Result<()> {
        if line.starts_with("commit ") {
            if self.flush(out) {
                out.push(DiffEvent::Separator);
            }
            self.set_state(ParserState::CommitHeader);
        } else if self.state == ParserState::CommitHeader && line.starts_with(COMMIT_BODY_INDENT)
        {
            self.set_state(ParserState::CommitBody);
            self.handle(line, true, out);
            return Ok(());
        } else if line.starts_with("diff ") {
            self.flush(out);
            self.labels.clear();
            self.file_pending = true;
            self.set_state(ParserState::Diff);
        } else if line.starts_with("@@") {
            self.flush(out);
            self.open_hunk(line)?;
            self.set_state(ParserState::HunkHeader);
        } else if self.state == ParserState::HunkHeader {
            self.set_state(ParserState::HunkBody);
        } else if self.state == ParserState::CommitBody
            && !line.is_empty()
            && !line.starts_with(COMMIT_BODY_INDENT)
        {
            self.set_state(ParserState::Unknown);
        }
        self.handle(line, false, out);
        Ok(())
    }

    /// Flush whatever is pending at end of input.
    pub fn finish(&mut self, out: &mut Vec<DiffEvent>) {
        self.flush(out);
        self.set_state(ParserState::Unknown);
    }

    fn set_state(&mut self, state: ParserState) {
        if self.state != state {
            log::trace!("parser: {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    fn handle(&mut self, line: &str, is_title: bool, out: &mut Vec<DiffEvent>) {
        match self.state {
            ParserState::Unknown => out.push(DiffEvent::Passthrough(line.to_string())),
            ParserState::CommitHeader => {
                let label_len = line.find(' ').unwrap_or(line.len());
                out.push(DiffEvent::CommitHeader {
                    label: line[..label_len].to_string(),
                    rest: line[label_len..].to_string(),
                });
            }
            ParserState::CommitBody => out.push(DiffEvent::CommitBody {
                text: line.to_string(),
                is_title,
            }),
            ParserState::Diff => self.labels.scan(line),
            ParserState::HunkHeader => {}
            ParserState::HunkBody => self.push_body_line(line),
        }
    }

    /// Emit pending file header and hunk. Returns whether a hunk was open.
    fn flush(&mut self, out: &mut Vec<DiffEvent>) -> bool {
        if self.file_pending {
            self.file_pending = false;
            out.push(DiffEvent::FileHeader {
                old: self.labels.old.clone(),
                new: self.labels.new.clone(),
            });
        }

        let Some(header) = self.header.take() else {
            return false;
        };
        pad_to_equal_length(&mut self.parts);
        let parts: Vec<HunkPart> = self.parts.iter_mut().map(HunkPart::take).collect();
        log::debug!(
            "flushing hunk with {} sides and {} rows",
            parts.len(),
            parts.first().map_or(0, |p| p.lines.len())
        );
        out.push(DiffEvent::Hunk(Hunk { header, parts }));
        self.last_sides.clear();
        true
    }

    fn open_hunk(&mut self, line: &str) -> Result<()> {
        let ranges = parse_hunk_header(line)?;
        let last = ranges.len() - 1;
        self.parts = ranges
            .iter()
            .enumerate()
            .map(|(side, range)| {
                let label = if side == last {
                    &self.labels.new
                } else {
                    &self.labels.old
                };
                HunkPart::new(label.clone(), range.start)
            })
            .collect();
        self.header = Some(line.to_string());
        Ok(())
    }

    fn push_body_line(&mut self, line: &str) {
        let sides = self.parts.len();
        if sides == 0 {
            return;
        }
        let last = sides - 1;

        if line.starts_with('\\') {
            if self.last_sides.is_empty() {
                self.push_context(LineKind::NoNewline, &line[1..]);
            } else {
                for &side in &self.last_sides {
                    self.parts[side].lines.push(Some(line.to_string()));
                }
            }
            return;
        }

        let prefix_end = line
            .char_indices()
            .nth(last)
            .map_or(line.len(), |(byte, _)| byte);
        let (prefix, text) = line.split_at(prefix_end);

        if prefix.contains('+') {
            self.parts[last].lines.push(Some(format!("+{text}")));
            self.last_sides = vec![last];
        } else if prefix.contains('-') {
            self.last_sides = prefix
                .char_indices()
                .filter(|&(_, c)| c == '-')
                .map(|(side, _)| side)
                .collect();
            for &side in &self.last_sides {
                self.parts[side].lines.push(Some(format!("-{text}")));
            }
        } else {
            self.push_context(LineKind::Context, text);
        }
    }

    fn push_context(&mut self, kind: LineKind, text: &str) {
        pad_to_equal_length(&mut self.parts);
        let line = format!("{}{text}", kind.marker());
        for part in &mut self.parts {
            part.lines.push(Some(line.clone()));
        }
        self.last_sides = (0..self.parts.len()).collect();
    }
}

fn pad_to_equal_length(parts: &mut [HunkPart]) {
    let rows = parts.iter().map(|p| p.lines.len()).max().unwrap_or(0);
    for part in parts {
        part.lines.resize(rows, None);
    }
}

/// Iterator of parser events over a line iterator, see
/// [`DiffParser::events`].
pub struct Events<I> {
    parser: DiffParser,
    lines: I,
    pending: VecDeque<DiffEvent>,
    /// Reported once `pending` is drained.
    error: Option<Error>,
    done: bool,
}

impl<I> Iterator for Events<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<DiffEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut out = Vec::new();
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            if let Some(err) = self.error.take() {
                return Some(Err(err));
            }
            if self.done {
                return None;
            }
            match self.lines.next() {
                Some(line) => {
                    if let Err(err) = self.parser.push_line(line.as_ref(), &mut out) {
                        self.done = true;
                        self.error = Some(err);
                    }
                }
                None => {
                    self.parser.finish(&mut out);
                    self.done = true;
                }
            }
            self.pending.extend(out.drain(..));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<DiffEvent> {
        DiffParser::new()
            .events(input.lines())
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    fn hunks(events: &[DiffEvent]) -> Vec<&Hunk> {
        events
            .iter()
            .filter_map(|e| match e {
                DiffEvent::Hunk(h) => Some(h),
                _ => None,
            })
            .collect()
    }

    fn side(hunk: &Hunk, i: usize) -> Vec<Option<&str>> {
        hunk.parts[i].lines.iter().map(Option::as_deref).collect()
    }

    const SIMPLE: &str = "\
diff --git a/a.txt b/a.txt
index 1111111..2222222 100644
--- a/a.txt
+++ b/a.txt
@@ -1,3 +1,3 @@
 one
-two
+TWO
 three
";

    #[test]
    fn test_simple_hunk() {
        let events = parse(SIMPLE);
        assert_eq!(
            events[0],
            DiffEvent::FileHeader {
                old: "a.txt".into(),
                new: "a.txt".into()
            }
        );
        let hunk = hunks(&events)[0];
        assert_eq!(hunk.header, "@@ -1,3 +1,3 @@");
        assert_eq!(side(hunk, 0), vec![Some(" one"), Some("-two"), Some(" three")]);
        assert_eq!(side(hunk, 1), vec![Some(" one"), Some("+TWO"), Some(" three")]);
        assert_eq!(hunk.parts[0].start_line, 1);
        assert_eq!(hunk.parts[1].label, "a.txt");
    }

    #[test]
    fn test_insertion_only_pads_left() {
        let events = parse("@@ -1,2 +1,3 @@\n a\n+b\n c\n");
        let hunk = hunks(&events)[0];
        assert_eq!(side(hunk, 0), vec![Some(" a"), None, Some(" c")]);
        assert_eq!(side(hunk, 1), vec![Some(" a"), Some("+b"), Some(" c")]);
    }

    #[test]
    fn test_uneven_change_run_is_padded_before_context() {
        let events = parse("@@ -1,4 +1,2 @@\n-a\n-b\n-c\n+x\n d\n");
        let hunk = hunks(&events)[0];
        assert_eq!(side(hunk, 0), vec![Some("-a"), Some("-b"), Some("-c"), Some(" d")]);
        assert_eq!(side(hunk, 1), vec![Some("+x"), None, None, Some(" d")]);
    }

    #[test]
    fn test_trailing_change_run_is_padded_on_flush() {
        let events = parse("@@ -1 +1,3 @@\n-a\n+x\n+y\n+z\n");
        let hunk = hunks(&events)[0];
        assert_eq!(side(hunk, 0), vec![Some("-a"), None, None]);
        assert_eq!(hunk.row_count(), 3);
    }

    #[test]
    fn test_no_newline_marker_follows_its_side() {
        let events = parse("@@ -1 +1 @@\n-a\n\\ No newline at end of file\n+a\n");
        let hunk = hunks(&events)[0];
        assert_eq!(
            side(hunk, 0),
            vec![Some("-a"), Some("\\ No newline at end of file")]
        );
        assert_eq!(side(hunk, 1), vec![Some("+a"), None]);
    }

    #[test]
    fn test_commit_header_and_body() {
        let events = parse(
            "commit abc123\nAuthor: A U Thor <a@example.com>\n\n    Title line\n\n    Body text\n",
        );
        assert_eq!(
            events[0],
            DiffEvent::CommitHeader {
                label: "commit".into(),
                rest: " abc123".into()
            }
        );
        assert_eq!(
            events[1],
            DiffEvent::CommitHeader {
                label: "Author:".into(),
                rest: " A U Thor <a@example.com>".into()
            }
        );
        assert_eq!(
            events[3],
            DiffEvent::CommitBody {
                text: "    Title line".into(),
                is_title: true
            }
        );
        assert_eq!(
            events[5],
            DiffEvent::CommitBody {
                text: "    Body text".into(),
                is_title: false
            }
        );
    }

    #[test]
    fn test_commit_body_ends_on_unindented_line() {
        let events = parse("commit abc\n\n    msg\n src/a.rs | 2 +-\n");
        assert_eq!(
            events.last(),
            Some(&DiffEvent::Passthrough(" src/a.rs | 2 +-".into()))
        );
    }

    #[test]
    fn test_separator_between_commits() {
        let input = format!("commit 1\n\n    one\n\n{SIMPLE}commit 2\n");
        let events = parse(&input);
        let separator = events
            .iter()
            .position(|e| *e == DiffEvent::Separator)
            .unwrap();
        assert!(matches!(events[separator - 1], DiffEvent::Hunk(_)));
        assert!(matches!(
            &events[separator + 1],
            DiffEvent::CommitHeader { label, .. } if label == "commit"
        ));
    }

    #[test]
    fn test_unknown_lines_pass_through() {
        let events = parse("hello\nworld\n");
        assert_eq!(
            events,
            vec![
                DiffEvent::Passthrough("hello".into()),
                DiffEvent::Passthrough("world".into())
            ]
        );
    }

    #[test]
    fn test_binary_diff_emits_only_file_header() {
        let events = parse(
            "diff --git a/img.png b/img.png\nindex 1..2 100644\nBinary files a/img.png and b/img.png differ\n",
        );
        assert_eq!(
            events,
            vec![DiffEvent::FileHeader {
                old: "img.png".into(),
                new: "img.png".into()
            }]
        );
    }

    #[test]
    fn test_two_hunks_in_one_file() {
        let events = parse("diff --git a/f b/f\n--- a/f\n+++ b/f\n@@ -1 +1 @@\n-a\n+b\n@@ -10 +10 @@\n x\n");
        let found = hunks(&events);
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].parts[0].start_line, 10);
        assert_eq!(side(found[1], 1), vec![Some(" x")]);
    }

    #[test]
    fn test_combined_diff() {
        let events = parse(
            "diff --cc m.rs\n--- a/m.rs\n+++ b/m.rs\n@@@ -1,2 -1,2 +1,3 @@@\n  same\n- from1\n -from2\n++both\n",
        );
        let hunk = hunks(&events)[0];
        assert_eq!(hunk.parts.len(), 3);
        assert_eq!(side(hunk, 0), vec![Some(" same"), Some("-from1")]);
        assert_eq!(side(hunk, 1), vec![Some(" same"), Some("-from2")]);
        assert_eq!(side(hunk, 2), vec![Some(" same"), Some("+both")]);
        assert_eq!(hunk.parts[2].label, "m.rs");
    }

    #[test]
    fn test_malformed_header_is_fatal() {
        let results: Vec<_> = DiffParser::new()
            .events(["@@ nonsense @@", " context"])
            .collect();
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(Error::MalformedHunkHeader { .. })));
    }

    #[test]
    fn test_hunk_before_malformed_header_is_kept() {
        let results: Vec<_> = DiffParser::new()
            .events(["@@ -1 +1 @@", "-a", "+b", "@@ bad @@", " x"])
            .collect();
        assert_eq!(results.len(), 2);
        match &results[0] {
            Ok(DiffEvent::Hunk(hunk)) => {
                assert_eq!(hunk.header, "@@ -1 +1 @@");
                assert_eq!(side(hunk, 1), vec![Some("+b")]);
            }
            other => panic!("expected the finished hunk, got {other:?}"),
        }
        assert!(matches!(results[1], Err(Error::MalformedHunkHeader { .. })));
    }

    #[test]
    fn test_parts_reset_after_flush() {
        let mut parser = DiffParser::new();
        let mut out = Vec::new();
        parser.push_line("@@ -3 +3 @@", &mut out).unwrap();
        parser.push_line(" x", &mut out).unwrap();
        parser.finish(&mut out);
        assert!(parser.parts.iter().all(|p| p.start_line == -1 && p.lines.is_empty()));
        assert_eq!(parser.state(), ParserState::Unknown);
    }
}
