//! Input side of the pipeline: reassembling lines from a byte stream and
//! normalizing them before parsing.

use std::borrow::Cow;
use std::io::BufRead;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::Result;

/// Lines of a byte stream.
///
/// `\n` and `\r\n` both end a line. Invalid UTF-8 is replaced rather than
/// rejected, since diffs of binary-ish files are common. A final newline
/// does not produce a trailing empty line.
pub struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    /// Read lines from `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(256),
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(err) => Some(Err(err.into())),
        }
    }
}

fn ansi_escape() -> &'static Regex {
    static ANSI: OnceLock<Regex> = OnceLock::new();
    ANSI.get_or_init(|| {
        // CSI sequences, OSC sequences ended by BEL or ST, and two-byte escapes.
        Regex::new(r"\x1b(?:\[[0-?]*[ -/]*[@-~]|\][^\x07\x1b]*(?:\x07|\x1b\\)|[@-Z\\-_])")
            .unwrap_or_else(|err| unreachable!("static pattern: {err}"))
    })
}

/// Strip terminal escape sequences (input produced with `--color`) and
/// expand tabs to `tab_width` spaces.
pub fn normalize_line(line: &str, tab_width: usize) -> Cow<'_, str> {
    let stripped = ansi_escape().replace_all(line, "");
    if stripped.contains('\t') {
        Cow::Owned(stripped.replace('\t', &" ".repeat(tab_width)))
    } else {
        stripped
    }
}
