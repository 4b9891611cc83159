//! Word wrapping by display width.
//!
//! The wrapper works on runs: every whitespace char is a run of its own and
//! every maximal stretch of non-whitespace is one run. Runs are placed
//! greedily against a column budget:
//!
//! 1. A run that fits in what is left of the line is placed.
//! 2. A run that would fit on an empty line starts a new line.
//! 3. A run wider than a whole line is broken between chars, filling each
//!    line as far as possible. Wide chars are never split; one that does not
//!    fit moves to the next line.
//!
//! Lines are never empty and their concatenation is the input.

use super::spanned::SpannedString;
use super::width::char_width;

/// Char offsets where a wrapped line ends, for `text` wrapped at `width`.
///
/// The last entry is always the text length (unless the text is empty). A
/// `width` of zero is treated as one. A char wider than the line is put on
/// a line of its own.
pub fn line_breaks(text: &str, width: usize) -> Vec<usize> {
    let width = width.max(1);
    let chars: Vec<(usize, bool)> = text
        .chars()
        .map(|c| (char_width(c), c.is_whitespace()))
        .collect();

    let mut lines = LineBuilder::new(width);
    let mut i = 0;
    while i < chars.len() {
        let end = if chars[i].1 {
            i + 1
        } else {
            chars[i..]
                .iter()
                .position(|&(_, space)| space)
                .map_or(chars.len(), |n| i + n)
        };
        lines.place_run(&chars[i..end], i);
        i = end;
    }
    lines.finish()
}

struct LineBuilder {
    width: usize,
    budget: usize,
    /// Char offset the current line extends to.
    line_end: usize,
    breaks: Vec<usize>,
}

impl LineBuilder {
    const fn new(width: usize) -> Self {
        Self {
            width,
            budget: width,
            line_end: 0,
            breaks: Vec::new(),
        }
    }

    fn flush(&mut self) {
        if self.breaks.last().copied().unwrap_or(0) < self.line_end {
            self.breaks.push(self.line_end);
        }
        self.budget = self.width;
    }

    fn place_run(&mut self, run: &[(usize, bool)], offset: usize) {
        let run_width: usize = run.iter().map(|&(w, _)| w).sum();
        let end = offset + run.len();

        if run_width <= self.budget {
            self.budget -= run_width;
            self.line_end = end;
            return;
        }
        if run_width <= self.width {
            self.flush();
            self.budget -= run_width;
            self.line_end = end;
            return;
        }

        let mut i = 0;
        while i < run.len() {
            let before = i;
            while i < run.len() && run[i].0 <= self.budget {
                self.budget -= run[i].0;
                i += 1;
            }
            if i == before && self.budget == self.width {
                // Wider than an empty line: it goes alone.
                i += 1;
            }
            self.line_end = offset + i;
            self.flush();
        }
    }

    fn finish(mut self) -> Vec<usize> {
        self.flush();
        self.breaks
    }
}

/// Wrap `s` into lines no wider than `width` columns.
///
/// A string that already fits is returned as the single line.
pub fn wrap<T: Clone>(s: &SpannedString<T>, width: usize) -> Vec<SpannedString<T>> {
    if s.width() <= width {
        return vec![s.clone()];
    }
    let mut start = 0;
    line_breaks(s.as_str(), width)
        .into_iter()
        .map(|end| {
            let line = s.slice(start..end);
            start = end;
            line
        })
        .collect()
}

/// Fit `s` to exactly `width` columns.
///
/// With `wrap_lines` the text is wrapped, otherwise it is cut to one line.
/// Every line is padded with spaces to `width`.
pub fn fit_to_width<T: Clone>(
    s: &SpannedString<T>,
    width: usize,
    wrap_lines: bool,
) -> Vec<SpannedString<T>> {
    let mut lines = if wrap_lines {
        wrap(s, width)
    } else {
        vec![s.truncate_to_width(width)]
    };
    for line in &mut lines {
        line.fill_width(width, ' ');
    }
    lines
}
