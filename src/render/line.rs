//! Formatting of a single hunk line into one or more column rows.
//!
//! ```text
//!   ┌ line number (right-aligned, blank on continuation rows)
//!   │     ┌ change marker (blank on continuation rows)
//!   │     │ ┌ text, wrapped or truncated and padded to the column
//! "   12 - let x = 1;            "
//! ```

use std::ops::Range;

use super::RenderContext;
use crate::diff::LineKind;
use crate::error::Result;
use crate::style::{Style, StyledString, ThemeRole};
use crate::text::fit_to_width;

/// Columns used by the separators around the marker: `" " marker " "`.
const MARKER_COLUMNS: usize = 3;

/// Theme roles for the three parts of a line of some kind.
#[derive(Debug, Clone, Copy)]
pub(super) struct LineRoles {
    pub line: ThemeRole,
    pub number: ThemeRole,
    pub word: ThemeRole,
}

impl LineRoles {
    pub(super) const fn for_kind(kind: LineKind) -> Self {
        match kind {
            LineKind::Deleted => Self {
                line: ThemeRole::DeletedLine,
                number: ThemeRole::DeletedLineNo,
                word: ThemeRole::DeletedWord,
            },
            LineKind::Inserted => Self {
                line: ThemeRole::InsertedLine,
                number: ThemeRole::InsertedLineNo,
                word: ThemeRole::InsertedWord,
            },
            LineKind::Context | LineKind::NoNewline => Self {
                line: ThemeRole::UnmodifiedLine,
                number: ThemeRole::UnmodifiedLineNo,
                word: ThemeRole::UnmodifiedLine,
            },
        }
    }
}

/// One buffered line ready to be formatted.
pub(super) struct HunkLine<'a> {
    pub kind: LineKind,
    pub text: &'a str,
    /// `None` hides the number (wrapped rows, no-newline markers).
    pub number: Option<i64>,
    /// File name used to pick a syntax.
    pub file_name: &'a str,
    /// Changed-word ranges to emphasize.
    pub changed: Option<&'a [Range<usize>]>,
}

/// Format `line` into rows exactly `width` columns wide (unless `width` is
/// too small to hold the number and marker columns).
pub(super) fn format_line(
    ctx: &RenderContext,
    line: &HunkLine<'_>,
    width: usize,
) -> Result<Vec<StyledString>> {
    let roles = LineRoles::for_kind(line.kind);
    let number_width = ctx.config().line_number_width;
    let text_width = width.saturating_sub(number_width + MARKER_COLUMNS).max(1);

    let mut text = StyledString::from(line.text);
    let len = text.len();
    if let Some(changed) = line.changed {
        let word = ctx.style(roles.word);
        for range in changed {
            text.add_span(range.start.min(len), range.end.min(len), word);
        }
    }
    if let Some(highlighter) = &ctx.highlighter {
        match highlighter.highlight(line.text, line.file_name) {
            Ok(tokens) => {
                for token in tokens {
                    let start = token.offset.min(len);
                    let end = (token.offset + token.length).min(len);
                    text.add_span(start, end, Style::fg(token.color));
                }
            }
            Err(err) if err.is_recoverable() => log::warn!("{err}; line left uncolored"),
            Err(err) => return Err(err),
        }
    }

    let line_style = ctx.style(roles.line);
    let number_style = ctx.style(roles.number);
    let default_style = ctx.style(ThemeRole::Default);
    let blank_number = " ".repeat(number_width);

    let pieces = fit_to_width(&text, text_width, ctx.config().wrap_lines);
    let mut rows = Vec::with_capacity(pieces.len());
    for (i, piece) in pieces.iter().enumerate() {
        let first = i == 0;
        let number = match line.number {
            Some(n) if first && n > 0 => gutter(n, number_width),
            _ => blank_number.clone(),
        };
        let marker = if first { line.kind.marker() } else { ' ' };

        let mut row = StyledString::new();
        row.append_str(&number, [number_style]);
        let body_start = row.len();
        row.append_plain(&format!(" {marker} ")).append_spanned(piece);
        let end = row.len();
        row.add_span(body_start, end, line_style)
            .add_span(0, end, default_style);
        rows.push(row);
    }
    Ok(rows)
}

/// `n` right-aligned in `width` columns. Numbers too long for the gutter
/// keep their lowest digits.
fn gutter(n: i64, width: usize) -> String {
    let digits = n.to_string();
    let skip = digits.len().saturating_sub(width);
    format!("{:>width$}", &digits[skip..])
}

/// A blank row in `role`, e.g. for a side that has no line.
pub(super) fn blank_row(ctx: &RenderContext, width: usize, role: ThemeRole) -> StyledString {
    let mut row = StyledString::new();
    row.append_str(
        &" ".repeat(width),
        [ctx.style(role), ctx.style(ThemeRole::Default)],
    );
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::Error;
    use crate::highlight::{SyntaxHighlighter, SyntaxToken};
    use crate::style::{Modifiers, Rgb, Theme};

    fn ctx() -> RenderContext {
        RenderContext::new(Config::default(), Theme::identity(), 80)
    }

    fn line<'a>(kind: LineKind, text: &'a str, number: Option<i64>) -> HunkLine<'a> {
        HunkLine {
            kind,
            text,
            number,
            file_name: "f.txt",
            changed: None,
        }
    }

    #[test]
    fn test_columns() {
        let rows = format_line(&ctx(), &line(LineKind::Deleted, "gone", Some(12)), 20).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].as_str(), "   12 - gone        ");
        assert_eq!(rows[0].width(), 20);
    }

    #[test]
    fn test_continuation_rows_hide_number_and_marker() {
        let rows =
            format_line(&ctx(), &line(LineKind::Inserted, "aaaa bbbb cccc", Some(3)), 13).unwrap();
        let texts: Vec<&str> = rows.iter().map(StyledString::as_str).collect();
        assert_eq!(texts, vec!["    3 + aaaa ", "        bbbb ", "        cccc "]);
    }

    #[test]
    fn test_hidden_number() {
        let rows = format_line(
            &ctx(),
            &line(LineKind::NoNewline, " No newline at end of file", None),
            40,
        )
        .unwrap();
        assert!(rows[0].as_str().starts_with("      \\  No newline"));
    }

    #[test]
    fn test_truncates_when_not_wrapping() {
        let config = Config {
            wrap_lines: false,
            ..Config::default()
        };
        let ctx = RenderContext::new(config, Theme::identity(), 80);
        let rows = format_line(&ctx, &line(LineKind::Context, "abcdefghij", Some(1)), 12).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].as_str(), "    1   abcd");
    }

    struct Fixed;

    impl SyntaxHighlighter for Fixed {
        fn highlight(&self, _text: &str, _file_name: &str) -> Result<Vec<SyntaxToken>> {
            Ok(vec![SyntaxToken {
                offset: 0,
                length: 3,
                color: Rgb::new(0, 0, 255),
            }])
        }
    }

    #[test]
    fn test_word_emphasis_beats_syntax_color() {
        let word = Style::fg(Rgb::new(255, 0, 0)).with_modifiers(Modifiers::BOLD);
        let theme = Theme::identity().with(ThemeRole::DeletedWord, word);
        let ctx = RenderContext::new(Config::default(), theme, 80).with_highlighter(Fixed);
        let changed = [0..1];
        let hunk_line = HunkLine {
            changed: Some(&changed),
            ..line(LineKind::Deleted, "abc", Some(1))
        };
        let rows = format_line(&ctx, &hunk_line, 20).unwrap();

        let reduced: Vec<(&str, Style)> = rows[0]
            .iter_substrings()
            .map(|(text, styles)| (text, Style::reduce(styles)))
            .collect();
        let a = reduced.iter().find(|(text, _)| *text == "a").unwrap();
        assert_eq!(a.1.fg, Some(Rgb::new(255, 0, 0)));
        let bc = reduced.iter().find(|(text, _)| *text == "bc").unwrap();
        assert_eq!(bc.1.fg, Some(Rgb::new(0, 0, 255)));
    }

    #[test]
    fn test_long_number_keeps_column_width() {
        let config = Config {
            line_number_width: 2,
            ..Config::default()
        };
        let ctx = RenderContext::new(config, Theme::identity(), 80);
        let rows = format_line(&ctx, &line(LineKind::Context, "x", Some(12345)), 20).unwrap();
        assert_eq!(rows[0].as_str(), "45   x              ");
        assert_eq!(rows[0].width(), 20);
        assert_eq!(gutter(7, 3), "  7");
    }

    struct FailsOn(&'static str, fn() -> Error);

    impl SyntaxHighlighter for FailsOn {
        fn highlight(&self, text: &str, _file_name: &str) -> Result<Vec<SyntaxToken>> {
            if text == self.0 {
                Err((self.1)())
            } else {
                Ok(Vec::new())
            }
        }
    }

    #[test]
    fn test_highlight_failure_leaves_line_uncolored() {
        let failing = FailsOn("gone", || Error::Format("no grammar".to_string()));
        let ctx = ctx().with_highlighter(failing);
        let rows = format_line(&ctx, &line(LineKind::Deleted, "gone", Some(12)), 20).unwrap();
        assert_eq!(rows[0].as_str(), "   12 - gone        ");
    }

    #[test]
    fn test_fatal_highlight_error_is_returned() {
        let failing = FailsOn("gone", || Error::UnknownTheme("nope".to_string()));
        let ctx = ctx().with_highlighter(failing);
        let err = format_line(&ctx, &line(LineKind::Deleted, "gone", Some(1)), 20).unwrap_err();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_blank_row() {
        let row = blank_row(&ctx(), 7, ThemeRole::MissingLine);
        assert_eq!(row.as_str(), "       ");
    }
}
