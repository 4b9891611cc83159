//! Syntax highlighting backed by `syntect`.

use std::ffi::OsStr;
use std::path::Path;
use std::sync::OnceLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

use super::{SyntaxHighlighter, SyntaxToken};
use crate::error::{Error, Result};
use crate::style::Rgb;

/// Grammars are loaded on the first highlighted line, not at startup.
fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        log::debug!("loading syntax definitions");
        SyntaxSet::load_defaults_nonewlines()
    })
}

/// Highlighter using one of syntect's bundled color themes.
pub struct SyntectHighlighter {
    theme: Theme,
}

impl SyntectHighlighter {
    /// Use the bundled theme called `theme_name`, if there is one.
    pub fn new(theme_name: &str) -> Option<Self> {
        let mut themes = ThemeSet::load_defaults();
        let theme = themes.themes.remove(theme_name);
        if theme.is_none() {
            log::warn!("unknown syntax highlighting theme {theme_name:?}, highlighting disabled");
        }
        theme.map(|theme| Self { theme })
    }

    /// Names of the bundled themes.
    pub fn theme_names() -> Vec<String> {
        ThemeSet::load_defaults().themes.into_keys().collect()
    }

    fn find_syntax(file_name: &str) -> Option<&'static SyntaxReference> {
        let path = Path::new(file_name);
        let by_extension = path
            .extension()
            .and_then(OsStr::to_str)
            .and_then(|ext| syntax_set().find_syntax_by_extension(ext));
        // Extension-less names such as `Makefile` are listed as extensions.
        by_extension.or_else(|| {
            path.file_name()
                .and_then(OsStr::to_str)
                .and_then(|name| syntax_set().find_syntax_by_extension(name))
        })
    }
}

impl SyntaxHighlighter for SyntectHighlighter {
    fn highlight(&self, text: &str, file_name: &str) -> Result<Vec<SyntaxToken>> {
        let Some(syntax) = Self::find_syntax(file_name) else {
            return Ok(Vec::new());
        };

        let mut lines = HighlightLines::new(syntax, &self.theme);
        let ranges = lines
            .highlight_line(text, syntax_set())
            .map_err(|err| Error::Format(format!("highlighting {file_name}: {err}")))?;

        let mut tokens = Vec::with_capacity(ranges.len());
        let mut offset = 0;
        for (style, piece) in ranges {
            let length = piece.chars().count();
            let fg = style.foreground;
            if fg.a > 0 && length > 0 {
                tokens.push(SyntaxToken {
                    offset,
                    length,
                    color: Rgb::new(fg.r, fg.g, fg.b),
                });
            }
            offset += length;
        }
        Ok(tokens)
    }
}
