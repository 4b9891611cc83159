//! Turning parser events into styled terminal rows.
//!
//! [`RenderContext`] bundles everything formatting needs: the configuration,
//! the theme, the screen width and the highlighting collaborators. Every
//! row it produces is a [`StyledString`] that fits the screen width (hunk
//! rows fill it exactly).

mod headers;
mod hunk;
mod line;

use crate::config::Config;
use crate::diff::DiffEvent;
use crate::error::Result;
use crate::highlight::{SimilarWordDiff, SyntaxHighlighter, WordDiff};
use crate::style::{Style, StyledString, Theme, ThemeRole};

pub use hunk::Layout;

/// Shared state for rendering one output stream.
pub struct RenderContext {
    config: Config,
    theme: Theme,
    screen_width: usize,
    highlighter: Option<Box<dyn SyntaxHighlighter>>,
    word_diff: Box<dyn WordDiff>,
}

impl RenderContext {
    /// Context without syntax highlighting, diffing words with
    /// [`SimilarWordDiff`].
    pub fn new(config: Config, theme: Theme, screen_width: usize) -> Self {
        Self {
            config,
            theme,
            screen_width: screen_width.max(1),
            highlighter: None,
            word_diff: Box::new(SimilarWordDiff),
        }
    }

    /// Use `highlighter` for syntax colors (builder pattern).
    #[must_use]
    pub fn with_highlighter(mut self, highlighter: impl SyntaxHighlighter + 'static) -> Self {
        self.highlighter = Some(Box::new(highlighter));
        self
    }

    /// Replace the word differ (builder pattern).
    #[must_use]
    pub fn with_word_diff(mut self, word_diff: impl WordDiff + 'static) -> Self {
        self.word_diff = Box::new(word_diff);
        self
    }

    /// The configuration.
    #[inline]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The theme.
    #[inline]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Total output width in columns.
    #[inline]
    pub const fn screen_width(&self) -> usize {
        self.screen_width
    }

    /// Style for `role` in the current theme.
    #[inline]
    pub const fn style(&self, role: ThemeRole) -> Style {
        self.theme.style(role)
    }

    /// Layout used for a hunk with `sides` sides.
    pub const fn layout_for(&self, sides: usize) -> Layout {
        if self.screen_width >= sides.saturating_mul(self.config.min_line_width) {
            Layout::SideBySide
        } else {
            Layout::Unified
        }
    }

    /// Append the rows for one parser event to `out`.
    ///
    /// A highlighter failure that is recoverable (see
    /// [`crate::Error::is_recoverable`]) only leaves its line uncolored; any
    /// other collaborator error is returned.
    pub fn render_event(&self, event: &DiffEvent, out: &mut Vec<StyledString>) -> Result<()> {
        match event {
            DiffEvent::Passthrough(text) => headers::passthrough(self, text, out),
            DiffEvent::CommitHeader { label, rest } => {
                headers::commit_header(self, label, rest, out);
            }
            DiffEvent::CommitBody { text, is_title } => {
                headers::commit_body(self, text, *is_title, out);
            }
            DiffEvent::FileHeader { old, new } => headers::file_header(self, old, new, out),
            DiffEvent::Hunk(hunk) => hunk::render_hunk(self, hunk, out)?,
            DiffEvent::Separator => out.push(headers::separator(self)),
        }
        Ok(())
    }
}
