//! `split-diffs`: reads a diff or log transcript on stdin and writes it side
//! by side to stdout.
//!
//! Meant to be used as a git pager:
//!
//! ```text
//! git config --global core.pager "split-diffs --color | less -RFX"
//! ```

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use split_diffs::terminal::{FixedWidth, Flush};
use split_diffs::{
    logging, Config, OutputBuffer, Pipeline, RenderContext, SyntectHighlighter, TerminalWidth,
    Theme, WidthProvider,
};

/// Buffered output is written once it grows past this many bytes.
const FLUSH_THRESHOLD: usize = 8 * 1024;

/// split-diffs - side-by-side git diffs in the terminal
#[derive(Parser, Debug)]
#[command(name = "split-diffs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output width in columns (default: terminal width)
    #[arg(long, value_name = "COLUMNS")]
    width: Option<usize>,

    /// Color theme
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Narrowest column that still allows side-by-side layout
    #[arg(long, value_name = "COLUMNS")]
    min_line_width: Option<usize>,

    /// Truncate long lines instead of wrapping them
    #[arg(long)]
    no_wrap: bool,

    /// Do not emphasize changed words
    #[arg(long)]
    no_highlight_changes: bool,

    /// Syntax highlighting theme (one of syntect's bundled themes)
    #[arg(long, value_name = "NAME")]
    syntax_theme: Option<String>,

    /// When to emit colors
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,

    /// Diagnostics level on stderr (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", value_parser = parse_log_level)]
    log_level: Option<LevelFilter>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum ColorMode {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl ColorMode {
    fn enabled(self) -> bool {
        match self {
            Self::Auto => io::stdout().is_terminal(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

fn parse_log_level(value: &str) -> Result<LevelFilter, String> {
    logging::parse_level(value).ok_or_else(|| format!("unknown log level {value:?}"))
}

impl Cli {
    /// Overlay the flags that were given on `config`.
    fn apply(&self, config: &mut Config) {
        if let Some(width) = self.min_line_width {
            config.min_line_width = width;
        }
        if self.no_wrap {
            config.wrap_lines = false;
        }
        if self.no_highlight_changes {
            config.highlight_line_changes = false;
        }
        if let Some(theme) = &self.theme {
            config.theme_name.clone_from(theme);
        }
        if let Some(theme) = &self.syntax_theme {
            config.syntax_highlighting_theme = Some(theme.clone());
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level);

    let mut config = Config::from_git();
    cli.apply(&mut config);
    log::debug!("{config:?}");

    let theme = Theme::by_name(&config.theme_name)
        .with_context(|| format!("available themes: {}", Theme::NAMES.join(", ")))?;
    let width = match cli.width {
        Some(columns) => FixedWidth(columns).columns(),
        None => TerminalWidth.columns(),
    };
    let color = cli.color.enabled();
    let syntax_theme = config
        .syntax_highlighting_theme
        .clone()
        .or_else(|| theme.syntax_theme().map(str::to_string));

    let mut ctx = RenderContext::new(config, theme, width);
    if color {
        if let Some(highlighter) = syntax_theme.as_deref().and_then(SyntectHighlighter::new) {
            ctx = ctx.with_highlighter(highlighter);
        }
    }

    let mut stdout = io::stdout().lock();
    let mut out = OutputBuffer::new(color);
    for row in Pipeline::from_reader(ctx, io::stdin().lock()) {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                // Show what was rendered before the failure.
                out.flush_to(&mut stdout)?;
                return Err(err).context("could not render input");
            }
        };
        out.push_row(&row);
        if out.len() >= FLUSH_THRESHOLD && out.flush_to(&mut stdout)? == Flush::Closed {
            return Ok(());
        }
    }
    out.flush_to(&mut stdout)?;
    Ok(())
}
