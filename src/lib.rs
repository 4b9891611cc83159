//! # split-diffs
//!
//! Side-by-side rendering of `git diff` and `git log -p` output in the
//! terminal.
//!
//! split-diffs is a stream transducer: it reads a diff transcript line by
//! line and writes styled rows, holding no more than the hunk being read.
//!
//! ## Core Concepts
//!
//! - **Spanned strings**: text with overlapping attribute ranges that
//!   survive slicing and concatenation ([`SpannedString`])
//! - **Width-aware wrapping**: greedy word wrap by terminal columns,
//!   double-width characters included ([`text::wrap`])
//! - **Streaming parser**: a state machine turning the transcript into
//!   commits, file headers and index-aligned hunks ([`DiffParser`])
//! - **Aligner**: hunks laid out side by side or unified, with line numbers,
//!   word emphasis and syntax colors ([`RenderContext`])
//!
//! ## Example
//!
//! ```rust,ignore
//! use split_diffs::{Config, Pipeline, RenderContext, Theme};
//!
//! let ctx = RenderContext::new(Config::default(), Theme::dark(), 160);
//! for row in Pipeline::from_reader(ctx, std::io::stdin().lock()) {
//!     println!("{}", split_diffs::style::to_ansi_string(&row?, true));
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod diff;
pub mod error;
pub mod highlight;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod style;
pub mod terminal;
pub mod text;

// Re-exports for convenience
pub use config::Config;
pub use diff::{DiffEvent, DiffParser, Hunk, HunkPart, ParserState};
pub use error::{Error, Result};
pub use highlight::{SimilarWordDiff, SyntaxHighlighter, SyntectHighlighter, WordDiff};
pub use pipeline::Pipeline;
pub use render::{Layout, RenderContext};
pub use style::{Style, StyledString, Theme, ThemeRole};
pub use terminal::{OutputBuffer, TerminalWidth, WidthProvider};
pub use text::SpannedString;
