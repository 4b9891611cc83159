//! Diff transcript parsing.
//!
//! - [`parser`]: the line-driven state machine producing [`DiffEvent`]s
//! - [`hunk`]: per-side hunk buffers and `@@` header parsing
//! - [`file_header`]: file names from `diff`/`---`/`+++`/`rename` lines

pub mod file_header;
pub mod hunk;
pub mod parser;

pub use file_header::FileLabels;
pub use hunk::{parse_hunk_header, Hunk, HunkPart, HunkRange, LineKind};
pub use parser::{DiffEvent, DiffParser, Events, ParserState, COMMIT_BODY_INDENT};
