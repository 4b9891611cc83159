//! Terminal-facing plumbing: screen width and buffered output.

mod output;
mod size;

pub use output::{Flush, OutputBuffer};
pub use size::{FixedWidth, TerminalWidth, WidthProvider, FALLBACK_COLUMNS};
