//! Attributed text: spans, display widths and word wrapping.

mod spanned;
mod width;
mod wrap;

pub use spanned::{SpanMarker, SpannedString, Substrings};
pub use width::{char_width, str_width};
pub use wrap::{fit_to_width, line_breaks, wrap};
