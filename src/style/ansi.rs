//! ANSI emission for styled rows.
//!
//! Each row is written independently and always ends with the attributes
//! reset, so rows can be interleaved with unstyled output or cut by a pager
//! without leaking color.

use std::io::Write;

use super::color::{Modifiers, Rgb, Style};
use crate::text::SpannedString;

/// A row of text with styles attached.
pub type StyledString = SpannedString<Style>;

/// Append `row` to `output` as text with SGR sequences.
///
/// With `color` disabled only the text is written.
pub fn write_styled(output: &mut Vec<u8>, row: &StyledString, color: bool) {
    if !color {
        output.extend_from_slice(row.as_str().as_bytes());
        return;
    }

    let mut last = Style::PLAIN;
    for (text, styles) in row.iter_substrings() {
        let style = Style::reduce(styles);
        if style != last {
            if !last.is_plain() {
                output.extend_from_slice(b"\x1b[0m");
            }
            emit_style(output, style);
            last = style;
        }
        output.extend_from_slice(text.as_bytes());
    }
    if !last.is_plain() {
        output.extend_from_slice(b"\x1b[0m");
    }
}

/// Render `row` to a `String`, mostly useful in tests and logs.
pub fn to_ansi_string(row: &StyledString, color: bool) -> String {
    let mut output = Vec::with_capacity(row.as_str().len());
    write_styled(&mut output, row, color);
    String::from_utf8_lossy(&output).into_owned()
}

fn emit_style(output: &mut Vec<u8>, style: Style) {
    if let Some(fg) = style.fg {
        emit_fg_color(output, fg);
    }
    if let Some(bg) = style.bg {
        emit_bg_color(output, bg);
    }
    emit_modifier_set(output, style.modifiers);
}

/// Emit a foreground color sequence (true color).
#[inline]
fn emit_fg_color(output: &mut Vec<u8>, color: Rgb) {
    let _ = write!(output, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
}

/// Emit a background color sequence (true color).
#[inline]
fn emit_bg_color(output: &mut Vec<u8>, color: Rgb) {
    let _ = write!(output, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b);
}

/// Emit SGR sequences for a set of modifiers.
fn emit_modifier_set(output: &mut Vec<u8>, modifiers: Modifiers) {
    if modifiers.contains(Modifiers::BOLD) {
        output.extend_from_slice(b"\x1b[1m");
    }
    if modifiers.contains(Modifiers::DIM) {
        output.extend_from_slice(b"\x1b[2m");
    }
    if modifiers.contains(Modifiers::ITALIC) {
        output.extend_from_slice(b"\x1b[3m");
    }
    if modifiers.contains(Modifiers::UNDERLINE) {
        output.extend_from_slice(b"\x1b[4m");
    }
    if modifiers.contains(Modifiers::REVERSED) {
        output.extend_from_slice(b"\x1b[7m");
    }
    if modifiers.contains(Modifiers::STRIKETHROUGH) {
        output.extend_from_slice(b"\x1b[9m");
    }
}
