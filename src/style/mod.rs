//! Styling: colors, themes and ANSI output of styled rows.

mod ansi;
mod color;
mod theme;

pub use ansi::{to_ansi_string, write_styled, StyledString};
pub use color::{Modifiers, Rgb, Style};
pub use theme::{Theme, ThemeRole};
