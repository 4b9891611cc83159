//! Colors, modifiers and the `Style` attribute carried by rendered rows.

use bitflags::bitflags;

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

bitflags! {
    /// Text style modifiers.
    ///
    /// These can be combined using bitwise OR.
    ///
    /// # Example
    /// ```
    /// use split_diffs::style::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::ITALIC;
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0010_0000;
        /// Strikethrough text
        const STRIKETHROUGH = 0b1000_0000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Presentation attribute of a run of text.
///
/// Unset colors leave the terminal default in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    /// Foreground color.
    pub fg: Option<Rgb>,
    /// Background color.
    pub bg: Option<Rgb>,
    /// Text modifiers.
    pub modifiers: Modifiers,
}

impl Style {
    /// A style that changes nothing.
    pub const PLAIN: Self = Self {
        fg: None,
        bg: None,
        modifiers: Modifiers::empty(),
    };

    /// Foreground-only style.
    #[inline]
    pub const fn fg(color: Rgb) -> Self {
        Self {
            fg: Some(color),
            bg: None,
            modifiers: Modifiers::empty(),
        }
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, color: Rgb) -> Self {
        self.bg = Some(color);
        self
    }

    /// Set the modifiers (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether applying this style changes nothing.
    #[inline]
    pub const fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.modifiers.is_empty()
    }

    /// Collapse the styles active over a run into one.
    ///
    /// Styles are given in application order. A color set by an earlier
    /// style wins over one set later, so specific formatting (word emphasis,
    /// syntax colors) is applied first and generic line colors last.
    /// Modifiers accumulate.
    pub fn reduce<'a, I>(styles: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        styles.into_iter().fold(Self::PLAIN, |acc, style| Self {
            fg: acc.fg.or(style.fg),
            bg: acc.bg.or(style.bg),
            modifiers: acc.modifiers | style.modifiers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_u32() {
        assert_eq!(Rgb::from_u32(0x22_27_2e), Rgb::new(0x22, 0x27, 0x2e));
        assert_eq!(format!("{:?}", Rgb::new(255, 0, 16)), "#ff0010");
    }

    #[test]
    fn test_reduce_earlier_wins() {
        let word = Style::PLAIN.with_bg(Rgb::new(1, 0, 0));
        let syntax = Style::fg(Rgb::new(0, 2, 0));
        let line = Style::fg(Rgb::new(9, 9, 9))
            .with_bg(Rgb::new(8, 8, 8))
            .with_modifiers(Modifiers::DIM);

        let merged = Style::reduce([&word, &syntax, &line]);
        assert_eq!(merged.fg, Some(Rgb::new(0, 2, 0)));
        assert_eq!(merged.bg, Some(Rgb::new(1, 0, 0)));
        assert_eq!(merged.modifiers, Modifiers::DIM);
    }

    #[test]
    fn test_reduce_empty_is_plain() {
        assert!(Style::reduce(std::iter::empty()).is_plain());
    }

    #[test]
    fn test_modifiers_accumulate() {
        let a = Style::PLAIN.with_modifiers(Modifiers::BOLD);
        let b = Style::PLAIN.with_modifiers(Modifiers::UNDERLINE);
        assert_eq!(
            Style::reduce([&a, &b]).modifiers,
            Modifiers::BOLD | Modifiers::UNDERLINE
        );
    }
}
