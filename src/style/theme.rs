//! Built-in color themes.
//!
//! A theme maps every [`ThemeRole`] to a [`Style`]. The role set is closed:
//! the renderer only ever asks for these.

use super::color::{Modifiers, Rgb, Style};
use crate::error::{Error, Result};

/// Named style slots used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeRole {
    /// Applied under everything else.
    Default,
    /// The leading token of a commit header line (`commit`, `Author:` ...).
    CommitHeaderLabel,
    /// Commit hash.
    CommitSha,
    /// Author line.
    CommitAuthor,
    /// Date line.
    CommitDate,
    /// First line of a commit message.
    CommitTitle,
    /// Every commit message line.
    CommitMessage,
    /// Separator rules.
    Border,
    /// File name line.
    FileName,
    /// `@@` hunk header line.
    HunkHeader,
    /// Changed words inside a deleted line.
    DeletedWord,
    /// Deleted line.
    DeletedLine,
    /// Line number column of a deleted line.
    DeletedLineNo,
    /// Changed words inside an inserted line.
    InsertedWord,
    /// Inserted line.
    InsertedLine,
    /// Line number column of an inserted line.
    InsertedLineNo,
    /// Context line.
    UnmodifiedLine,
    /// Line number column of a context line.
    UnmodifiedLineNo,
    /// Filler where a side has no line.
    MissingLine,
}

impl ThemeRole {
    /// Every role, in declaration order.
    pub const ALL: [Self; 19] = [
        Self::Default,
        Self::CommitHeaderLabel,
        Self::CommitSha,
        Self::CommitAuthor,
        Self::CommitDate,
        Self::CommitTitle,
        Self::CommitMessage,
        Self::Border,
        Self::FileName,
        Self::HunkHeader,
        Self::DeletedWord,
        Self::DeletedLine,
        Self::DeletedLineNo,
        Self::InsertedWord,
        Self::InsertedLine,
        Self::InsertedLineNo,
        Self::UnmodifiedLine,
        Self::UnmodifiedLineNo,
        Self::MissingLine,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// A complete role-to-style mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    name: &'static str,
    styles: [Style; ThemeRole::ALL.len()],
    syntax_theme: Option<&'static str>,
}

impl Theme {
    /// Names accepted by [`Theme::by_name`].
    pub const NAMES: [&'static str; 5] = [
        "dark",
        "light",
        "github-dark-dimmed",
        "github-light",
        "identity",
    ];

    /// Look up a built-in theme.
    pub fn by_name(name: &str) -> Result<Self> {
        match name {
            "dark" | "default" => Ok(Self::dark()),
            "light" => Ok(Self::light()),
            "github-dark-dimmed" => Ok(Self::github_dark_dimmed()),
            "github-light" => Ok(Self::github_light()),
            "identity" => Ok(Self::identity()),
            other => Err(Error::UnknownTheme(other.to_string())),
        }
    }

    /// A theme where every role is plain; output carries no styling.
    pub const fn identity() -> Self {
        Self {
            name: "identity",
            styles: [Style::PLAIN; ThemeRole::ALL.len()],
            syntax_theme: None,
        }
    }

    /// Default theme for dark terminals, using only foreground colors.
    pub fn dark() -> Self {
        let red = Rgb::from_u32(0xf1_4c_4c);
        let green = Rgb::from_u32(0x23_d1_8b);
        Self::identity()
            .named("dark")
            .with(ThemeRole::Border, dim())
            .with(ThemeRole::CommitHeaderLabel, dim())
            .with(ThemeRole::CommitSha, Style::fg(green))
            .with(ThemeRole::CommitAuthor, Style::fg(Rgb::from_u32(0x3b_8e_ea)))
            .with(ThemeRole::CommitTitle, bold())
            .with(ThemeRole::FileName, Style::fg(Rgb::from_u32(0xf5_f5_43)))
            .with(ThemeRole::HunkHeader, dim())
            .with(ThemeRole::DeletedLine, Style::fg(red))
            .with(ThemeRole::InsertedLine, Style::fg(green))
            .with(ThemeRole::DeletedWord, Style::fg(red).with_modifiers(Modifiers::REVERSED))
            .with(ThemeRole::InsertedWord, Style::fg(green).with_modifiers(Modifiers::REVERSED))
            .with(ThemeRole::DeletedLineNo, Style::fg(red).with_modifiers(Modifiers::DIM))
            .with(ThemeRole::InsertedLineNo, Style::fg(green).with_modifiers(Modifiers::DIM))
            .with(ThemeRole::UnmodifiedLineNo, dim())
    }

    /// Default theme for light terminals.
    pub fn light() -> Self {
        let red = Rgb::from_u32(0xcd_31_31);
        let green = Rgb::from_u32(0x00_bc_00);
        Self::dark()
            .named("light")
            .with(ThemeRole::CommitSha, Style::fg(green))
            .with(ThemeRole::CommitAuthor, Style::fg(Rgb::from_u32(0x04_51_a5)))
            .with(ThemeRole::FileName, Style::fg(Rgb::from_u32(0x94_98_00)))
            .with(ThemeRole::DeletedLine, Style::fg(red))
            .with(ThemeRole::InsertedLine, Style::fg(green))
            .with(ThemeRole::DeletedWord, Style::fg(red).with_modifiers(Modifiers::REVERSED))
            .with(ThemeRole::InsertedWord, Style::fg(green).with_modifiers(Modifiers::REVERSED))
            .with(ThemeRole::DeletedLineNo, Style::fg(red).with_modifiers(Modifiers::DIM))
            .with(ThemeRole::InsertedLineNo, Style::fg(green).with_modifiers(Modifiers::DIM))
    }

    /// GitHub's "dark dimmed" palette, with backgrounds.
    pub fn github_dark_dimmed() -> Self {
        let deleted = Style::fg(Rgb::from_u32(0xe5_53_4b)).with_bg(Rgb::from_u32(0x44_2d_30));
        let inserted = Style::fg(Rgb::from_u32(0x57_ab_5a)).with_bg(Rgb::from_u32(0x25_32_30));
        let unmodified = Style::PLAIN.with_bg(Rgb::from_u32(0x22_28_2d));
        Self::identity()
            .named("github-dark-dimmed")
            .with_syntax_theme("base16-ocean.dark")
            .with(
                ThemeRole::Default,
                Style::fg(Rgb::from_u32(0xad_ba_c7)).with_bg(Rgb::from_u32(0x22_27_2e)),
            )
            .with(ThemeRole::Border, Style::fg(Rgb::from_u32(0x44_4c_56)))
            .with(ThemeRole::CommitHeaderLabel, Style::fg(Rgb::from_u32(0x76_83_90)))
            .with(ThemeRole::CommitSha, Style::fg(Rgb::from_u32(0xc6_e6_ff)))
            .with(ThemeRole::CommitAuthor, bold())
            .with(ThemeRole::CommitTitle, bold())
            .with(ThemeRole::FileName, bold())
            .with(
                ThemeRole::HunkHeader,
                Style::fg(Rgb::from_u32(0x76_83_90)).with_bg(Rgb::from_u32(0x26_34_41)),
            )
            .with(ThemeRole::DeletedLine, deleted)
            .with(ThemeRole::DeletedLineNo, deleted)
            .with(ThemeRole::DeletedWord, Style::PLAIN.with_bg(Rgb::from_u32(0x79_2e_2e)))
            .with(ThemeRole::InsertedLine, inserted)
            .with(ThemeRole::InsertedLineNo, inserted)
            .with(ThemeRole::InsertedWord, Style::PLAIN.with_bg(Rgb::from_u32(0x2b_5a_33)))
            .with(ThemeRole::UnmodifiedLine, unmodified)
            .with(ThemeRole::UnmodifiedLineNo, unmodified)
            .with(ThemeRole::MissingLine, Style::PLAIN.with_bg(Rgb::from_u32(0x2d_33_3b)))
    }

    /// GitHub's light palette, with backgrounds.
    pub fn github_light() -> Self {
        let deleted = Style::fg(Rgb::from_u32(0xcf_22_2e)).with_bg(Rgb::from_u32(0xff_eb_e9));
        let inserted = Style::fg(Rgb::from_u32(0x11_63_29)).with_bg(Rgb::from_u32(0xda_fb_e1));
        Self::identity()
            .named("github-light")
            .with_syntax_theme("InspiredGitHub")
            .with(
                ThemeRole::Default,
                Style::fg(Rgb::from_u32(0x24_29_2f)).with_bg(Rgb::from_u32(0xff_ff_ff)),
            )
            .with(ThemeRole::Border, Style::fg(Rgb::from_u32(0xd0_d7_de)))
            .with(ThemeRole::CommitHeaderLabel, Style::fg(Rgb::from_u32(0x57_60_6a)))
            .with(ThemeRole::CommitSha, Style::fg(Rgb::from_u32(0x09_69_da)))
            .with(ThemeRole::CommitAuthor, bold())
            .with(ThemeRole::CommitTitle, bold())
            .with(ThemeRole::FileName, bold())
            .with(
                ThemeRole::HunkHeader,
                Style::fg(Rgb::from_u32(0x57_60_6a)).with_bg(Rgb::from_u32(0xdd_f4_ff)),
            )
            .with(ThemeRole::DeletedLine, deleted)
            .with(ThemeRole::DeletedLineNo, deleted)
            .with(ThemeRole::DeletedWord, Style::PLAIN.with_bg(Rgb::from_u32(0xff_c1_c0)))
            .with(ThemeRole::InsertedLine, inserted)
            .with(ThemeRole::InsertedLineNo, inserted)
            .with(ThemeRole::InsertedWord, Style::PLAIN.with_bg(Rgb::from_u32(0xab_f2_bc)))
            .with(ThemeRole::MissingLine, Style::PLAIN.with_bg(Rgb::from_u32(0xf6_f8_fa)))
    }

    /// The theme's name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Style for `role`.
    #[inline]
    pub const fn style(&self, role: ThemeRole) -> Style {
        self.styles[role.index()]
    }

    /// Syntax highlighting theme suggested by this theme, if any.
    #[inline]
    pub const fn syntax_theme(&self) -> Option<&'static str> {
        self.syntax_theme
    }

    /// Replace the style of one role (builder pattern).
    #[must_use]
    pub const fn with(mut self, role: ThemeRole, style: Style) -> Self {
        self.styles[role.index()] = style;
        self
    }

    #[must_use]
    const fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    #[must_use]
    const fn with_syntax_theme(mut self, syntax_theme: &'static str) -> Self {
        self.syntax_theme = Some(syntax_theme);
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

const fn dim() -> Style {
    Style::PLAIN.with_modifiers(Modifiers::DIM)
}

const fn bold() -> Style {
    Style::PLAIN.with_modifiers(Modifiers::BOLD)
}
