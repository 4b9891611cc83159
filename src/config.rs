//! Runtime configuration.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. built-in defaults ([`Config::default`])
//! 2. `git config` entries under `split-diffs.` ([`Config::apply_git_config`])
//! 3. command-line flags (applied by the binary)

use std::process::Command;

use crate::error::{Error, Result};

/// Prefix of the git config keys read by [`Config::apply_git_config`].
pub const GIT_CONFIG_PREFIX: &str = "split-diffs.";

/// Rendering configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Minimum width of one side-by-side column; narrower screens get the
    /// unified layout.
    pub min_line_width: usize,
    /// Wrap long lines instead of truncating them.
    pub wrap_lines: bool,
    /// Emphasize changed words in modified lines.
    pub highlight_line_changes: bool,
    /// Largest changed/common word ratio that still gets word emphasis.
    pub highlight_change_ratio: f64,
    /// Columns reserved for line numbers.
    pub line_number_width: usize,
    /// Spaces per tab.
    pub tab_width: usize,
    /// Built-in color theme.
    pub theme_name: String,
    /// Syntax highlighting theme; `None` defers to the color theme.
    pub syntax_highlighting_theme: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_line_width: 80,
            wrap_lines: true,
            highlight_line_changes: true,
            highlight_change_ratio: 1.0,
            line_number_width: 5,
            tab_width: 4,
            theme_name: "dark".to_string(),
            syntax_highlighting_theme: None,
        }
    }
}

impl Config {
    /// Set one option by its git config name (without the prefix).
    ///
    /// Unknown keys are ignored so newer config files keep working.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = || Error::Config {
            key: format!("{GIT_CONFIG_PREFIX}{key}"),
            value: value.to_string(),
        };
        match key {
            "min-line-width" => self.min_line_width = value.trim().parse().map_err(|_| invalid())?,
            "wrap-lines" => self.wrap_lines = parse_bool(value).ok_or_else(invalid)?,
            "highlight-line-changes" => {
                self.highlight_line_changes = parse_bool(value).ok_or_else(invalid)?;
            }
            "highlight-change-ratio" => {
                let ratio: f64 = value.trim().parse().map_err(|_| invalid())?;
                if !ratio.is_finite() || ratio < 0.0 {
                    return Err(invalid());
                }
                self.highlight_change_ratio = ratio;
            }
            "theme-name" => self.theme_name = value.trim().to_string(),
            "syntax-highlighting-theme" => {
                let value = value.trim();
                self.syntax_highlighting_theme = (!value.is_empty()).then(|| value.to_string());
            }
            other => log::debug!("ignoring unknown config key {GIT_CONFIG_PREFIX}{other}"),
        }
        Ok(())
    }

    /// Apply `key=value` lines as printed by `git config --list`.
    ///
    /// Lines outside [`GIT_CONFIG_PREFIX`] are skipped. Invalid values are
    /// logged and leave the current setting in place.
    pub fn apply_git_config(&mut self, listing: &str) {
        for line in listing.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            // git prints section and variable names lowercased, but be lenient.
            let key = key.trim().to_ascii_lowercase();
            let Some(key) = key.strip_prefix(GIT_CONFIG_PREFIX) else {
                continue;
            };
            if let Err(err) = self.set(key, value) {
                log::warn!("{err}; keeping the default");
            }
        }
    }

    /// Defaults overlaid with the user's git config.
    ///
    /// A missing `git` binary or a failing `git config` only loses the
    /// overrides.
    pub fn from_git() -> Self {
        let mut config = Self::default();
        match Command::new("git").args(["config", "--list"]).output() {
            Ok(output) if output.status.success() => {
                config.apply_git_config(&String::from_utf8_lossy(&output.stdout));
            }
            Ok(output) => log::debug!("git config exited with {}", output.status),
            Err(err) => log::debug!("could not run git config: {err}"),
        }
        config
    }
}

/// Git's boolean spellings.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" | "" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
