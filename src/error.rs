//! Error types shared across the crate.

/// Common result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `@@` line could not be parsed into per-side ranges.
    ///
    /// This is fatal: the hunk buffers after it cannot be aligned.
    #[error("malformed hunk header ({reason}): {line}")]
    MalformedHunkHeader {
        /// The offending input line.
        line: String,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// A slice was requested with a negative bound.
    #[error("invalid range {start}..{end}")]
    InvalidRange {
        /// Requested start offset.
        start: i64,
        /// Requested end offset.
        end: i64,
    },
    /// No built-in theme carries the requested name.
    #[error("unknown theme: {0}")]
    UnknownTheme(String),
    /// A configuration value could not be interpreted.
    #[error("invalid value {value:?} for config key {key}")]
    Config {
        /// Fully qualified key, e.g. `split-diffs.min-line-width`.
        key: String,
        /// Raw value as found in the config source.
        value: String,
    },
    /// A syntax highlighter failed on one line.
    ///
    /// Rendering recovers from this by leaving that line uncolored.
    #[error("formatting failed: {0}")]
    Format(String),
    /// Reading input failed.
    #[error("i/o error: {source}")]
    Io {
        /// Source I/O error returned by the standard library.
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Whether rendering may continue past this error with the line left
    /// uncolored.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Format(_))
    }
}
