//! Diagnostics on stderr.
//!
//! Controlled by the `--log-level` flag or, failing that, the
//! `SPLIT_DIFFS_LOG` environment variable:
//! - unset, empty or `off`: no logging
//! - `error`, `warn`, `info`, `debug`, `trace` (or `1`..`5`)
//!
//! Stdout carries rendered rows only, so everything here goes to stderr.

use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable read when no level is passed explicitly.
pub const LOG_ENV: &str = "SPLIT_DIFFS_LOG";

/// Parse a level name or number.
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    let value = value.trim();
    if value.is_empty() {
        return Some(LevelFilter::Off);
    }
    match value.parse::<u8>() {
        Ok(0) => Some(LevelFilter::Off),
        Ok(1) => Some(LevelFilter::Error),
        Ok(2) => Some(LevelFilter::Warn),
        Ok(3) => Some(LevelFilter::Info),
        Ok(4) => Some(LevelFilter::Debug),
        Ok(5) => Some(LevelFilter::Trace),
        Ok(_) => None,
        Err(_) => value.parse().ok(),
    }
}

/// Level from the environment; unset or unparsable means off.
pub fn level_from_env() -> LevelFilter {
    std::env::var(LOG_ENV)
        .ok()
        .and_then(|value| parse_level(&value))
        .unwrap_or(LevelFilter::Off)
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:<5}] [{}] {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

/// Install the stderr logger at `level`, or at [`level_from_env`] when
/// `None`. Calling it again only changes the level.
pub fn init(level: Option<LevelFilter>) {
    let level = level.unwrap_or_else(level_from_env);
    // Fails only if a logger is already installed, which keeps that one.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
    log::debug!("logging at {level}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level("WARN"), Some(LevelFilter::Warn));
        assert_eq!(parse_level("5"), Some(LevelFilter::Trace));
        assert_eq!(parse_level("0"), Some(LevelFilter::Off));
        assert_eq!(parse_level(""), Some(LevelFilter::Off));
        assert_eq!(parse_level("9"), None);
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(Some(LevelFilter::Warn));
        init(Some(LevelFilter::Error));
        assert_eq!(log::max_level(), LevelFilter::Error);
        init(Some(LevelFilter::Off));
    }
}
