//! Crate-level error types.

use std::fmt;

/// Errors produced by the skyswarm crate.
#[derive(Debug)]
pub enum SkyswarmError {
    /// Show document could not be parsed, or a required field is missing.
    ShowParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for SkyswarmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShowParse(msg) => write!(f, "show parse error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for SkyswarmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SkyswarmError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
