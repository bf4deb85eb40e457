//! Error types for option normalization.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for cruiser operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Hint attached to a missing rules file.
pub const RULES_FILE_HINT: &str =
    "(You can create a cruiser configuration file with `cruiser init`.)";

/// Hint attached to a missing known-violations baseline.
pub const BASELINE_FILE_HINT: &str =
    "(You can create a known-violations baseline with `--output-type baseline`.)";

#[derive(Error, Debug)]
pub enum Error {
    /// A file the options point at is missing or unreadable.
    #[error("Can't open '{}' for reading. Does it exist?\n  {hint}", .path.display())]
    FileNotFound { path: PathBuf, hint: String },

    #[error("failed to read rule set {}: {source}", .path.display())]
    RuleSetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rule set {}: {reason}", .path.display())]
    RuleSetParse { path: PathBuf, reason: String },

    #[error("option '{key}' must be {expected}")]
    InvalidOption { key: String, expected: &'static str },

    #[error("failed to parse defaults file {}: {reason}", .path.display())]
    DefaultsParse { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn file_not_found(path: impl Into<PathBuf>, hint: &str) -> Self {
        Error::FileNotFound {
            path: path.into(),
            hint: hint.to_string(),
        }
    }

    /// The path this error refers to, when there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Error::FileNotFound { path, .. }
            | Error::RuleSetRead { path, .. }
            | Error::RuleSetParse { path, .. }
            | Error::DefaultsParse { path, .. } => Some(path),
            Error::InvalidOption { .. } | Error::Io(_) => None,
        }
    }
}
