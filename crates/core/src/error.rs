//! Error types for tox2travis core operations.

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading configuration or binding environments.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The requested fallback is not a known interpreter.
    #[error("{basepython} is not a known basepython, but was specified as the fallback")]
    #[diagnostic(
        code(tox2travis::core::unknown_fallback),
        help("Pick one of the known basepythons, or add it with --override SOURCE=TARGET")
    )]
    UnknownFallback {
        /// The identifier that was requested.
        basepython: String,
    },

    /// An interpreter override could not be parsed.
    #[error("Invalid interpreter override '{value}': {reason}")]
    #[diagnostic(
        code(tox2travis::core::invalid_override),
        help("Overrides are written as SOURCE=TARGET, e.g. python3.8=3.8")
    )]
    InvalidOverride {
        /// The raw override value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The tox configuration file is malformed.
    #[error("Invalid tox configuration at {}:{line}: {message}", path.display())]
    #[diagnostic(code(tox2travis::core::tox_config))]
    ToxConfig {
        /// Path of the configuration file.
        path: PathBuf,
        /// One-based line number of the offending line.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// I/O failure while reading configuration.
    #[error("I/O {operation} failed{}: {source}", path.as_ref().map_or(String::new(), |p| format!(" on {}", p.display())))]
    #[diagnostic(
        code(tox2travis::core::io),
        help("Check file permissions and ensure the path exists")
    )]
    Io {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
        /// Path involved, if any.
        path: Option<PathBuf>,
        /// Operation that failed.
        operation: String,
    },
}

impl Error {
    /// Create an unknown fallback error.
    #[must_use]
    pub fn unknown_fallback(basepython: impl Into<String>) -> Self {
        Self::UnknownFallback {
            basepython: basepython.into(),
        }
    }

    /// Create an invalid override error.
    #[must_use]
    pub fn invalid_override(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOverride {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a tox configuration error.
    #[must_use]
    pub fn tox_config(path: &Path, line: usize, message: impl Into<String>) -> Self {
        Self::ToxConfig {
            path: path.to_path_buf(),
            line,
            message: message.into(),
        }
    }

    /// Create an I/O error with path context.
    #[must_use]
    pub fn io(source: std::io::Error, path: &Path, operation: impl Into<String>) -> Self {
        Self::Io {
            source,
            path: Some(path.to_path_buf()),
            operation: operation.into(),
        }
    }
}
