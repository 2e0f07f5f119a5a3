//! Travis Descriptor Schema Types
//!
//! The subset of `.travis.yml` that tox2travis writes, used to read a rendered
//! document back and check its matrix.
//! See: <https://docs.travis-ci.com/user/languages/python/>

use crate::emitter::{EmitterError, EmitterResult};
use serde::{Deserialize, Serialize};

/// A `.travis.yml` as produced by tox2travis
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TravisDescriptor {
    /// Build language, always `python`
    pub language: String,

    /// Dependency cache, `pip`
    #[serde(default)]
    pub cache: Option<String>,

    /// Build matrix
    pub matrix: Matrix,

    /// Install phase commands
    #[serde(default)]
    pub install: Vec<String>,

    /// Script phase commands
    #[serde(default)]
    pub script: Vec<String>,
}

/// The `matrix:` block
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Matrix {
    /// Explicit matrix entries; `None` when `include:` is empty
    #[serde(default)]
    pub include: Option<Vec<MatrixEntry>>,
}

/// One `matrix.include` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixEntry {
    /// Travis Python version
    pub python: String,

    /// Environment assignment, `TOXENV=<name>`
    pub env: String,
}

impl MatrixEntry {
    /// Entry running tox environment `name` on Travis Python `python`.
    #[must_use]
    pub fn new(python: impl Into<String>, name: &str) -> Self {
        Self {
            python: python.into(),
            env: format!("TOXENV={name}"),
        }
    }

    /// The tox environment name, if `env` is a `TOXENV=` assignment.
    #[must_use]
    pub fn toxenv(&self) -> Option<&str> {
        self.env.strip_prefix("TOXENV=")
    }
}

impl TravisDescriptor {
    /// Matrix entries, empty when the `include:` block has none.
    #[must_use]
    pub fn entries(&self) -> &[MatrixEntry] {
        self.matrix.include.as_deref().unwrap_or_default()
    }

    /// `(python, toxenv)` pairs in document order.
    ///
    /// Entries whose `env` is not a `TOXENV=` assignment are skipped.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.entries()
            .iter()
            .filter_map(|entry| entry.toxenv().map(|env| (entry.python.as_str(), env)))
            .collect()
    }
}

/// Parse a rendered `.travis.yml`.
///
/// # Errors
///
/// Returns [`EmitterError::Serialization`] if `yaml` is not a valid descriptor.
pub fn parse_descriptor(yaml: &str) -> EmitterResult<TravisDescriptor> {
    serde_yaml::from_str(yaml).map_err(|e| EmitterError::Serialization(e.to_string()))
}
