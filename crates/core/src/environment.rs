//! Environment records produced by a configuration source.

use serde::{Deserialize, Serialize};

/// A named unit of work from the tox configuration and the basepython it asks for.
///
/// Records are identified by name: two records with the same name are the same
/// environment as far as binding is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentRecord {
    name: String,
    basepython: String,
}

impl EnvironmentRecord {
    /// Create a record for environment `name` requiring `basepython`.
    #[must_use]
    pub fn new(name: impl Into<String>, basepython: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            basepython: basepython.into(),
        }
    }

    /// The environment name (the value used for `TOXENV`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The requested tox basepython.
    #[must_use]
    pub fn basepython(&self) -> &str {
        &self.basepython
    }
}
