//! Interpreter registry.
//!
//! Maps tox basepython names onto the identifiers Travis uses to provision a
//! Python. The built-in catalog is an immutable value; callers that need extra
//! interpreters extend a copy of it with [`InterpreterRegistry::with_overrides`].

use crate::environment::EnvironmentRecord;
use crate::error::{Error, Result};
use std::str::FromStr;

/// CPython minor versions known to both tox and Travis.
const CPYTHON_VERSIONS: &[&str] = &["2.7", "3.4", "3.5", "3.6"];

/// Alternative implementations whose tox and Travis names coincide.
const ALTERNATIVE_IMPLEMENTATIONS: &[&str] = &["jython", "pypy", "pypy3"];

/// Development builds: (tox basepython, Travis version).
const DEVELOPMENT_VERSIONS: &[(&str, &str)] = &[("python3.7", "3.7-dev")];

/// A Python interpreter as seen by tox and Travis, plus the environments bound to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    source: String,
    target: String,
    environments: Vec<EnvironmentRecord>,
}

impl Interpreter {
    /// Create an interpreter with no bound environments.
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            environments: Vec::new(),
        }
    }

    /// The tox basepython, e.g. `python3.6`.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The Travis `python:` value, e.g. `3.6`.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Environments bound to this interpreter, in the order they were added.
    #[must_use]
    pub fn environments(&self) -> &[EnvironmentRecord] {
        &self.environments
    }

    /// Bind an environment unless one with the same name is already bound.
    ///
    /// Returns `true` if the environment was added.
    pub fn add_environment(&mut self, environment: EnvironmentRecord) -> bool {
        if self
            .environments
            .iter()
            .any(|existing| existing.name() == environment.name())
        {
            return false;
        }
        self.environments.push(environment);
        true
    }
}

/// A user-supplied `SOURCE=TARGET` interpreter pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterOverride {
    /// The tox basepython.
    pub source: String,
    /// The Travis version.
    pub target: String,
}

impl InterpreterOverride {
    /// Create an override.
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl FromStr for InterpreterOverride {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((source, target)) = s.split_once('=') else {
            return Err(Error::invalid_override(s, "expected SOURCE=TARGET"));
        };
        let (source, target) = (source.trim(), target.trim());
        if source.is_empty() {
            return Err(Error::invalid_override(s, "source basepython is empty"));
        }
        if target.is_empty() {
            return Err(Error::invalid_override(s, "target version is empty"));
        }
        Ok(Self::new(source, target))
    }
}

/// Ordered catalog of interpreters.
///
/// Order matters: it is the order in which matrix entries are emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterRegistry {
    interpreters: Vec<Interpreter>,
}

impl InterpreterRegistry {
    /// Build the default catalog: CPython versions, then Jython and PyPy, then
    /// development builds.
    #[must_use]
    pub fn builtin() -> Self {
        let cpythons = CPYTHON_VERSIONS
            .iter()
            .map(|version| Interpreter::new(format!("python{version}"), *version));
        let alternatives = ALTERNATIVE_IMPLEMENTATIONS
            .iter()
            .map(|name| Interpreter::new(*name, *name));
        let development = DEVELOPMENT_VERSIONS
            .iter()
            .map(|(source, target)| Interpreter::new(*source, *target));

        Self {
            interpreters: cpythons.chain(alternatives).chain(development).collect(),
        }
    }

    /// Build a catalog from an explicit list of interpreters.
    #[must_use]
    pub fn from_interpreters(interpreters: Vec<Interpreter>) -> Self {
        Self { interpreters }
    }

    /// Return a copy of this catalog extended with `overrides`.
    ///
    /// An override for a basepython already in the catalog replaces its target in
    /// place; any other override is appended. `self` is left untouched.
    #[must_use]
    pub fn with_overrides(&self, overrides: &[InterpreterOverride]) -> Self {
        let mut extended = self.clone();
        for entry in overrides {
            if let Some(existing) = extended
                .interpreters
                .iter_mut()
                .find(|i| i.source == entry.source)
            {
                tracing::debug!(
                    basepython = %entry.source,
                    from = %existing.target,
                    to = %entry.target,
                    "Overriding built-in interpreter target"
                );
                existing.target.clone_from(&entry.target);
            } else {
                tracing::debug!(
                    basepython = %entry.source,
                    target = %entry.target,
                    "Adding custom interpreter"
                );
                extended
                    .interpreters
                    .push(Interpreter::new(&entry.source, &entry.target));
            }
        }
        extended
    }

    /// All interpreters in catalog order.
    #[must_use]
    pub fn interpreters(&self) -> &[Interpreter] {
        &self.interpreters
    }

    /// Look up an interpreter by tox basepython.
    #[must_use]
    pub fn get(&self, source: &str) -> Option<&Interpreter> {
        self.interpreters.iter().find(|i| i.source == source)
    }

    /// Whether `source` names a catalog entry.
    #[must_use]
    pub fn contains(&self, source: &str) -> bool {
        self.get(source).is_some()
    }

    /// All tox basepythons in catalog order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.interpreters.iter().map(Interpreter::source)
    }

    /// Number of interpreters in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interpreters.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interpreters.is_empty()
    }
}

impl Default for InterpreterRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
