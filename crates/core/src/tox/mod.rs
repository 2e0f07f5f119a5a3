//! `tox.ini` environment source.
//!
//! Reads the environments a tox project defines and the basepython each one
//! requires, along with optional `[tox2travis]` settings:
//!
//! ```ini
//! [tox2travis]
//! fallback = python3.6
//! overrides =
//!     python3.8=3.8
//! ```

mod envlist;
mod ini;

pub use envlist::{basepython_from_factors, default_basepython, expand_braces, parse_envlist};
pub use ini::{IniDocument, IniSection};

use crate::environment::EnvironmentRecord;
use crate::error::{Error, Result};
use crate::interpreter::InterpreterOverride;
use std::collections::BTreeMap;
use std::path::Path;

/// Basepython assumed when neither the environment nor its factors name one.
///
/// It never matches a catalog entry, so such environments go to the fallback.
pub const DEFAULT_BASEPYTHON: &str = "python";

/// Section holding tox2travis settings inside `tox.ini`.
pub const SETTINGS_SECTION: &str = "tox2travis";

const TESTENV_PREFIX: &str = "testenv:";

/// Everything tox2travis reads from a `tox.ini`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToxConfig {
    /// All environments, sorted by name.
    pub environments: Vec<EnvironmentRecord>,
    /// `fallback` from the `[tox2travis]` section.
    pub fallback: Option<String>,
    /// `overrides` from the `[tox2travis]` section, in file order.
    pub overrides: Vec<InterpreterOverride>,
}

impl ToxConfig {
    /// Read and parse the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, and the errors of
    /// [`ToxConfig::parse`] otherwise.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| Error::io(source, path, "reading tox configuration"))?;
        Self::parse(path, &contents)
    }

    /// Parse `contents` as a tox configuration. `path` is used for errors only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToxConfig`] for malformed INI and
    /// [`Error::InvalidOverride`] for a malformed `overrides` line.
    pub fn parse(path: &Path, contents: &str) -> Result<Self> {
        let document = IniDocument::parse(path, contents)?;
        let environments = collect_environments(&document);

        tracing::debug!(
            path = %path.display(),
            environments = environments.len(),
            "Parsed tox configuration"
        );

        let settings = document.section(SETTINGS_SECTION);
        let fallback = settings
            .and_then(|s| s.get("fallback"))
            .filter(|v| !v.is_empty())
            .map(String::from);
        let overrides = settings
            .and_then(|s| s.get("overrides"))
            .map(|value| {
                value
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::parse::<InterpreterOverride>)
                    .collect::<Result<Vec<InterpreterOverride>>>()
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            environments,
            fallback,
            overrides,
        })
    }
}

/// Collect environments from `envlist` and `[testenv:NAME]` sections.
fn collect_environments(document: &IniDocument) -> Vec<EnvironmentRecord> {
    let mut names: Vec<String> = document
        .get("tox", "envlist")
        .map(parse_envlist)
        .unwrap_or_default();

    names.extend(
        document
            .sections()
            .filter_map(|section| section.name().strip_prefix(TESTENV_PREFIX))
            .flat_map(expand_braces),
    );

    let shared_basepython = document.get("testenv", "basepython");

    // BTreeMap both deduplicates and sorts by name
    let by_name: BTreeMap<String, String> = names
        .into_iter()
        .map(|name| {
            let basepython = resolve_basepython(document, &name, shared_basepython);
            (name, basepython)
        })
        .collect();

    by_name
        .into_iter()
        .map(|(name, basepython)| EnvironmentRecord::new(name, basepython))
        .collect()
}

/// First hit wins: `[testenv:NAME] basepython`, a python factor of the name,
/// `[testenv] basepython`, then [`DEFAULT_BASEPYTHON`]. A python factor
/// therefore takes precedence over an inherited `[testenv]` basepython.
fn resolve_basepython(document: &IniDocument, envname: &str, shared: Option<&str>) -> String {
    document
        .get(&format!("{TESTENV_PREFIX}{envname}"), "basepython")
        .map(String::from)
        .or_else(|| basepython_from_factors(envname))
        .or_else(|| shared.map(String::from))
        .unwrap_or_else(|| DEFAULT_BASEPYTHON.to_string())
}
