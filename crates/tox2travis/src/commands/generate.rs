//! `tox2travis generate`: tox.ini in, `.travis.yml` out.

use crate::cli::CliError;
use std::path::PathBuf;
use tox2travis_core::tox::ToxConfig;
use tox2travis_core::{InterpreterOverride, InterpreterRegistry, bind};
use tox2travis_travis::{FileStatus, emit, parse_descriptor, write_descriptor};

/// Options for the generate command.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Descriptor to write.
    pub outfile: PathBuf,
    /// Fallback basepython from the command line; takes precedence over tox.ini.
    pub fallback: Option<String>,
    /// Overrides from the command line, applied after those in tox.ini.
    pub overrides: Vec<InterpreterOverride>,
    /// tox configuration to read.
    pub tox_ini: PathBuf,
    /// Report without writing.
    pub dry_run: bool,
}

/// What generate did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// Descriptor path.
    pub outfile: PathBuf,
    /// Write status.
    pub status: FileStatus,
    /// Number of matrix entries written.
    pub entries: usize,
    /// Environments left out because no interpreter matched.
    pub skipped: Vec<String>,
}

/// Read the tox configuration, bind its environments and write the descriptor.
///
/// All validation happens before anything is written.
///
/// # Errors
///
/// - [`CliError::Config`] for an unknown fallback, a malformed override or a
///   malformed tox.ini
/// - [`CliError::Io`] if tox.ini cannot be read or the descriptor cannot be written
pub fn execute_generate(options: &GenerateOptions) -> Result<GenerateReport, CliError> {
    let config = ToxConfig::load(&options.tox_ini)?;

    let fallback = options.fallback.clone().or(config.fallback);
    let overrides: Vec<InterpreterOverride> = config
        .overrides
        .into_iter()
        .chain(options.overrides.iter().cloned())
        .collect();

    let registry = InterpreterRegistry::builtin().with_overrides(&overrides);
    tracing::debug!(
        interpreters = registry.len(),
        overrides = overrides.len(),
        fallback = fallback.as_deref().unwrap_or("<none>"),
        "Resolved interpreter catalog"
    );

    let bound = bind(
        registry.interpreters(),
        &config.environments,
        fallback.as_deref(),
    )?;

    let skipped: Vec<String> = config
        .environments
        .iter()
        .filter(|env| {
            !bound
                .iter()
                .any(|i| i.environments().iter().any(|e| e.name() == env.name()))
        })
        .map(|env| env.name().to_string())
        .collect();
    if !skipped.is_empty() {
        tracing::info!(
            skipped = ?skipped,
            "Environments without a matching interpreter were left out; pass --fallback to include them"
        );
    }

    let content = emit(&bound)?;
    let expected: Vec<(&str, &str)> = bound
        .iter()
        .flat_map(|interpreter| {
            interpreter
                .environments()
                .iter()
                .map(move |env| (interpreter.target(), env.name()))
        })
        .collect();
    verify_matrix(&content, &expected)?;
    let entries = expected.len();

    let status = write_descriptor(&options.outfile, &content, options.dry_run)?;

    Ok(GenerateReport {
        outfile: options.outfile.clone(),
        status,
        entries,
        skipped,
    })
}

/// Check that `content` parses back to exactly the `(python, TOXENV)` pairs
/// that were bound.
fn verify_matrix(content: &str, expected: &[(&str, &str)]) -> Result<(), CliError> {
    let descriptor = parse_descriptor(content)?;
    let written = descriptor.pairs();
    if written != expected {
        return Err(CliError::other(format!(
            "rendered descriptor does not match the bound environments: wrote {written:?}, expected {expected:?}"
        )));
    }
    Ok(())
}
