//! Travis Matrix Emitter
//!
//! Renders bound interpreters into `.travis.yml` text. The document is a fixed
//! header, one `matrix.include` entry per (interpreter, environment) pair, and a
//! fixed footer running tox.

use crate::schema::MatrixEntry;
use std::borrow::Cow;
use thiserror::Error;
use tox2travis_core::Interpreter;

/// Margin applied to every matrix entry so it nests under `matrix:`.
const ENTRY_INDENT: &str = "  ";

/// First line of a serialized entry, up to the Python version.
const PYTHON_KEY: &str = "- python: ";

const HEADER: &str = "\
language: python
cache: pip
matrix:
  include:
";

const FOOTER: &str = "\
install:
  - travis_retry pip install tox
script:
  - travis_retry tox
";

/// Error types for emitter operations
#[derive(Debug, Error, miette::Diagnostic)]
pub enum EmitterError {
    /// YAML (de)serialization failed
    #[error("Serialization failed: {0}")]
    #[diagnostic(code(tox2travis::travis::serialization))]
    Serialization(String),

    /// IO error while writing the descriptor
    #[error("IO error writing {}: {source}", path.display())]
    #[diagnostic(
        code(tox2travis::travis::io),
        help("Check that the output directory exists and is writable")
    )]
    Io {
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
        /// File being read or written
        path: std::path::PathBuf,
    },
}

/// Result type for emitter operations
pub type EmitterResult<T> = std::result::Result<T, EmitterError>;

/// The fixed document header, ending with the open `include:` block.
#[must_use]
pub const fn header() -> &'static str {
    HEADER
}

/// The fixed document footer with the install and script commands.
#[must_use]
pub const fn footer() -> &'static str {
    FOOTER
}

/// Lazily render the matrix entries for `interpreters`.
///
/// Entries come out interpreter by interpreter in the given order, and within an
/// interpreter in bound order. Interpreters without environments contribute
/// nothing. Each entry is indented and newline-terminated.
pub fn render(interpreters: &[Interpreter]) -> impl Iterator<Item = EmitterResult<String>> + '_ {
    interpreters.iter().flat_map(|interpreter| {
        interpreter.environments().iter().map(move |environment| {
            render_entry(&MatrixEntry::new(interpreter.target(), environment.name()))
        })
    })
}

/// Render the complete `.travis.yml` document.
///
/// # Errors
///
/// Returns [`EmitterError::Serialization`] if an entry cannot be serialized.
pub fn emit(interpreters: &[Interpreter]) -> EmitterResult<String> {
    let mut document = String::from(header());
    let mut entries = 0usize;
    for entry in render(interpreters) {
        document.push_str(&entry?);
        entries += 1;
    }
    document.push_str(footer());

    tracing::debug!(entries, bytes = document.len(), "Rendered Travis descriptor");
    Ok(document)
}

/// Serialize one entry as a single-item sequence nested under `include:`.
fn render_entry(entry: &MatrixEntry) -> EmitterResult<String> {
    let yaml = serde_yaml::to_string(&std::slice::from_ref(entry))
        .map_err(|e| EmitterError::Serialization(e.to_string()))?;

    let mut rendered = String::with_capacity(yaml.len() + 2 * ENTRY_INDENT.len() + 2);
    for (index, line) in yaml.strip_suffix('\n').unwrap_or(&yaml).split('\n').enumerate() {
        let line = if index == 0 {
            double_quote_python(line, &entry.python)
        } else {
            Cow::Borrowed(line)
        };
        if !line.is_empty() {
            rendered.push_str(ENTRY_INDENT);
        }
        rendered.push_str(&line);
        rendered.push('\n');
    }
    Ok(rendered)
}

/// Rewrite a `python:` value that `serde_yaml` left plain or single-quoted as a
/// double-quoted scalar, so versions read the same in every YAML parser.
///
/// Those two styles are only chosen for single-line printable text, where `\`
/// and `"` are the only characters a double-quoted scalar must escape. Values
/// emitted in any other style are kept as serialized.
fn double_quote_python<'a>(line: &'a str, python: &str) -> Cow<'a, str> {
    let Some(scalar) = line.strip_prefix(PYTHON_KEY) else {
        return Cow::Borrowed(line);
    };
    let single_quoted = format!("'{}'", python.replace('\'', "''"));
    if scalar != python && scalar != single_quoted {
        return Cow::Borrowed(line);
    }
    let escaped = python.replace('\\', "\\\\").replace('"', "\\\"");
    Cow::Owned(format!("{PYTHON_KEY}\"{escaped}\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::parse_descriptor;
    use tox2travis_core::{EnvironmentRecord, InterpreterOverride, InterpreterRegistry, bind};

    fn bound(environments: &[(&str, &str)], fallback: Option<&str>) -> Vec<Interpreter> {
        let records: Vec<EnvironmentRecord> = environments
            .iter()
            .map(|(name, basepython)| EnvironmentRecord::new(*name, *basepython))
            .collect();
        bind(
            InterpreterRegistry::builtin().interpreters(),
            &records,
            fallback,
        )
        .unwrap()
    }

    fn rendered(interpreters: &[Interpreter]) -> Vec<String> {
        render(interpreters).collect::<EmitterResult<_>>().unwrap()
    }

    /// Bind one environment to an interpreter with the given Travis version.
    fn single(target: &str, name: &str) -> Vec<Interpreter> {
        let registry = InterpreterRegistry::builtin()
            .with_overrides(&[InterpreterOverride::new("pyx", target)]);
        bind(
            registry.interpreters(),
            &[EnvironmentRecord::new(name, "pyx")],
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_header_and_footer() {
        let yaml = emit(&bound(&[], None)).unwrap();
        assert_eq!(yaml, format!("{HEADER}{FOOTER}"));
        assert!(yaml.starts_with("language: python\ncache: pip\nmatrix:\n  include:\n"));
        assert!(yaml.ends_with("script:\n  - travis_retry tox\n"));
    }

    #[test]
    fn test_single_entry_format() {
        let entries = rendered(&bound(&[("py36", "python3.6")], None));
        assert_eq!(entries, vec!["  - python: \"3.6\"\n    env: TOXENV=py36\n"]);
    }

    #[test]
    fn test_render_follows_catalog_order_not_environment_order() {
        let catalog = vec![
            Interpreter::new("python2.7", "2.7"),
            Interpreter::new("python3.6", "3.6"),
        ];
        let environments = vec![
            EnvironmentRecord::new("a", "python3.6"),
            EnvironmentRecord::new("b", "python2.7"),
        ];
        let bound = bind(&catalog, &environments, None).unwrap();

        assert_eq!(
            rendered(&bound),
            vec![
                "  - python: \"2.7\"\n    env: TOXENV=b\n",
                "  - python: \"3.6\"\n    env: TOXENV=a\n",
            ]
        );
    }

    #[test]
    fn test_empty_interpreters_are_omitted() {
        let yaml = emit(&bound(&[("py27", "python2.7")], None)).unwrap();
        assert_eq!(yaml.matches("- python:").count(), 1);
        assert!(!yaml.contains("pypy"));
    }

    #[test]
    fn test_fallback_entry() {
        let entries = rendered(&bound(&[("flake8", "python")], Some("pypy3")));
        assert_eq!(
            entries,
            vec!["  - python: \"pypy3\"\n    env: TOXENV=flake8\n"]
        );
    }

    #[test]
    fn test_override_entries() {
        let registry = InterpreterRegistry::builtin().with_overrides(&[
            InterpreterOverride::new("python3.8", "3.8"),
            InterpreterOverride::new("python3.9", "3.9"),
        ]);
        let environments = vec![
            EnvironmentRecord::new("new", "python3.8"),
            EnvironmentRecord::new("newer", "python3.9"),
        ];
        let bound = bind(registry.interpreters(), &environments, None).unwrap();

        assert_eq!(
            rendered(&bound),
            vec![
                "  - python: \"3.8\"\n    env: TOXENV=new\n",
                "  - python: \"3.9\"\n    env: TOXENV=newer\n",
            ]
        );
    }

    #[test]
    fn test_render_is_lazy_and_finite() {
        let interpreters = bound(&[("py27", "python2.7"), ("py36", "python3.6")], None);
        let mut entries = render(&interpreters);
        assert!(entries.next().is_some());
        assert!(entries.next().is_some());
        assert!(entries.next().is_none());
    }

    #[test]
    fn test_quotes_and_backslashes_in_version() {
        let entries = rendered(&single("a\"b\\c", "x"));
        assert_eq!(entries, vec!["  - python: \"a\\\"b\\\\c\"\n    env: TOXENV=x\n"]);
    }

    #[test]
    fn test_double_quote_python_keeps_other_styles() {
        assert_eq!(
            double_quote_python("- python: '3.6'", "3.6"),
            "- python: \"3.6\""
        );
        assert_eq!(
            double_quote_python("- python: it's", "it's"),
            "- python: \"it's\""
        );
        assert_eq!(double_quote_python("- python: |-", "3.8\nrc"), "- python: |-");
        assert_eq!(
            double_quote_python("- python: \"3.8\\a\"", "3.8\u{7}"),
            "- python: \"3.8\\a\""
        );
        assert_eq!(double_quote_python("  env: X", "X"), "  env: X");
    }

    #[test]
    fn test_special_characters_survive_parsing() {
        let cases = [
            ("3.6", "x\t#y"),
            ("3.8\nrc", "py38"),
            ("3.8\u{7}", "py38"),
            ("3.6", "a\u{85}b"),
            ("3.6", "a: b"),
            ("3.6", "x #y"),
            (" 3.6 ", "-lead"),
            ("", "empty"),
        ];

        for (target, name) in cases {
            let yaml = emit(&single(target, name)).unwrap();
            let descriptor = parse_descriptor(&yaml)
                .unwrap_or_else(|e| panic!("{target:?}/{name:?} did not parse: {e}\n{yaml}"));
            assert_eq!(
                descriptor.pairs(),
                vec![(target, name)],
                "{target:?}/{name:?} changed in\n{yaml}"
            );
        }
    }
}
