//! Minimal INI reader matching the dialect tox accepts.
//!
//! Supported: `[section]` headers, `key = value` and `key: value` pairs,
//! indented continuation lines, and whole-line `#` / `;` comments.

use crate::error::{Error, Result};
use std::path::Path;

/// A parsed INI document, sections in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: Vec<IniSection>,
}

/// One `[name]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniSection {
    name: String,
    entries: Vec<(String, String)>,
}

impl IniSection {
    /// Section name without brackets.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of `key`. If the key repeats, the last occurrence wins.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn set(&mut self, key: String, value: String) {
        self.entries.push((key, value));
    }

    fn append_continuation(&mut self, line: &str) -> bool {
        let Some((_, value)) = self.entries.last_mut() else {
            return false;
        };
        if !value.is_empty() {
            value.push('\n');
        }
        value.push_str(line);
        true
    }
}

impl IniDocument {
    /// Parse `contents`. `path` is only used for error messages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToxConfig`] for an unterminated section header, a
    /// key/value pair outside any section, a line that is neither a header nor
    /// a pair, or a continuation line with nothing to continue.
    pub fn parse(path: &Path, contents: &str) -> Result<Self> {
        let mut sections: Vec<IniSection> = Vec::new();

        for (index, raw) in contents.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            if raw.starts_with([' ', '\t']) {
                let continued = sections
                    .last_mut()
                    .is_some_and(|section| section.append_continuation(trimmed));
                if !continued {
                    return Err(Error::tox_config(
                        path,
                        line_no,
                        "continuation line without a preceding key",
                    ));
                }
                continue;
            }

            if let Some(header) = trimmed.strip_prefix('[') {
                let Some(name) = header.strip_suffix(']') else {
                    return Err(Error::tox_config(
                        path,
                        line_no,
                        "unterminated section header",
                    ));
                };
                sections.push(IniSection {
                    name: name.trim().to_string(),
                    entries: Vec::new(),
                });
                continue;
            }

            let Some((key, value)) = split_pair(trimmed) else {
                return Err(Error::tox_config(
                    path,
                    line_no,
                    format!("expected 'key = value', found '{trimmed}'"),
                ));
            };
            let Some(section) = sections.last_mut() else {
                return Err(Error::tox_config(
                    path,
                    line_no,
                    "key/value pair outside of any section",
                ));
            };
            section.set(key.to_string(), value.to_string());
        }

        Ok(Self { sections })
    }

    /// Find a section by exact name. Later sections shadow earlier ones.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().rev().find(|s| s.name == name)
    }

    /// Look up `key` in section `section`.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// All sections in file order.
    pub fn sections(&self) -> impl Iterator<Item = &IniSection> {
        self.sections.iter()
    }
}

/// Split at whichever of `=` or `:` comes first.
fn split_pair(line: &str) -> Option<(&str, &str)> {
    let at = line.find(['=', ':'])?;
    let key = line[..at].trim();
    if key.is_empty() {
        return None;
    }
    Some((key, line[at + 1..].trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> Result<IniDocument> {
        IniDocument::parse(Path::new("tox.ini"), contents)
    }

    #[test]
    fn test_sections_and_pairs() {
        let doc = parse("[tox]\nenvlist = py27,py36\n\n[testenv:docs]\nbasepython: python3.6\n")
            .unwrap();
        assert_eq!(doc.get("tox", "envlist"), Some("py27,py36"));
        assert_eq!(doc.get("testenv:docs", "basepython"), Some("python3.6"));
        assert_eq!(doc.get("testenv", "basepython"), None);
    }

    #[test]
    fn test_continuation_lines() {
        let doc = parse("[tox]\nenvlist =\n    py27\n    py36\n").unwrap();
        assert_eq!(doc.get("tox", "envlist"), Some("py27\npy36"));
    }

    #[test]
    fn test_comments_are_ignored() {
        let doc = parse("# leading\n[tox]\n; note\nenvlist = py36\n  # indented\n").unwrap();
        assert_eq!(doc.get("tox", "envlist"), Some("py36"));
    }

    #[test]
    fn test_commands_with_colons_split_at_first_separator() {
        let doc = parse("[testenv]\ncommands = pytest --cov=pkg\n").unwrap();
        assert_eq!(doc.get("testenv", "commands"), Some("pytest --cov=pkg"));
    }

    #[test]
    fn test_last_value_wins() {
        let doc = parse("[tox]\nenvlist = py27\nenvlist = py36\n").unwrap();
        assert_eq!(doc.get("tox", "envlist"), Some("py36"));
    }

    #[test]
    fn test_unterminated_header() {
        let err = parse("[tox\nenvlist = py36\n").unwrap_err();
        assert!(matches!(err, Error::ToxConfig { line: 1, .. }));
    }

    #[test]
    fn test_pair_outside_section() {
        let err = parse("envlist = py36\n").unwrap_err();
        assert!(matches!(err, Error::ToxConfig { line: 1, .. }));
    }

    #[test]
    fn test_line_without_separator() {
        let err = parse("[tox]\nenvlist = py36\nbogus\n").unwrap_err();
        assert!(matches!(err, Error::ToxConfig { line: 3, .. }));
    }

    #[test]
    fn test_orphan_continuation() {
        let err = parse("[tox]\n    py36\n").unwrap_err();
        assert!(matches!(err, Error::ToxConfig { line: 2, .. }));
    }
}
