//! `envlist` splitting, brace expansion and default basepython factors.

/// Split an `envlist` value into environment names.
///
/// Entries are separated by commas or newlines. Brace groups are expanded as a
/// cartesian product, so `py{27,36}-django{18,19}` yields four names. Commas
/// inside braces do not split entries.
#[must_use]
pub fn parse_envlist(value: &str) -> Vec<String> {
    split_top_level(value, &[',', '\n'])
        .into_iter()
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .flat_map(expand_braces)
        .collect()
}

/// Expand every brace group in `pattern`.
///
/// Text without braces comes back unchanged as the single element. An
/// unbalanced `{` is kept literally.
#[must_use]
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };
    let Some(close) = matching_brace(pattern, open) else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..open];
    let inner = &pattern[open + 1..close];
    let suffix = &pattern[close + 1..];

    split_top_level(inner, &[','])
        .into_iter()
        .flat_map(|alternative| {
            expand_braces(&format!("{prefix}{}{suffix}", alternative.trim()))
        })
        .collect()
}

/// The basepython tox assigns to a default factor, if `factor` is one.
///
/// `py27` becomes `python2.7`, `py3` becomes `python3`, `py310` becomes
/// `python3.10`; `pypy`, `pypy2`, `pypy3` and `jython` map to themselves.
#[must_use]
pub fn default_basepython(factor: &str) -> Option<String> {
    match factor {
        "pypy" | "pypy2" | "pypy3" | "jython" => return Some(factor.to_string()),
        _ => {}
    }

    let digits = factor.strip_prefix("py")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (major, minor) = digits.split_at(1);
    if minor.is_empty() {
        Some(format!("python{major}"))
    } else {
        Some(format!("python{major}.{minor}"))
    }
}

/// The basepython implied by the first default factor in an environment name.
///
/// Factors are the `-`-separated parts of the name.
#[must_use]
pub fn basepython_from_factors(envname: &str) -> Option<String> {
    envname.split('-').find_map(default_basepython)
}

fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, ch) in text[open..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

fn split_top_level<'a>(text: &'a str, separators: &[char]) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            c if depth == 0 && separators.contains(&c) => {
                parts.push(&text[start..index]);
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
