//! Shell-style pattern matching
//!
//! View names and excluded directories are selected with `fnmatch` patterns:
//! `*`, `?`, `[seq]` and `[!seq]`. Everything else is literal, including
//! `^` at the start of a class and braces. Patterns are translated once into
//! [`globset`] syntax and compiled into a single [`GlobSet`].

use crate::view::errors::{Result, ViewError};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Compiled list of shell-style patterns
#[derive(Debug, Clone)]
pub struct PatternSet {
    set: GlobSet,
    len: usize,
}

impl PatternSet {
    /// Compiles `patterns`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Pattern`] for a pattern that cannot be compiled.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(compile(pattern.as_ref())?);
        }
        let set = builder.build().map_err(|e| ViewError::Pattern {
            pattern: String::new(),
            reason: e.to_string(),
        })?;
        Ok(Self { set, len: patterns.len() })
    }

    /// True if no patterns were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if `text` matches any pattern.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.set.is_match(text)
    }

    /// True if the set is empty or `text` matches one of its patterns.
    #[must_use]
    pub fn selects(&self, text: &str) -> bool {
        self.is_empty() || self.is_match(text)
    }
}

fn compile(pattern: &str) -> Result<globset::Glob> {
    GlobBuilder::new(&translate(pattern))
        .literal_separator(false)
        .backslash_escape(false)
        .build()
        .map_err(|e| ViewError::Pattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}

/// Rewrites an `fnmatch` pattern into equivalent globset syntax.
fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '*' | '?' => out.push(c),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    push_class(&mut out, &chars[i..end]);
                    i = end + 1;
                }
                None => out.push_str("[[]"),
            },
            '{' | '}' | ']' => {
                out.push('[');
                out.push(c);
                out.push(']');
            }
            _ => out.push(c),
        }
    }
    out
}

/// Index of the `]` closing a class whose body starts at `start`.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    chars[j.min(chars.len())..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| j + offset)
}

fn push_class(out: &mut String, body: &[char]) {
    let (negated, members) = match body.split_first() {
        Some(('!', rest)) => (true, rest),
        _ => (false, body),
    };
    let mut members = members.to_vec();

    // globset negates on a leading `^` as well as `!`
    if !negated && matches!(members.first(), Some('^' | '!')) {
        match members.iter().position(|c| !matches!(c, '^' | '!')) {
            Some(first_plain) => members.rotate_left(first_plain),
            None => {
                let mut alternatives: Vec<&str> = Vec::new();
                if members.contains(&'^') {
                    alternatives.push("^");
                }
                if members.contains(&'!') {
                    alternatives.push("!");
                }
                out.push('{');
                out.push_str(&alternatives.join(","));
                out.push('}');
                return;
            }
        }
    }

    out.push('[');
    if negated {
        out.push('!');
    }
    out.extend(members);
    out.push(']');
}

/// Directory exclusion rules for recursive discovery
///
/// Each pattern is applied according to its shape: a bare pattern matches
/// the directory name, an absolute one the absolute directory path and a
/// relative one containing a separator the path relative to the working
/// directory.
#[derive(Debug, Clone)]
pub struct ExcludeRules {
    names: PatternSet,
    absolute: PatternSet,
    relative: PatternSet,
    cwd: Option<PathBuf>,
}

impl ExcludeRules {
    /// Compiles `patterns`. Entries holding several patterns joined by the
    /// platform path list separator are split first.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Pattern`] for a pattern that cannot be compiled.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut names = Vec::new();
        let mut absolute = Vec::new();
        let mut relative = Vec::new();
        for entry in patterns {
            let entry: &str = entry.as_ref();
            for pattern in std::env::split_paths(entry) {
                let text = pattern.to_string_lossy().into_owned();
                if text.is_empty() {
                    continue;
                }
                if pattern.is_absolute() {
                    absolute.push(text);
                } else if text.contains(MAIN_SEPARATOR) {
                    relative.push(text);
                } else {
                    names.push(text);
                }
            }
        }

        let cwd = std::env::current_dir()
            .ok()
            .map(|dir| dir.canonicalize().unwrap_or(dir));
        Ok(Self {
            names: PatternSet::new(&names)?,
            absolute: PatternSet::new(&absolute)?,
            relative: PatternSet::new(&relative)?,
            cwd,
        })
    }

    /// True if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.absolute.is_empty() && self.relative.is_empty()
    }

    /// True if the directory at `dir` (an absolute path) is excluded.
    #[must_use]
    pub fn excludes(&self, dir: &Path) -> bool {
        let name = dir.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        if self.names.is_match(&name) {
            return true;
        }
        if self.absolute.is_match(&dir.to_string_lossy()) {
            return true;
        }
        if self.relative.is_empty() {
            return false;
        }
        let relative = self
            .cwd
            .as_deref()
            .and_then(|cwd| dir.strip_prefix(cwd).ok())
            .unwrap_or(dir);
        self.relative.is_match(&relative.to_string_lossy())
    }
}
