//! Single-pass literal token substitution
//!
//! Templates carry fixed literal placeholder tokens; no escaping and no
//! nested expansion. All tokens of a file are substituted in one scan so the
//! result never depends on the order replacements were declared in — the
//! short-name token is a textual substring of the full package identifier,
//! and sequential replacement passes would corrupt one or the other.

use std::path::Path;

use crate::error::Result;
use crate::fsops;

/// A set of literal placeholder tokens and their replacement values.
///
/// `apply` scans the input once, left to right, trying the longest token
/// first at every position. Overlapping tokens are resolved atomically: the
/// longer match always wins, and replacement text is never re-scanned.
#[derive(Debug, Default)]
pub struct TokenMap {
    /// Kept sorted by descending token length.
    entries: Vec<(String, String)>,
}

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let token = token.into();
        debug_assert!(!token.is_empty(), "placeholder tokens cannot be empty");
        let at = self.entries.partition_point(|(t, _)| t.len() >= token.len());
        self.entries.insert(at, (token, value.into()));
        self
    }

    /// True when no token is a substring of another.
    ///
    /// Token sets used for build-file patching must be disjoint; identifier
    /// rewriting has legitimately overlapping tokens and relies on
    /// longest-match instead.
    pub fn is_disjoint(&self) -> bool {
        for (i, (a, _)) in self.entries.iter().enumerate() {
            for (b, _) in &self.entries[i + 1..] {
                if a.contains(b.as_str()) || b.contains(a.as_str()) {
                    return false;
                }
            }
        }
        true
    }

    /// Substitute every token occurrence in `input`. An input containing no
    /// occurrences is returned unchanged.
    pub fn apply(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;
        'scan: while !rest.is_empty() {
            for (token, value) in &self.entries {
                if rest.starts_with(token.as_str()) {
                    out.push_str(value);
                    rest = &rest[token.len()..];
                    continue 'scan;
                }
            }
            let ch = rest.chars().next().expect("rest is non-empty");
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
        out
    }

    /// Rewrite one file in place. A file with no token occurrences is left
    /// unchanged and is not an error.
    pub fn apply_to_file(&self, path: &Path) -> Result<()> {
        let content = fsops::read_text(path)?;
        fsops::write_text(path, &self.apply(&content))
    }
}
