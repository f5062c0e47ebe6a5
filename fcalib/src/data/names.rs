//! File-name matching against literal names and glob patterns.
//!
//! Matching looks only at a candidate's base name, never its content or
//! directory. A pattern containing `*`, `?` or `[` is compiled as a glob
//! (via the `glob` crate, so `[abc]`, `[a-z]` and `[!x]` classes work too);
//! anything else must equal the base name exactly.

use std::collections::BTreeMap;
use std::path::PathBuf;

use glob::{MatchOptions, Pattern};
use serde::Serialize;

use crate::config::dedupe_preserving_order;
use crate::error::FcaError;
use crate::source::FileCandidate;
use crate::Result;

const GLOB_METACHARACTERS: &[char] = &['*', '?', '['];

/// A compiled name pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum NamePattern {
    /// Base name must equal this string
    Exact(String),
    /// Base name must match this glob
    Glob(Pattern),
}

impl NamePattern {
    /// Compile `pattern`. When matching is case-insensitive the pattern is
    /// lower-cased here and base names are lower-cased in [`Self::matches`].
    pub fn new(pattern: &str, case_sensitive: bool) -> Result<Self> {
        let text = if case_sensitive {
            pattern.to_string()
        } else {
            pattern.to_lowercase()
        };

        if !text.contains(GLOB_METACHARACTERS) {
            return Ok(NamePattern::Exact(text));
        }

        // Matching is per base name, so `**` means the same as `*`.
        let mut collapsed = String::with_capacity(text.len());
        for c in text.chars() {
            if !(c == '*' && collapsed.ends_with('*')) {
                collapsed.push(c);
            }
        }

        Pattern::new(&collapsed)
            .map(NamePattern::Glob)
            .map_err(|e| FcaError::InvalidGlob {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    /// Check a base name that has already been case-folded if required.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NamePattern::Exact(literal) => literal == name,
            NamePattern::Glob(pattern) => pattern.matches_with(name, glob_options()),
        }
    }
}

fn glob_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    }
}

/// Result of a name matching run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NameMatchResult {
    /// Valid patterns in input order
    pub patterns: Vec<String>,
    /// Whether matching was case-sensitive
    pub case_sensitive: bool,
    /// Matching paths per valid pattern, in traversal order. Every valid
    /// pattern has an entry, possibly empty.
    pub per_pattern_matches: BTreeMap<String, Vec<PathBuf>>,
    /// Patterns that failed to compile, with the reason
    pub invalid_patterns: BTreeMap<String, String>,
}

impl NameMatchResult {
    /// Number of valid patterns with at least one match.
    pub fn patterns_with_matches(&self) -> usize {
        self.per_pattern_matches
            .values()
            .filter(|paths| !paths.is_empty())
            .count()
    }

    /// Total number of (pattern, path) hits.
    pub fn total_matches(&self) -> usize {
        self.per_pattern_matches.values().map(Vec::len).sum()
    }
}

/// Single-pass reducer over candidates for name matching mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameMatcher;

impl NameMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Match every candidate's base name against every pattern.
    ///
    /// A malformed glob is recorded in `invalid_patterns`; the remaining
    /// patterns are still evaluated.
    pub fn process<I, S>(&self, candidates: I, patterns: &[S], case_sensitive: bool) -> NameMatchResult
    where
        I: IntoIterator<Item = FileCandidate>,
        S: AsRef<str>,
    {
        let inputs = dedupe_preserving_order(patterns.iter().map(|p| p.as_ref().to_string()));

        let mut result = NameMatchResult {
            case_sensitive,
            ..NameMatchResult::default()
        };
        let mut compiled = Vec::with_capacity(inputs.len());

        for input in inputs {
            match NamePattern::new(&input, case_sensitive) {
                Ok(pattern) => {
                    result.per_pattern_matches.insert(input.clone(), Vec::new());
                    result.patterns.push(input.clone());
                    compiled.push((input, pattern));
                }
                Err(err) => {
                    tracing::warn!(pattern = %input, error = %err, "ignoring invalid pattern");
                    result.invalid_patterns.insert(input, err.to_string());
                }
            }
        }

        if compiled.is_empty() {
            return result;
        }

        for candidate in candidates {
            let name = candidate.file_name();
            let name = if case_sensitive {
                name
            } else {
                name.to_lowercase()
            };

            for (input, pattern) in &compiled {
                if pattern.matches(&name) {
                    if let Some(paths) = result.per_pattern_matches.get_mut(input) {
                        paths.push(candidate.path.clone());
                    }
                }
            }
        }

        tracing::info!(
            patterns = result.patterns.len(),
            matches = result.total_matches(),
            "name matching finished"
        );

        result
    }
}
