//! String search: count literal occurrences of search terms in file contents.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::dedupe_preserving_order;
use crate::source::FileCandidate;

use super::reader::ContentReader;

/// Result of a string search run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Search terms in the order they were counted
    pub terms: Vec<String>,
    /// Whether matching was case-sensitive
    pub case_sensitive: bool,
    /// Per-file term counts; only files and terms with nonzero counts
    pub per_file_counts: BTreeMap<PathBuf, BTreeMap<String, u64>>,
    /// Total occurrences per term across all files
    pub totals: BTreeMap<String, u64>,
    /// Number of distinct files with at least one match
    pub files_with_matches: u64,
    /// Number of files read successfully
    pub files_scanned: u64,
    /// Number of files skipped as unreadable
    pub skipped_files: u64,
}

impl SearchResult {
    /// Sum of all term totals.
    pub fn total_occurrences(&self) -> u64 {
        self.totals.values().sum()
    }
}

/// Count non-overlapping literal occurrences of `needle` in `haystack`.
///
/// ```rust
/// use fcalib::count_occurrences;
///
/// assert_eq!(count_occurrences("aaaa", "aa"), 2);
/// assert_eq!(count_occurrences("error error", "error"), 2);
/// ```
pub fn count_occurrences(haystack: &str, needle: &str) -> u64 {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count() as u64
}

/// Single-pass reducer over candidates for string search mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringSearchAggregator {
    reader: ContentReader,
}

impl StringSearchAggregator {
    pub fn new(reader: ContentReader) -> Self {
        Self { reader }
    }

    /// Count every term in every readable candidate.
    ///
    /// Terms are de-duplicated (first occurrence wins) and empty terms are
    /// dropped. When no terms remain, no file is read.
    pub fn process<I, S>(&self, candidates: I, search_terms: &[S], case_sensitive: bool) -> SearchResult
    where
        I: IntoIterator<Item = FileCandidate>,
        S: AsRef<str>,
    {
        let terms: Vec<String> = dedupe_preserving_order(
            search_terms
                .iter()
                .map(|t| t.as_ref().to_string())
                .filter(|t| !t.is_empty()),
        );

        let mut result = SearchResult {
            terms: terms.clone(),
            case_sensitive,
            ..SearchResult::default()
        };

        if terms.is_empty() {
            return result;
        }

        let needles: Vec<String> = if case_sensitive {
            terms.clone()
        } else {
            terms.iter().map(|t| t.to_lowercase()).collect()
        };
        for term in &terms {
            result.totals.insert(term.clone(), 0);
        }

        for candidate in candidates {
            let text = match self.reader.read(&candidate.path) {
                Ok(text) => text,
                Err(err) => {
                    tracing::debug!(path = %candidate.path.display(), error = %err, "skipping unreadable file");
                    result.skipped_files += 1;
                    continue;
                }
            };
            result.files_scanned += 1;

            let haystack = if case_sensitive {
                text
            } else {
                text.to_lowercase()
            };

            let mut file_counts = BTreeMap::new();
            for (term, needle) in terms.iter().zip(&needles) {
                let count = count_occurrences(&haystack, needle);
                if count > 0 {
                    file_counts.insert(term.clone(), count);
                    *result.totals.entry(term.clone()).or_default() += count;
                }
            }

            if !file_counts.is_empty() {
                result.files_with_matches += 1;
                result.per_file_counts.insert(candidate.path, file_counts);
            }
        }

        tracing::info!(
            files = result.files_scanned,
            matched = result.files_with_matches,
            occurrences = result.total_occurrences(),
            "string search finished"
        );

        result
    }
}
