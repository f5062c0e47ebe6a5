//! Line, word and character statistics.
//!
//! - **lines**: line terminators (`\n`, `\r\n` or a lone `\r`), plus one for a non-empty unterminated last line
//! - **words**: maximal runs of non-whitespace characters
//! - **characters**: decoded characters (a replacement character counts as one)
//!
//! Per-file counts are accumulated into a bucket per extension and into a
//! grand total. The grand total is always the sum of the extension buckets.

use std::collections::BTreeMap;
use std::ops::{Add, AddAssign};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::source::FileCandidate;

use super::reader::ContentReader;

/// Bucket key for files without an extension.
pub const NO_EXTENSION: &str = "(none)";

/// Counts for a single text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub lines: u64,
    pub words: u64,
    pub characters: u64,
}

impl TextStats {
    /// Compute statistics for decoded text.
    ///
    /// ```rust
    /// use fcalib::TextStats;
    ///
    /// let stats = TextStats::of("one two\nthree");
    /// assert_eq!((stats.lines, stats.words, stats.characters), (2, 3, 13));
    /// assert_eq!(TextStats::of("").lines, 0);
    /// ```
    pub fn of(text: &str) -> Self {
        let terminators = line_terminators(text);
        let unterminated = u64::from(!text.is_empty() && !text.ends_with(['\n', '\r']));
        Self {
            lines: terminators + unterminated,
            words: text.split_whitespace().count() as u64,
            characters: text.chars().count() as u64,
        }
    }
}

/// Count `\n`, `\r\n` and lone `\r` line endings.
fn line_terminators(text: &str) -> u64 {
    let mut bytes = text.bytes().peekable();
    let mut count = 0;
    while let Some(b) = bytes.next() {
        match b {
            b'\n' => count += 1,
            b'\r' => {
                count += 1;
                bytes.next_if_eq(&b'\n');
            }
            _ => {}
        }
    }
    count
}

impl Add for TextStats {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            lines: self.lines + other.lines,
            words: self.words + other.words,
            characters: self.characters + other.characters,
        }
    }
}

impl AddAssign for TextStats {
    fn add_assign(&mut self, other: Self) {
        self.lines += other.lines;
        self.words += other.words;
        self.characters += other.characters;
    }
}

/// Accumulated counts over a group of files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub lines: u64,
    pub words: u64,
    pub characters: u64,
    pub file_count: u64,
}

impl Totals {
    /// Add one file's counts.
    pub fn add_file(&mut self, stats: TextStats) {
        self.lines += stats.lines;
        self.words += stats.words;
        self.characters += stats.characters;
        self.file_count += 1;
    }
}

impl Add for Totals {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            lines: self.lines + other.lines,
            words: self.words + other.words,
            characters: self.characters + other.characters,
            file_count: self.file_count + other.file_count,
        }
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::iter::Sum for Totals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Totals::default(), Add::add)
    }
}

/// Result of a statistics run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsResult {
    /// Counts for every processed file
    pub per_file_stats: BTreeMap<PathBuf, TextStats>,
    /// Totals keyed by extension, or [`NO_EXTENSION`]
    pub per_extension_totals: BTreeMap<String, Totals>,
    /// Sum over all processed files
    pub grand_total: Totals,
    /// Number of files skipped as unreadable
    pub skipped_files: u64,
}

impl StatsResult {
    /// Fold one file into the result.
    pub fn record(&mut self, candidate: FileCandidate, stats: TextStats) {
        let key = if candidate.extension.is_empty() {
            NO_EXTENSION.to_string()
        } else {
            candidate.extension
        };
        self.per_extension_totals
            .entry(key)
            .or_default()
            .add_file(stats);
        self.grand_total.add_file(stats);
        self.per_file_stats.insert(candidate.path, stats);
    }
}

/// Single-pass reducer over candidates for statistics mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsAggregator {
    reader: ContentReader,
}

impl StatsAggregator {
    pub fn new(reader: ContentReader) -> Self {
        Self { reader }
    }

    /// Compute statistics for every readable candidate.
    pub fn process<I>(&self, candidates: I) -> StatsResult
    where
        I: IntoIterator<Item = FileCandidate>,
    {
        let mut result = StatsResult::default();

        for candidate in candidates {
            match self.reader.read(&candidate.path) {
                Ok(text) => {
                    let stats = TextStats::of(&text);
                    result.record(candidate, stats);
                }
                Err(err) => {
                    tracing::debug!(path = %candidate.path.display(), error = %err, "skipping unreadable file");
                    result.skipped_files += 1;
                }
            }
        }

        tracing::info!(
            files = result.grand_total.file_count,
            lines = result.grand_total.lines,
            "statistics finished"
        );

        result
    }
}
