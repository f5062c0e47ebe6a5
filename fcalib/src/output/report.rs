//! Plain-text reports for each analysis mode.
//!
//! Rendering is pure: each `render_*` function turns a result into a
//! `String`. [`ReportWriter`] then stores it under a timestamped name such
//! as `string_search_20250101-120000.txt`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};

use crate::data::names::NameMatchResult;
use crate::data::search::SearchResult;
use crate::data::stats::{StatsResult, NO_EXTENSION};
use crate::Result;

pub const PROGRAM_NAME: &str = "File Content Analyzer";
pub const PROGRAM_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default directory for written reports.
pub const RESULTS_DIRNAME: &str = "analysis-results";

/// Analysis mode, used for report titles and file name prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    StringSearch,
    FileStats,
    NameSearch,
}

impl ReportKind {
    pub fn prefix(self) -> &'static str {
        match self {
            ReportKind::StringSearch => "string_search",
            ReportKind::FileStats => "file_stats",
            ReportKind::NameSearch => "name_search",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::StringSearch => "String Search Report",
            ReportKind::FileStats => "File Statistics Report",
            ReportKind::NameSearch => "Filename Search Report",
        }
    }
}

fn header(out: &mut String, kind: ReportKind, directory: &Path) {
    out.push_str(&format!("{PROGRAM_NAME} v{PROGRAM_VERSION}\n"));
    out.push_str(&format!("{}\n", kind.title()));
    out.push('\n');
    out.push_str(&format!("Directory: {}\n", directory.display()));
}

fn skipped_line(out: &mut String, skipped_files: u64) {
    if skipped_files > 0 {
        out.push_str(&format!("Skipped unreadable files: {skipped_files}\n"));
    }
}

/// Render a string search report.
pub fn render_search_report(directory: &Path, result: &SearchResult) -> String {
    let mut out = String::new();
    header(&mut out, ReportKind::StringSearch, directory);
    out.push_str(&format!("Case-sensitive: {}\n", result.case_sensitive));
    out.push_str("Search strings:\n");
    for term in &result.terms {
        out.push_str(&format!("  - {term}\n"));
    }
    out.push('\n');

    if result.per_file_counts.is_empty() {
        out.push_str("No matches found.\n");
        skipped_line(&mut out, result.skipped_files);
        return out;
    }

    out.push_str(&format!("Total files with matches: {}\n", result.files_with_matches));
    out.push_str(&format!("Total occurrences: {}\n", result.total_occurrences()));
    skipped_line(&mut out, result.skipped_files);
    out.push('\n');

    for (path, counts) in &result.per_file_counts {
        out.push_str(&format!("{}\n", path.display()));
        // Keep the user's term order within each file.
        for term in &result.terms {
            if let Some(count) = counts.get(term) {
                out.push_str(&format!("  {term}: {count}\n"));
            }
        }
        out.push('\n');
    }

    out
}

/// Render a file statistics report.
pub fn render_stats_report(directory: &Path, result: &StatsResult) -> String {
    let mut out = String::new();
    header(&mut out, ReportKind::FileStats, directory);
    out.push('\n');

    let total = &result.grand_total;
    out.push_str("Summary:\n");
    out.push_str(&format!("  Total files: {}\n", total.file_count));
    out.push_str(&format!("  Total lines: {}\n", total.lines));
    out.push_str(&format!("  Total words: {}\n", total.words));
    out.push_str(&format!("  Total characters: {}\n", total.characters));
    if result.skipped_files > 0 {
        out.push_str(&format!("  Skipped unreadable files: {}\n", result.skipped_files));
    }
    out.push('\n');

    out.push_str("Per-extension totals:\n");
    for (ext, t) in &result.per_extension_totals {
        let label = if ext == NO_EXTENSION {
            ext.clone()
        } else {
            format!(".{ext}")
        };
        out.push_str(&format!(
            "  {label}  files={} lines={} words={} chars={}\n",
            t.file_count, t.lines, t.words, t.characters
        ));
    }
    out.push('\n');

    out.push_str("Per-file details:\n");
    for (path, s) in &result.per_file_stats {
        out.push_str(&format!("{}\n", path.display()));
        out.push_str(&format!("  Lines: {}\n", s.lines));
        out.push_str(&format!("  Words: {}\n", s.words));
        out.push_str(&format!("  Characters: {}\n", s.characters));
        out.push('\n');
    }

    out
}

/// Render a file name search report.
pub fn render_names_report(directory: &Path, result: &NameMatchResult) -> String {
    let mut out = String::new();
    header(&mut out, ReportKind::NameSearch, directory);
    out.push_str(&format!("Case-sensitive: {}\n", result.case_sensitive));
    out.push('\n');

    out.push_str("Patterns searched:\n");
    for pattern in &result.patterns {
        out.push_str(&format!("  - {pattern}\n"));
    }
    out.push('\n');

    out.push_str(&format!(
        "Patterns with matches: {} / {}\n",
        result.patterns_with_matches(),
        result.patterns.len()
    ));
    out.push_str(&format!("Total matching files: {}\n", result.total_matches()));
    out.push('\n');

    for pattern in &result.patterns {
        out.push_str(&format!("Pattern: {pattern}\n"));
        let mut paths: Vec<&PathBuf> = result
            .per_pattern_matches
            .get(pattern)
            .map(|p| p.iter().collect())
            .unwrap_or_default();
        if paths.is_empty() {
            out.push_str("  (no matches)\n");
        }
        paths.sort();
        for path in paths {
            out.push_str(&format!("  {}\n", path.display()));
        }
        out.push('\n');
    }

    if !result.invalid_patterns.is_empty() {
        out.push_str("Invalid patterns:\n");
        for (pattern, message) in &result.invalid_patterns {
            out.push_str(&format!("  {pattern}: {message}\n"));
        }
        out.push('\n');
    }

    out
}

/// Build a report file name for `kind` at time `at`.
pub fn report_file_name<Tz: TimeZone>(kind: ReportKind, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}_{}.txt", kind.prefix(), at.format("%Y%m%d-%H%M%S"))
}

/// Writes rendered reports into a directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `content` as a new timestamped report and return its path.
    pub fn write(&self, kind: ReportKind, content: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(report_file_name(kind, &Local::now()));
        fs::write(&path, content)?;
        tracing::info!(path = %path.display(), "report written");
        Ok(path)
    }
}
