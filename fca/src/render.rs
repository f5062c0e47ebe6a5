//! Terminal summaries for each mode.

use std::path::Path;

use console::Style;
use fcalib::{NameMatchResult, SearchResult, StatsResult, Totals, NO_EXTENSION};

const NAME_WIDTH: usize = 40;
const CELL_WIDTH: usize = 12;

/// Truncate a name to fit within max_len, adding ".." prefix if needed
fn truncate_name(name: &str, max_len: usize) -> String {
    let len = name.chars().count();
    if len > max_len {
        let tail: String = name.chars().skip(len - max_len + 2).collect();
        format!("..{tail}")
    } else {
        name.to_string()
    }
}

/// Convert a path to a relative path from the base directory
pub fn make_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| path.to_string_lossy().to_string())
}

fn bold() -> Style {
    Style::new().bold()
}

/// Summary of a string search.
pub fn search_summary(root: &Path, result: &SearchResult) -> String {
    let mut out = String::new();

    if result.per_file_counts.is_empty() {
        out.push_str("No files containing the search strings were found.\n");
    } else {
        out.push_str(&format!("{}\n", bold().apply_to("Files containing one or more search strings:")));
        out.push('\n');
        for (path, counts) in &result.per_file_counts {
            out.push_str(&format!("{}\n", make_relative(path, root)));
            for term in &result.terms {
                if let Some(count) = counts.get(term) {
                    out.push_str(&format!("    {term:?} : {count} occurrence(s)\n"));
                }
            }
        }
        out.push('\n');
    }

    out.push_str(&format!("Total files with matches: {}\n", result.files_with_matches));
    out.push_str(&format!("Total occurrences across all files: {}\n", result.total_occurrences()));
    if result.skipped_files > 0 {
        out.push_str(&format!("Skipped unreadable files: {}\n", result.skipped_files));
    }
    out
}

fn stats_row(label: &str, totals: &Totals) -> String {
    format!(
        "{:<name$}{:>cell$}{:>cell$}{:>cell$}{:>cell$}",
        truncate_name(label, NAME_WIDTH - 2),
        totals.file_count,
        totals.lines,
        totals.words,
        totals.characters,
        name = NAME_WIDTH,
        cell = CELL_WIDTH,
    )
}

/// Per-extension table with a total row.
pub fn stats_summary(result: &StatsResult) -> String {
    let mut out = String::new();

    let header = format!(
        "{:<name$}{:>cell$}{:>cell$}{:>cell$}{:>cell$}",
        "Extension",
        "Files",
        "Lines",
        "Words",
        "Chars",
        name = NAME_WIDTH,
        cell = CELL_WIDTH,
    );
    let separator = "-".repeat(NAME_WIDTH + CELL_WIDTH * 4);

    out.push_str(&format!("{}\n", bold().apply_to(header)));
    out.push_str(&format!("{separator}\n"));
    for (ext, totals) in &result.per_extension_totals {
        let label = if ext == NO_EXTENSION {
            ext.clone()
        } else {
            format!(".{ext}")
        };
        out.push_str(&format!("{}\n", stats_row(&label, totals)));
    }
    out.push_str(&format!("{separator}\n"));
    let total_label = format!("Total ({} files)", result.grand_total.file_count);
    out.push_str(&format!("{}\n", bold().apply_to(stats_row(&total_label, &result.grand_total))));
    if result.skipped_files > 0 {
        out.push_str(&format!("Skipped unreadable files: {}\n", result.skipped_files));
    }
    out
}

/// Matches per pattern.
pub fn names_summary(root: &Path, result: &NameMatchResult) -> String {
    let mut out = String::new();

    for pattern in &result.patterns {
        out.push_str(&format!("{}\n", bold().apply_to(format!("Pattern: {pattern}"))));
        match result.per_pattern_matches.get(pattern) {
            Some(paths) if !paths.is_empty() => {
                for path in paths {
                    out.push_str(&format!("  {}\n", make_relative(path, root)));
                }
            }
            _ => {
                out.push_str("  (no matches)\n");
            }
        }
    }
    for (pattern, message) in &result.invalid_patterns {
        out.push_str(&format!("Invalid pattern {pattern:?}: {message}\n"));
    }

    out.push('\n');
    out.push_str(&format!(
        "Patterns with matches: {} / {}\n",
        result.patterns_with_matches(),
        result.patterns.len()
    ));
    out.push_str(&format!("Total matching files: {}\n", result.total_matches()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("short", 10), "short");
        assert_eq!(truncate_name("abcdefghijkl", 6), "..ijkl");
    }

    #[test]
    fn test_make_relative() {
        let base = Path::new("/root/project");
        assert_eq!(make_relative(Path::new("/root/project/src/a.rs"), base), "src/a.rs");
        assert_eq!(make_relative(Path::new("/elsewhere/b.rs"), base), "/elsewhere/b.rs");
    }

    #[test]
    fn test_search_summary_lines() {
        let mut counts = std::collections::BTreeMap::new();
        counts.insert("error".to_string(), 2);
        let mut result = SearchResult {
            terms: vec!["error".into()],
            files_with_matches: 1,
            ..Default::default()
        };
        result.per_file_counts.insert(PathBuf::from("/r/src/a.txt"), counts);
        result.totals.insert("error".into(), 2);

        let text = search_summary(Path::new("/r"), &result);

        assert!(text.contains("\nsrc/a.txt\n    \"error\" : 2 occurrence(s)\n"));
        assert!(text.ends_with("Total occurrences across all files: 2\n"));
    }

    #[test]
    fn test_names_summary_lists_empty_patterns() {
        let mut result = NameMatchResult {
            patterns: vec!["*.md".into()],
            ..Default::default()
        };
        result.per_pattern_matches.insert("*.md".into(), vec![]);

        let text = names_summary(&PathBuf::from("/r"), &result);
        assert!(text.contains("(no matches)"));
        assert!(text.contains("Patterns with matches: 0 / 1"));
    }
}
