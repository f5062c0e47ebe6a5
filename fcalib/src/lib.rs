//! # fcalib
//!
//! The analysis engine behind the File Content Analyzer: walk a directory
//! tree with extension and directory exclusion rules, then reduce the files
//! found in one of three modes.
//!
//! ## Overview
//!
//! The library is organized as a pipeline:
//!
//! - **source**: Filters and the `Walker`, a lazy, restartable traversal
//! - **data**: Content reading and the three aggregators
//!   - **String search**: per-file and total counts of literal search terms
//!   - **Statistics**: lines, words and characters per file and per extension
//!   - **Name matching**: base names against exact names or glob patterns
//! - **output**: Plain-text, timestamped reports
//!
//! `config` holds the persisted extension/directory lists and the batch
//! input files (`search-strings.txt`, `file-names.txt`).
//!
//! ## Error model
//!
//! Only configuration problems abort a run (for example a root directory
//! that does not exist). Unlistable directories, unreadable files and
//! malformed glob patterns are skipped and recorded in the result.
//!
//! ## Example
//!
//! ```rust
//! use fcalib::{DirectoryFilter, FilterConfig, StatsAggregator, StringSearchAggregator, Walker};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("a.txt"), "error error\n").unwrap();
//! fs::create_dir(dir.path().join(".venv")).unwrap();
//! fs::write(dir.path().join(".venv/b.txt"), "error\n").unwrap();
//!
//! let walker = Walker::new(FilterConfig::new().directories(DirectoryFilter::with_defaults()));
//!
//! let search = StringSearchAggregator::default()
//!     .process(walker.walk(dir.path()).unwrap(), &["ERROR"], false);
//! assert_eq!(search.totals["ERROR"], 2);
//! assert_eq!(search.files_with_matches, 1);
//!
//! let stats = StatsAggregator::default().process(walker.walk(dir.path()).unwrap());
//! assert_eq!(stats.grand_total.lines, 1);
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod output;
pub mod source;

pub use config::{
    dedupe_preserving_order, load_list_file, parse_list, AnalyzerConfig, CONFIG_FILENAME,
    FILE_NAMES_FILENAME, SEARCH_STRINGS_FILENAME,
};
pub use data::{
    count_occurrences, ContentReader, NameMatchResult, NameMatcher, NamePattern, SearchResult,
    StatsAggregator, StatsResult, StringSearchAggregator, TextStats, Totals, Unreadable,
    NO_EXTENSION,
};
pub use error::FcaError;
pub use output::{
    render_names_report, render_search_report, render_stats_report, ReportKind, ReportWriter,
    PROGRAM_NAME, PROGRAM_VERSION, RESULTS_DIRNAME,
};
pub use source::{
    extension_of, normalize_ext_list, DirectoryFilter, ExtensionRule, FileCandidate, FileFilter,
    FilterConfig, SelfExclusion, Walk, Walker, DEFAULT_EXCLUDED_DIRS,
};

/// Result type for fcalib operations
pub type Result<T> = std::result::Result<T, FcaError>;
