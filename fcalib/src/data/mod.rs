//! Data collection: read files and reduce them into results.
//!
//! This module handles the second stage of the pipeline - consuming the
//! walker's candidates and aggregating one mode's result. It provides:
//!
//! - **Reading**: Permissive text decoding that never aborts a scan
//! - **Search**: Literal, non-overlapping term counting (`StringSearchAggregator`)
//! - **Statistics**: Lines, words and characters per file and extension (`StatsAggregator`)
//! - **Names**: Exact and glob matching on base names (`NameMatcher`)
//!
//! Each aggregator is a single-pass reducer. Give each one its own
//! traversal from `Walker::walk`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use fcalib::data::StatsAggregator;
//!
//! let result = StatsAggregator::default().process(walker.walk(".")?);
//! println!("Total lines: {}", result.grand_total.lines);
//! ```

pub mod names;
pub mod reader;
pub mod search;
pub mod stats;

pub use names::{NameMatchResult, NameMatcher, NamePattern};
pub use reader::{decode, ContentReader, Unreadable, DEFAULT_MAX_FILE_SIZE};
pub use search::{count_occurrences, SearchResult, StringSearchAggregator};
pub use stats::{StatsAggregator, StatsResult, TextStats, Totals, NO_EXTENSION};
