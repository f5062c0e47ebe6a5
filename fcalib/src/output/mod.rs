//! Output formatting: present results as reports.
//!
//! This module handles the final stage of the pipeline - turning result
//! structures into human-readable, timestamped text reports. It provides:
//!
//! - **Rendering**: Pure `render_*` functions per analysis mode
//! - **ReportWriter**: Stores a rendered report under `<prefix>_<timestamp>.txt`
//!
//! Nothing here computes statistics; it only formats already-aggregated data.
//!
//! ## Example
//!
//! ```rust,ignore
//! use fcalib::output::{render_stats_report, ReportKind, ReportWriter};
//!
//! let text = render_stats_report(&root, &result);
//! let path = ReportWriter::new("analysis-results").write(ReportKind::FileStats, &text)?;
//! ```

pub mod report;

pub use report::{
    render_names_report, render_search_report, render_stats_report, report_file_name,
    ReportKind, ReportWriter, PROGRAM_NAME, PROGRAM_VERSION, RESULTS_DIRNAME,
};
