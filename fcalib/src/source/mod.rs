//! Source discovery: find files to analyze.
//!
//! This module handles the first stage of the pipeline - discovering what
//! files to analyze. It provides:
//!
//! - **Extension rules**: Include-only and exclude lists over normalized extensions
//! - **Filters**: Directory pruning by name and self-exclusion of the running tool
//! - **Walker**: A restartable, lazy, depth-first traversal yielding `FileCandidate`s
//!
//! ## Example
//!
//! ```rust,ignore
//! use fcalib::source::{DirectoryFilter, ExtensionRule, FilterConfig, Walker};
//!
//! let filter = FilterConfig::new()
//!     .extensions(ExtensionRule::new().exclude(["lock"]))
//!     .directories(DirectoryFilter::with_defaults());
//! let walker = Walker::new(filter);
//! for candidate in walker.walk(".")? {
//!     println!("{}", candidate.path.display());
//! }
//! ```

pub mod extension;
pub mod filter;
pub mod walker;

pub use extension::{extension_of, extension_of_name, normalize_ext, normalize_ext_list, ExtensionRule};
pub use filter::{DirectoryFilter, FileFilter, FilterConfig, SelfExclusion, DEFAULT_EXCLUDED_DIRS};
pub use walker::{FileCandidate, Walk, Walker};
