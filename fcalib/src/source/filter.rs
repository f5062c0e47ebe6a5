//! Traversal filters.
//!
//! A [`FilterConfig`] bundles everything the walker consults while it
//! descends: the [`DirectoryFilter`] that prunes subtrees by name, and the
//! file-level predicates (the [`ExtensionRule`] and an optional
//! [`SelfExclusion`]). It is built once per run and never mutated.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::extension::ExtensionRule;
use super::walker::FileCandidate;

/// Directory names skipped when no configuration says otherwise.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".venv", ".vscode"];

/// A predicate over files yielded by the walker.
pub trait FileFilter {
    /// Return true if the candidate should be yielded.
    fn admits(&self, candidate: &FileCandidate) -> bool;
}

impl FileFilter for ExtensionRule {
    fn admits(&self, candidate: &FileCandidate) -> bool {
        self.is_allowed(&candidate.extension)
    }
}

/// Excludes directories by exact, case-sensitive base name.
///
/// Matching is per path segment, so `.venv` is pruned at any depth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryFilter {
    names: BTreeSet<String>,
}

impl DirectoryFilter {
    /// Create a filter that excludes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter with the built-in defaults (`.venv`, `.vscode`).
    pub fn with_defaults() -> Self {
        Self::new().exclude(DEFAULT_EXCLUDED_DIRS.iter().copied())
    }

    /// Builder: add directory names to exclude.
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Excluded directory names.
    pub fn names(&self) -> &BTreeSet<String> {
        &self.names
    }

    pub fn is_excluded(&self, directory_name: &str) -> bool {
        self.names.contains(directory_name)
    }
}

/// Excludes one specific file, the running tool itself.
///
/// Comparison is by resolved absolute path. A regular file is only resolved
/// when its base name already matches; symlinks are always resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfExclusion {
    path: PathBuf,
}

impl SelfExclusion {
    /// Resolve `path` and exclude it. Unresolvable paths are kept as given.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileFilter for SelfExclusion {
    fn admits(&self, candidate: &FileCandidate) -> bool {
        let is_link = fs::symlink_metadata(&candidate.path)
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false);
        if !is_link && candidate.path.file_name() != self.path.file_name() {
            return true;
        }
        let resolved = candidate
            .path
            .canonicalize()
            .unwrap_or_else(|_| candidate.path.clone());
        resolved != self.path
    }
}

/// Immutable filter state for one scan.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include/exclude extension rule
    pub extensions: ExtensionRule,
    /// Directory names pruned during traversal
    pub directories: DirectoryFilter,
    /// The running tool, never yielded
    pub self_exclusion: Option<SelfExclusion>,
}

impl FilterConfig {
    /// Create a config that admits every file and prunes no directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extension rule.
    pub fn extensions(mut self, rule: ExtensionRule) -> Self {
        self.extensions = rule;
        self
    }

    /// Set the directory filter.
    pub fn directories(mut self, filter: DirectoryFilter) -> Self {
        self.directories = filter;
        self
    }

    /// Exclude the file at `path` (normally `std::env::current_exe()`).
    pub fn exclude_self(mut self, path: impl AsRef<Path>) -> Self {
        self.self_exclusion = Some(SelfExclusion::new(path));
        self
    }

    /// Check whether a directory with this base name should be descended into.
    pub fn admits_dir(&self, name: &str) -> bool {
        !self.directories.is_excluded(name)
    }

    fn file_filters(&self) -> impl Iterator<Item = &dyn FileFilter> {
        std::iter::once(&self.extensions as &dyn FileFilter)
            .chain(self.self_exclusion.iter().map(|s| s as &dyn FileFilter))
    }
}

impl FileFilter for FilterConfig {
    fn admits(&self, candidate: &FileCandidate) -> bool {
        self.file_filters().all(|f| f.admits(candidate))
    }
}
