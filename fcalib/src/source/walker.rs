//! Recursive file discovery.
//!
//! [`Walker::walk`] starts a fresh depth-first traversal on every call and
//! returns a lazy [`Walk`] iterator. Entries are visited in file-name order,
//! so the sequence is deterministic for a fixed filesystem state.

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::{DirEntry, WalkDir};

use crate::error::FcaError;
use crate::Result;

use super::extension::extension_of;
use super::filter::{FileFilter, FilterConfig};

/// A file that survived directory pruning and file filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileCandidate {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Normalized extension, empty for extensionless files
    pub extension: String,
}

impl FileCandidate {
    pub fn new(path: PathBuf) -> Self {
        let extension = extension_of(&path);
        Self { path, extension }
    }

    /// Base name of the file.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Produces traversals of a directory tree under a fixed [`FilterConfig`].
#[derive(Debug, Clone, Default)]
pub struct Walker {
    filter: FilterConfig,
}

impl Walker {
    pub fn new(filter: FilterConfig) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    /// Start a traversal of `root`.
    ///
    /// The root must be an existing directory; this is checked before any
    /// entry is read. Yielded paths are absolute.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fcalib::{FilterConfig, Walker};
    /// use std::fs;
    /// use tempfile::tempdir;
    ///
    /// let dir = tempdir().unwrap();
    /// fs::write(dir.path().join("a.txt"), "hello").unwrap();
    /// fs::create_dir(dir.path().join(".venv")).unwrap();
    /// fs::write(dir.path().join(".venv/b.txt"), "hidden").unwrap();
    ///
    /// let walker = Walker::new(FilterConfig::default().directories(
    ///     fcalib::DirectoryFilter::with_defaults(),
    /// ));
    /// let names: Vec<String> = walker
    ///     .walk(dir.path())
    ///     .unwrap()
    ///     .map(|c| c.file_name())
    ///     .collect();
    /// assert_eq!(names, vec!["a.txt"]);
    /// ```
    pub fn walk(&self, root: impl AsRef<Path>) -> Result<Walk<'_>> {
        let root = root.as_ref();

        if !root.exists() {
            return Err(FcaError::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(FcaError::NotADirectory(root.to_path_buf()));
        }
        let root = root.canonicalize()?;

        let inner = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        Ok(Walk {
            inner,
            filter: &self.filter,
            skipped_dirs: Vec::new(),
        })
    }
}

/// A single lazy traversal. Not resumable once dropped.
pub struct Walk<'a> {
    inner: walkdir::IntoIter,
    filter: &'a FilterConfig,
    skipped_dirs: Vec<PathBuf>,
}

impl Walk<'_> {
    /// Directories that could not be listed so far.
    pub fn skipped_dirs(&self) -> &[PathBuf] {
        &self.skipped_dirs
    }

    fn admit_file(&self, entry: &DirEntry) -> Option<FileCandidate> {
        let candidate = FileCandidate::new(entry.path().to_path_buf());
        if self.filter.admits(&candidate) {
            Some(candidate)
        } else {
            tracing::trace!(path = %entry.path().display(), "filtered out");
            None
        }
    }
}

impl Iterator for Walk<'_> {
    type Item = FileCandidate;

    fn next(&mut self) -> Option<FileCandidate> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                    tracing::warn!(path = %path.display(), error = %err, "skipping unlistable directory");
                    self.skipped_dirs.push(path);
                    continue;
                }
            };

            if entry.depth() == 0 {
                continue;
            }

            let file_type = entry.file_type();

            if file_type.is_dir() {
                let name = entry.file_name().to_string_lossy();
                if !self.filter.admits_dir(&name) {
                    tracing::debug!(path = %entry.path().display(), "pruning excluded directory");
                    self.inner.skip_current_dir();
                }
                continue;
            }

            if file_type.is_symlink() {
                // Directory links are never followed; file links count as files.
                match std::fs::metadata(entry.path()) {
                    Ok(meta) if meta.is_file() => {}
                    _ => continue,
                }
            } else if !file_type.is_file() {
                continue;
            }

            if let Some(candidate) = self.admit_file(&entry) {
                return Some(candidate);
            }
        }
    }
}
