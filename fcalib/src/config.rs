//! Persisted configuration and batch input lists.
//!
//! The analyzer keeps a small JSON file (`config.json`) with the extension
//! and directory exclusion lists. Missing or corrupt files fall back to the
//! defaults; only an existing file that cannot be read is an error.

use std::collections::HashSet;
use std::fs;
use std::hash::Hash;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FcaError;
use crate::source::{
    normalize_ext_list, DirectoryFilter, ExtensionRule, FilterConfig, DEFAULT_EXCLUDED_DIRS,
};
use crate::Result;

/// Default file name of the persisted configuration.
pub const CONFIG_FILENAME: &str = "config.json";
/// Default batch file of search strings.
pub const SEARCH_STRINGS_FILENAME: &str = "search-strings.txt";
/// Default batch file of file-name patterns.
pub const FILE_NAMES_FILENAME: &str = "file-names.txt";

/// Persisted analyzer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Directory names to prune; `None` means the built-in defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded_dirs: Option<Vec<String>>,
    /// Extensions to skip
    pub excluded_extensions: Vec<String>,
    /// Extensions to keep exclusively (empty = all)
    pub included_extensions: Vec<String>,
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `path`.
    ///
    /// A missing file yields the defaults. A file that is not valid JSON for
    /// this structure is logged and also yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| FcaError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        match serde_json::from_str::<AnalyzerConfig>(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Ok(config.normalized())
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config, falling back to defaults"
                );
                Ok(Self::default())
            }
        }
    }

    /// Write to `path` as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| FcaError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        fs::write(path, json + "\n")?;
        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Return a copy with extension lists normalized.
    pub fn normalized(mut self) -> Self {
        self.excluded_extensions = normalize_ext_list(&self.excluded_extensions);
        self.included_extensions = normalize_ext_list(&self.included_extensions);
        self
    }

    /// Builder: replace the excluded extensions (normalized).
    pub fn with_excluded_extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded_extensions = normalize_ext_list(exts);
        self
    }

    /// Builder: replace the included extensions (normalized).
    pub fn with_included_extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.included_extensions = normalize_ext_list(exts);
        self
    }

    /// Builder: replace the excluded directory names.
    pub fn with_excluded_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dirs: Vec<String> = dirs.into_iter().map(Into::into).collect();
        dirs.sort();
        dirs.dedup();
        self.excluded_dirs = Some(dirs);
        self
    }

    /// Excluded directory names, with defaults applied.
    pub fn effective_excluded_dirs(&self) -> Vec<String> {
        match &self.excluded_dirs {
            Some(dirs) => dirs.clone(),
            None => DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// Build the immutable filter for a scan, optionally excluding the tool itself.
    pub fn filter_config(&self, self_path: Option<&Path>) -> FilterConfig {
        let filter = FilterConfig::new()
            .extensions(
                ExtensionRule::new()
                    .include(&self.included_extensions)
                    .exclude(&self.excluded_extensions),
            )
            .directories(DirectoryFilter::new().exclude(self.effective_excluded_dirs()));

        match self_path {
            Some(path) => filter.exclude_self(path),
            None => filter,
        }
    }
}

/// Remove duplicates, keeping the first occurrence of each item.
pub fn dedupe_preserving_order<I, T>(items: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Parse a batch list: one entry per line, trimmed, skipping blank lines
/// and `//` comments.
pub fn parse_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("//"))
        .map(String::from)
        .collect()
}

/// Read a batch list file. See [`parse_list`].
pub fn load_list_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| FcaError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_list(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{FileCandidate, FileFilter};
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp = tempdir().unwrap();
        let config = AnalyzerConfig::load(temp.path().join(CONFIG_FILENAME)).unwrap();

        assert_eq!(config, AnalyzerConfig::default());
        assert_eq!(config.effective_excluded_dirs(), vec![".venv", ".vscode"]);
    }

    #[test]
    fn test_load_corrupt_file_gives_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(AnalyzerConfig::load(&path).unwrap(), AnalyzerConfig::default());
    }

    #[test]
    fn test_load_normalizes_and_tolerates_missing_fields() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, r#"{"excluded_extensions": [".LOG", "tmp", "log"]}"#).unwrap();

        let config = AnalyzerConfig::load(&path).unwrap();

        assert_eq!(config.excluded_extensions, vec!["log", "tmp"]);
        assert!(config.included_extensions.is_empty());
        assert_eq!(config.excluded_dirs, None);
    }

    #[test]
    fn test_save_and_load() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested/dir").join(CONFIG_FILENAME);

        let config = AnalyzerConfig::new()
            .with_included_extensions(["PY", ".rs"])
            .with_excluded_dirs(["target", ".git"]);
        config.save(&path).unwrap();

        let loaded = AnalyzerConfig::load(&path).unwrap();
        assert_eq!(loaded.included_extensions, vec!["py", "rs"]);
        assert_eq!(
            loaded.excluded_dirs,
            Some(vec![".git".to_string(), "target".to_string()])
        );
    }

    #[test]
    fn test_empty_excluded_dirs_is_not_defaults() {
        let config = AnalyzerConfig::new().with_excluded_dirs(Vec::<String>::new());
        assert!(config.effective_excluded_dirs().is_empty());
    }

    #[test]
    fn test_filter_config() {
        let config = AnalyzerConfig::new()
            .with_included_extensions(["py", "txt"])
            .with_excluded_extensions(["txt"]);
        let filter = config.filter_config(None);

        assert!(filter.admits(&FileCandidate::new(PathBuf::from("/p/a.py"))));
        assert!(!filter.admits(&FileCandidate::new(PathBuf::from("/p/a.txt"))));
        assert!(!filter.admits_dir(".venv"));
        assert!(filter.self_exclusion.is_none());
    }

    #[test]
    fn test_parse_list() {
        let content = "error\n\n  // a comment\n  warning  \n//another\nerror\n";
        assert_eq!(parse_list(content), vec!["error", "warning", "error"]);
    }

    #[test]
    fn test_load_list_file_missing() {
        let temp = tempdir().unwrap();
        let result = load_list_file(temp.path().join(SEARCH_STRINGS_FILENAME));
        assert!(matches!(result, Err(FcaError::FileRead { .. })));
    }

    #[test]
    fn test_dedupe_preserving_order() {
        assert_eq!(
            dedupe_preserving_order(["b", "a", "b", "c", "a"]),
            vec!["b", "a", "c"]
        );
    }
}
