//! Extension derivation and include/exclude evaluation.
//!
//! Extensions are always compared in normalized form: lower-case, no leading
//! dot. Only the final dot-separated segment of a file name is the extension,
//! so `app.min.js` has extension `js`. Files without an extension are
//! represented by the empty string.

use std::collections::BTreeSet;
use std::path::Path;

/// Normalize one user-supplied extension: trim, strip one leading dot, lower-case.
pub fn normalize_ext(value: &str) -> String {
    let trimmed = value.trim();
    trimmed
        .strip_prefix('.')
        .unwrap_or(trimmed)
        .to_lowercase()
}

/// Normalize a list of extensions into a sorted, de-duplicated list.
///
/// Empty and whitespace-only entries are dropped.
///
/// ```rust
/// use fcalib::normalize_ext_list;
///
/// let exts = normalize_ext_list([".Py", " txt ", "JS", "", "js"]);
/// assert_eq!(exts, vec!["js", "py", "txt"]);
/// ```
pub fn normalize_ext_list<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .filter(|v| !v.as_ref().trim().is_empty())
        .map(|v| normalize_ext(v.as_ref()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Derive the normalized extension of a file name.
///
/// Returns the lower-cased text after the final `.`, or an empty string when
/// the name has no dot or its only dot is the leading character (`.bashrc`).
pub fn extension_of_name(name: &str) -> String {
    match name.rfind('.') {
        Some(0) | None => String::new(),
        Some(idx) => name[idx + 1..].to_lowercase(),
    }
}

/// Derive the normalized extension from a path's final component.
pub fn extension_of(path: &Path) -> String {
    path.file_name()
        .map(|name| extension_of_name(&name.to_string_lossy()))
        .unwrap_or_default()
}

/// Include/exclude rule over normalized extensions.
///
/// An empty include set allows every extension. The exclude set is always
/// applied after inclusion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionRule {
    included: BTreeSet<String>,
    excluded: BTreeSet<String>,
}

impl ExtensionRule {
    /// Create a rule that allows everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add extensions to the include-only set.
    ///
    /// Values are normalized. Pass `""` to include extensionless files.
    pub fn include<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.included
            .extend(exts.into_iter().map(|e| normalize_ext(e.as_ref())));
        self
    }

    /// Builder: add extensions to the exclude set.
    ///
    /// Values are normalized. Pass `""` to exclude extensionless files.
    pub fn exclude<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded
            .extend(exts.into_iter().map(|e| normalize_ext(e.as_ref())));
        self
    }

    /// Included extensions (empty means all).
    pub fn included(&self) -> &BTreeSet<String> {
        &self.included
    }

    /// Excluded extensions.
    pub fn excluded(&self) -> &BTreeSet<String> {
        &self.excluded
    }

    /// Check whether a normalized extension passes the rule.
    pub fn is_allowed(&self, extension: &str) -> bool {
        if !self.included.is_empty() && !self.included.contains(extension) {
            return false;
        }
        !self.excluded.contains(extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_ext_list() {
        assert_eq!(
            normalize_ext_list([".Py", " txt ", "JS", "", "js"]),
            vec!["js", "py", "txt"]
        );
    }

    #[test]
    fn test_extension_of_name() {
        assert_eq!(extension_of_name("main.RS"), "rs");
        assert_eq!(extension_of_name("app.min.js"), "js");
        assert_eq!(extension_of_name("Makefile"), "");
        assert_eq!(extension_of_name(".bashrc"), "");
        assert_eq!(extension_of_name(".config.toml"), "toml");
        assert_eq!(extension_of_name("trailing."), "");
    }

    #[test]
    fn test_extension_of_path_uses_file_name_only() {
        assert_eq!(extension_of(Path::new("dir.d/Makefile")), "");
        assert_eq!(extension_of(Path::new("src/lib.rs")), "rs");
    }

    #[test]
    fn test_empty_rule_allows_all() {
        let rule = ExtensionRule::new();
        assert!(rule.is_allowed("rs"));
        assert!(rule.is_allowed(""));
    }

    #[test]
    fn test_exclude_rejects() {
        let rule = ExtensionRule::new().exclude([".JS"]);
        assert!(!rule.is_allowed("js"));
        assert!(rule.is_allowed("py"));
    }

    #[test]
    fn test_include_only() {
        let rule = ExtensionRule::new().include(["py"]);
        assert!(rule.is_allowed("py"));
        assert!(!rule.is_allowed("txt"));
        assert!(!rule.is_allowed(""));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let rule = ExtensionRule::new().include(["py", "txt"]).exclude(["txt"]);
        assert!(rule.is_allowed("py"));
        assert!(!rule.is_allowed("txt"));
    }

    #[test]
    fn test_extensionless_files() {
        assert!(!ExtensionRule::new().exclude([""]).is_allowed(""));
        assert!(ExtensionRule::new().include(["", "md"]).is_allowed(""));
    }

    proptest! {
        #[test]
        fn empty_include_allows_unless_excluded(
            excluded in proptest::collection::vec("[a-z]{0,4}", 0..5),
            ext in "[a-z]{0,4}",
        ) {
            let rule = ExtensionRule::new().exclude(&excluded);
            prop_assert_eq!(rule.is_allowed(&ext), !excluded.contains(&ext));
        }

        #[test]
        fn non_empty_include_rejects_outsiders(
            included in proptest::collection::vec("[a-z]{1,4}", 1..5),
            excluded in proptest::collection::vec("[a-z]{0,4}", 0..5),
            ext in "[a-z]{0,4}",
        ) {
            let rule = ExtensionRule::new().include(&included).exclude(&excluded);
            if !included.contains(&ext) {
                prop_assert!(!rule.is_allowed(&ext));
            }
        }
    }
}
