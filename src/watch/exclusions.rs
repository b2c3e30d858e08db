// src/watch/exclusions.rs

use std::collections::BTreeSet;

use crate::watch::path_utils::normalize_rel;

/// Directories excluded when nothing else is configured.
pub const DEFAULT_EXCLUDES: [&str; 2] = [".git", "node_modules"];

/// Set of root-relative paths whose subtrees are never scanned or watched.
///
/// Entries are stored in the form produced by [`normalize_rel`]; lookups
/// normalize the probe the same way, so `./dist`, `dist/` and `dist` are one
/// entry. Matching is exact and case-sensitive: excluding `dist` does not
/// exclude `src/dist`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    paths: BTreeSet<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in `.git` / `node_modules` exclusions.
    pub fn with_defaults() -> Self {
        DEFAULT_EXCLUDES.iter().collect()
    }

    /// Insert a path. No-op if it is already present.
    pub fn add(&mut self, path: impl AsRef<str>) {
        self.paths.insert(normalize_rel(path.as_ref()));
    }

    pub fn contains(&self, path: impl AsRef<str>) -> bool {
        self.paths.contains(&normalize_rel(path.as_ref()))
    }

    /// Add every item of a comma-separated list such as `"a,./b, c"`.
    ///
    /// Items are trimmed; empty items are skipped.
    pub fn extend_from_list(&mut self, list: &str) {
        for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            self.add(item);
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Entries in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = ExclusionSet::new();
        for path in iter {
            set.add(path);
        }
        set
    }
}

impl<S: AsRef<str>> Extend<S> for ExclusionSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for path in iter {
            self.add(path);
        }
    }
}
