// src/watch/path_utils.rs

//! Path normalization shared by the exclusion set and the tree scanner.
//!
//! Both sides must agree on one spelling of a relative path, otherwise an
//! exclusion written as `./node_modules` would never match the scanner's
//! `node_modules`.

use std::path::{Path, PathBuf};

/// Relative path of the scan root.
pub const ROOT: &str = ".";

/// Normalize a root-relative path string.
///
/// - backslashes become `/`
/// - any number of leading `./` are stripped
/// - trailing `/` are stripped
/// - an empty result (or a bare `.`) is the root, `"."`
///
/// Case is preserved and nothing else is resolved (`..` stays as is).
pub fn normalize_rel(path: &str) -> String {
    let mut s = path.replace('\\', "/");

    while let Some(rest) = s.strip_prefix("./") {
        s = rest.to_string();
    }
    while s.len() > 1 && s.ends_with('/') {
        s.pop();
    }

    if s.is_empty() || s == ROOT {
        ROOT.to_string()
    } else {
        s
    }
}

/// Join a child name onto a normalized relative directory.
pub fn join_rel(parent: &str, name: &str) -> String {
    if parent == ROOT {
        normalize_rel(name)
    } else {
        normalize_rel(&format!("{parent}/{name}"))
    }
}

/// Map a relative watch target back onto a path under `root`.
///
/// The root itself is returned unchanged instead of `root/.`.
pub fn watch_path(root: &Path, rel: &str) -> PathBuf {
    if rel == ROOT {
        root.to_path_buf()
    } else {
        root.join(rel)
    }
}
