// src/watch/scanner.rs

//! Recursive enumeration of the directories to watch.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::errors::{Result, SwatchError};
use crate::fs::{DirEntry, FileSystem};
use crate::watch::exclusions::ExclusionSet;
use crate::watch::path_utils::{join_rel, watch_path, ROOT};

/// Walk the tree under `root` and return every directory to watch, as
/// root-relative paths.
///
/// The traversal is pre-order depth-first with siblings in byte order of
/// their names, so the same tree always yields the same list. The root
/// (`"."`) is always first. An excluded entry prunes its whole subtree.
///
/// Only a root that cannot be traversed at all is an error. A directory
/// below the root that cannot be read is logged and its children are
/// skipped; the directory itself stays in the result.
pub fn scan(fs: &dyn FileSystem, root: &Path, exclusions: &ExclusionSet) -> Result<Vec<String>> {
    if !fs.is_dir(root) {
        let reason = if fs.exists(root) {
            "not a directory"
        } else {
            "no such directory"
        };
        return Err(SwatchError::ScanRoot {
            root: root.to_path_buf(),
            reason: reason.to_string(),
        });
    }

    let top = fs.read_dir(root).map_err(|e| SwatchError::ScanRoot {
        root: root.to_path_buf(),
        reason: format!("{e:#}"),
    })?;

    info!(dir = ROOT, "watching");
    let mut dirs = vec![ROOT.to_string()];

    // Explicit stack of pending entries; children are pushed in reverse
    // so the smallest name is popped first.
    let mut stack: Vec<(String, bool)> = Vec::new();
    push_children(&mut stack, ROOT, top);

    while let Some((rel, is_dir)) = stack.pop() {
        if exclusions.contains(&rel) {
            info!(dir = %rel, "not watching");
            continue;
        }
        if !is_dir {
            continue;
        }

        info!(dir = %rel, "watching");
        dirs.push(rel.clone());

        match fs.read_dir(&watch_path(root, &rel)) {
            Ok(children) => push_children(&mut stack, &rel, children),
            Err(err) => {
                warn!(dir = %rel, error = %format!("{err:#}"), "subtree will not be watched");
            }
        }
    }

    debug!(count = dirs.len(), "scan complete");
    Ok(dirs)
}

fn push_children(stack: &mut Vec<(String, bool)>, parent: &str, children: Vec<DirEntry>) {
    let mut named: Vec<(String, bool)> = children
        .into_iter()
        .map(|entry| (entry.name(), entry.is_dir))
        .filter(|(name, _)| !name.is_empty())
        .collect();
    named.sort_by(|a, b| a.0.cmp(&b.0));

    for (name, is_dir) in named.into_iter().rev() {
        stack.push((join_rel(parent, &name), is_dir));
    }
}
