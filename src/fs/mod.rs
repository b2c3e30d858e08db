// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

pub mod mock;

/// One child of a directory, as returned by [`FileSystem::read_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Full path of the entry (parent joined with the name).
    pub path: PathBuf,
    /// Whether the entry itself is a directory. Symlinks are never
    /// reported as directories, even when they point at one.
    pub is_dir: bool,
}

impl DirEntry {
    /// Final path component as UTF-8 (lossy).
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Abstract filesystem interface used by the tree scanner.
pub trait FileSystem: Send + Sync + Debug {
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;

    /// Return the entries of a directory, in no particular order.
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).with_context(|| format!("reading dir {:?}", path))? {
            // An entry can vanish between the listing and the stat; its
            // siblings are still listed.
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(dir = ?path, error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) => {
                    warn!(path = ?entry.path(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            entries.push(DirEntry {
                path: entry.path(),
                is_dir: file_type.is_dir(),
            });
        }
        Ok(entries)
    }
}
