// src/fs/mock.rs

use super::{DirEntry, FileSystem};
use anyhow::{anyhow, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::warn;

#[derive(Debug, Clone)]
pub enum MockEntry {
    File,
    Dir(Vec<String>), // List of child names
}

/// In-memory tree for scanner tests.
///
/// Paths are keyed without `.` components, so `./a/b`, `a/./b` and `a/b`
/// all address the same entry. The root is `.`.
#[derive(Debug, Clone)]
pub struct MockFileSystem {
    entries: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
    denied: Arc<Mutex<HashSet<PathBuf>>>,
    broken: Arc<Mutex<HashSet<PathBuf>>>,
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        entries.insert(PathBuf::from("."), MockEntry::Dir(Vec::new()));

        Self {
            entries: Arc::new(Mutex::new(entries)),
            denied: Arc::new(Mutex::new(HashSet::new())),
            broken: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Add a file, creating its parent directories implicitly.
    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = key(path.as_ref());
        let mut entries = self.entries.lock().unwrap();
        let parent = parent_key(&path);
        ensure_dir(&mut entries, &parent);
        link_child(&mut entries, &parent, &path);
        entries.insert(path, MockEntry::File);
    }

    /// Add an (empty) directory, creating its parents implicitly.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = key(path.as_ref());
        let mut entries = self.entries.lock().unwrap();
        ensure_dir(&mut entries, &path);
    }

    /// Make `read_dir` on this directory fail, as if permission was denied.
    pub fn deny(&self, path: impl AsRef<Path>) {
        self.denied.lock().unwrap().insert(key(path.as_ref()));
    }

    /// Make this entry unreadable while listing its parent, as if it
    /// vanished between the listing and the stat. It is skipped like
    /// `RealFileSystem` skips such entries.
    pub fn break_entry(&self, path: impl AsRef<Path>) {
        self.broken.lock().unwrap().insert(key(path.as_ref()));
    }
}

fn key(path: &Path) -> PathBuf {
    let cleaned: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

fn parent_key(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn ensure_dir(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
    if entries.contains_key(path) {
        return;
    }
    entries.insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));

    let parent = parent_key(path);
    if parent.as_path() != path {
        ensure_dir(entries, &parent);
        link_child(entries, &parent, path);
    }
}

fn link_child(entries: &mut HashMap<PathBuf, MockEntry>, parent: &Path, child: &Path) {
    if let Some(MockEntry::Dir(children)) = entries.get_mut(parent) {
        if let Some(name) = child.file_name().and_then(|n| n.to_str()) {
            if !children.iter().any(|c| c == name) {
                children.push(name.to_string());
            }
        }
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let entries = self.entries.lock().unwrap();
        entries.contains_key(&key(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let entries = self.entries.lock().unwrap();
        matches!(entries.get(&key(path)), Some(MockEntry::Dir(_)))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let k = key(path);
        if self.denied.lock().unwrap().contains(&k) {
            return Err(anyhow!("permission denied: {:?}", path));
        }

        let broken = self.broken.lock().unwrap();
        let entries = self.entries.lock().unwrap();
        match entries.get(&k) {
            Some(MockEntry::Dir(children)) => Ok(children
                .iter()
                .filter_map(|name| {
                    let child = if k.as_path() == Path::new(".") {
                        PathBuf::from(name)
                    } else {
                        k.join(name)
                    };
                    if broken.contains(&child) {
                        warn!(path = ?path.join(name), "skipping unreadable entry");
                        return None;
                    }
                    let is_dir = matches!(entries.get(&child), Some(MockEntry::Dir(_)));
                    Some(DirEntry {
                        path: path.join(name),
                        is_dir,
                    })
                })
                .collect()),
            _ => Err(anyhow!("Not a directory or not found: {:?}", path)),
        }
    }
}
