use std::fmt;
use std::path::PathBuf;

use notify::EventKind;
use notify::event::ModifyKind;
use tokio::time::Instant;

/// Kind of a raw filesystem change, as seen by the coalescer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Create,
    Write,
    Remove,
    Rename,
    PermissionChange,
}

impl ChangeKind {
    /// Map a `notify` event kind onto a change kind.
    ///
    /// Returns `None` for kinds that say nothing about a change (access
    /// events, and the catch-all `Any` / `Other` top-level kinds).
    pub fn from_notify(kind: &EventKind) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(ChangeKind::Create),
            EventKind::Remove(_) => Some(ChangeKind::Remove),
            EventKind::Modify(ModifyKind::Name(_)) => Some(ChangeKind::Rename),
            EventKind::Modify(ModifyKind::Metadata(_)) => Some(ChangeKind::PermissionChange),
            EventKind::Modify(_) => Some(ChangeKind::Write),
            EventKind::Access(_) | EventKind::Any | EventKind::Other => None,
        }
    }

    /// Rename and permission changes never describe new content.
    pub fn is_content_change(self) -> bool {
        !matches!(self, ChangeKind::Rename | ChangeKind::PermissionChange)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeKind::Create => "CREATE",
            ChangeKind::Write => "WRITE",
            ChangeKind::Remove => "REMOVE",
            ChangeKind::Rename => "RENAME",
            ChangeKind::PermissionChange => "CHMOD",
        };
        f.write_str(s)
    }
}

/// A single change reported by the notification capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl RawEvent {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Split a `notify` event into one raw event per path.
    pub fn from_notify(event: notify::Event) -> Vec<RawEvent> {
        let Some(kind) = ChangeKind::from_notify(&event.kind) else {
            return Vec::new();
        };
        event
            .paths
            .into_iter()
            .map(|path| RawEvent { path, kind })
            .collect()
    }
}

/// "Run the command now", carrying the path that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTrigger {
    pub path: PathBuf,
    pub kind: ChangeKind,
    pub at: Instant,
}

impl fmt::Display for DispatchTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.path.display())
    }
}
