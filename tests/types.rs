use std::path::PathBuf;

use notify::event::{
    AccessKind, CreateKind, DataChange, MetadataKind, ModifyKind, RemoveKind, RenameMode,
};
use notify::{Event, EventKind};

use swatch::types::{ChangeKind, RawEvent};

#[test]
fn notify_kinds_map_onto_change_kinds() {
    let cases = [
        (EventKind::Create(CreateKind::File), Some(ChangeKind::Create)),
        (EventKind::Remove(RemoveKind::Folder), Some(ChangeKind::Remove)),
        (
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            Some(ChangeKind::Write),
        ),
        (EventKind::Modify(ModifyKind::Any), Some(ChangeKind::Write)),
        (
            EventKind::Modify(ModifyKind::Name(RenameMode::From)),
            Some(ChangeKind::Rename),
        ),
        (
            EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions)),
            Some(ChangeKind::PermissionChange),
        ),
        (EventKind::Access(AccessKind::Read), None),
        (EventKind::Any, None),
        (EventKind::Other, None),
    ];

    for (kind, want) in cases {
        assert_eq!(ChangeKind::from_notify(&kind), want, "{kind:?}");
    }
}

#[test]
fn only_rename_and_chmod_are_not_content_changes() {
    assert!(ChangeKind::Create.is_content_change());
    assert!(ChangeKind::Write.is_content_change());
    assert!(ChangeKind::Remove.is_content_change());
    assert!(!ChangeKind::Rename.is_content_change());
    assert!(!ChangeKind::PermissionChange.is_content_change());
}

#[test]
fn event_with_several_paths_becomes_several_raw_events() {
    let event = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
        .add_path(PathBuf::from("old.txt"))
        .add_path(PathBuf::from("new.txt"));

    let raw = RawEvent::from_notify(event);
    assert_eq!(
        raw,
        vec![
            RawEvent::new("old.txt", ChangeKind::Rename),
            RawEvent::new("new.txt", ChangeKind::Rename),
        ]
    );
}

#[test]
fn access_events_are_dropped_entirely() {
    let event = Event::new(EventKind::Access(AccessKind::Any)).add_path(PathBuf::from("a"));
    assert!(RawEvent::from_notify(event).is_empty());
}

#[test]
fn display_labels() {
    let labels: Vec<String> = [
        ChangeKind::Create,
        ChangeKind::Write,
        ChangeKind::Remove,
        ChangeKind::Rename,
        ChangeKind::PermissionChange,
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    assert_eq!(labels, vec!["CREATE", "WRITE", "REMOVE", "RENAME", "CHMOD"]);
}
