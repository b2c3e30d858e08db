use swatch_test_utils::fake_capability::fake_capability;
use swatch_test_utils::init_tracing;

use std::path::PathBuf;

use swatch::types::ChangeKind;
use swatch::watch::Subscription;

fn paths(items: &[&str]) -> Vec<PathBuf> {
    items.iter().map(PathBuf::from).collect()
}

#[test]
fn subscribes_every_directory_in_order() {
    let (factory, source) = fake_capability(&[]);
    let dirs = paths(&[".", "./dir1", "./dir2", "./dir2/dir21"]);

    let (sub, _streams) = Subscription::open(factory, &dirs).unwrap();

    assert!(sub.is_open());
    assert_eq!(sub.watched(), dirs.as_slice());
    assert_eq!(source.subscribed(), dirs);
}

#[test]
fn failed_directory_is_skipped_not_fatal() {
    init_tracing();

    let (factory, source) = fake_capability(&paths(&["./dir2"]));
    let dirs = paths(&[".", "./dir1", "./dir2", "./dir3"]);

    let (sub, _streams) = Subscription::open(factory, &dirs).unwrap();

    assert_eq!(sub.watched(), paths(&[".", "./dir1", "./dir3"]).as_slice());
    assert_eq!(source.subscribed(), paths(&[".", "./dir1", "./dir3"]));
}

#[test]
fn close_is_idempotent() {
    let (factory, source) = fake_capability(&[]);
    let (mut sub, _streams) = Subscription::open(factory, &paths(&["."])).unwrap();

    sub.close();
    sub.close();
    assert!(!sub.is_open());
    assert_eq!(source.close_count(), 1);

    drop(sub);
    assert_eq!(source.close_count(), 1);
}

#[test]
fn drop_releases_backend() {
    let (factory, source) = fake_capability(&[]);
    {
        let (_sub, _streams) = Subscription::open(factory, &paths(&["."])).unwrap();
        assert_eq!(source.close_count(), 0);
    }
    assert_eq!(source.close_count(), 1);
}

#[tokio::test]
async fn streams_deliver_what_the_backend_sends() {
    let (factory, source) = fake_capability(&[]);
    let (_sub, mut streams) = Subscription::open(factory, &paths(&["."])).unwrap();

    source.send("./a.txt", ChangeKind::Create);
    source.send_error("overflow");

    let ev = streams.events.recv().await.unwrap();
    assert_eq!(ev.path, PathBuf::from("./a.txt"));
    assert_eq!(ev.kind, ChangeKind::Create);
    assert!(streams.errors.recv().await.is_some());
}

mod real_backend {
    use super::*;
    use std::fs;
    use std::time::Duration;

    use swatch::watch::NotifyCapability;

    #[tokio::test]
    async fn reports_a_file_created_in_a_watched_directory() {
        init_tracing();

        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_path_buf();

        let (mut sub, mut streams) =
            Subscription::open(NotifyCapability::create, &[root.clone()]).unwrap();
        assert_eq!(sub.watched(), &[root.clone()]);

        fs::write(root.join("new.txt"), "hello").unwrap();

        let ev = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let ev = streams.events.recv().await.expect("stream open");
                if ev.path.ends_with("new.txt") {
                    break ev;
                }
            }
        })
        .await
        .expect("no event for new.txt");
        assert!(ev.kind.is_content_change());

        sub.close();
        assert!(!sub.is_open());
    }

    #[test]
    fn missing_directory_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("gone");

        let (sub, _streams) =
            Subscription::open(NotifyCapability::create, &[tmp.path().to_path_buf(), missing])
                .unwrap();
        assert_eq!(sub.watched(), &[tmp.path().to_path_buf()]);
    }
}
