//! Scenario: session persists after every mutation
//!
//! GREEN when:
//! - An import is visible to a fresh session opened on the same file.
//! - Re-importing a known owner replaces it without reordering.
//! - Removing an unknown owner reports UnknownOwner and leaves the file alone.
//! - Removing the last owner deletes the file; the next open is absent.
//! - A malformed snapshot is rejected with nothing written.

use brc_reconcile::{Dataset, Entity, Owner};
use brc_store::{DatasetStore, RemoveOutcome, Session};
use chrono::{TimeZone, Utc};

fn snapshot(owners: Vec<Owner>) -> Dataset {
    Dataset::new("2026-03-01 12:00:00", owners)
}

#[test]
fn import_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    let mut s = Session::open(DatasetStore::new(&path)).unwrap();
    assert!(s.dataset().is_none());

    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();
    let report = s
        .import_at(
            &snapshot(vec![
                Owner::new(1, "alice", vec![Entity::new("Los Candies", 5.0)]),
                Owner::new(2, "bob", vec![Entity::new("Las Sis", 1.0)]),
            ]),
            now,
        )
        .unwrap();
    assert_eq!(report.added, vec![1, 2]);
    assert!(path.exists());

    let reopened = Session::open(DatasetStore::new(&path)).unwrap();
    let d = reopened.dataset().expect("persisted");
    assert_eq!(d.owner_ids(), vec![1, 2]);
    assert_eq!(d.last_update(), "2026-03-01 12:30:00");
    assert_eq!(reopened.dataset(), s.dataset());
}

#[test]
fn reimport_replaces_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = Session::open(DatasetStore::new(dir.path().join("data.json"))).unwrap();

    s.import(&snapshot(vec![
        Owner::new(1, "alice", vec![Entity::new("A", 1.0)]),
        Owner::new(2, "bob", vec![Entity::new("B", 1.0)]),
    ]))
    .unwrap();
    let report = s
        .import(&snapshot(vec![Owner::new(1, "alice2", vec![])]))
        .unwrap();

    assert_eq!(report.replaced, vec![1]);
    assert_eq!(report.retained, vec![2]);

    let d = s.dataset().unwrap();
    assert_eq!(d.owner_ids(), vec![1, 2]);
    assert_eq!(d.owner(1).unwrap().display_name, "alice2");
    assert!(d.owner(1).unwrap().entities.is_empty());
}

#[test]
fn remove_unknown_then_last_owner() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let mut s = Session::open(DatasetStore::new(&path)).unwrap();

    assert_eq!(s.remove_owner(9).unwrap(), RemoveOutcome::UnknownOwner);
    assert!(!path.exists());

    s.import(&snapshot(vec![Owner::new(1, "alice", vec![])])).unwrap();
    let before = std::fs::read_to_string(&path).unwrap();
    assert_eq!(s.remove_owner(9).unwrap(), RemoveOutcome::UnknownOwner);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);

    assert_eq!(s.remove_owner(1).unwrap(), RemoveOutcome::Removed);
    assert!(s.dataset().is_none());
    assert!(!path.exists());

    let reopened = Session::open(DatasetStore::new(&path)).unwrap();
    assert!(reopened.dataset().is_none());
}

#[test]
fn clear_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let mut s = Session::open(DatasetStore::new(&path)).unwrap();

    s.import(&snapshot(vec![Owner::new(1, "alice", vec![])])).unwrap();
    s.clear().unwrap();

    assert!(s.dataset().is_none());
    assert!(!path.exists());
}

#[test]
fn malformed_json_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let mut s = Session::open(DatasetStore::new(&path)).unwrap();

    s.import_json(r#"{"players":[{"userId":1,"username":"a","animals":[]}]}"#)
        .unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    let err = s
        .import_json(r#"{"players":[{"username":"no id"}]}"#)
        .unwrap_err();
    assert!(format!("{err:#}").contains("malformed snapshot"));

    assert_eq!(s.dataset().unwrap().owner_ids(), vec![1]);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}
