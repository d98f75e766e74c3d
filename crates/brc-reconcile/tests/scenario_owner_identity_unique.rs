//! Scenario: owner ids stay unique across any sequence of merges.
//!
//! # Invariants under test
//!
//! 1. Disjoint owners are unioned.
//! 2. Repeated merges of overlapping snapshots never duplicate an id.
//! 3. Merging never drops an owner that only the current dataset holds.

use std::collections::BTreeSet;

use brc_reconcile::*;

fn snapshot(ids: &[OwnerId], tag: &str) -> Dataset {
    Dataset::new(
        tag,
        ids.iter()
            .map(|id| Owner::new(*id, format!("{tag}-{id}"), vec![Entity::new(tag, 1.0)]))
            .collect::<Vec<_>>(),
    )
}

fn assert_unique(d: &Dataset) {
    let ids = d.owner_ids();
    let set: BTreeSet<OwnerId> = ids.iter().copied().collect();
    assert_eq!(ids.len(), set.len(), "duplicate owner id in {ids:?}");
}

#[test]
fn disjoint_owners_are_unioned() {
    let merged = merge_now(Some(&snapshot(&[1], "a")), &snapshot(&[2], "b"));
    assert!(merged.contains_owner(1));
    assert!(merged.contains_owner(2));
    assert_eq!(merged.owner_ids(), vec![1, 2]);
}

#[test]
fn overlapping_merge_sequence_stays_unique() {
    let sequence = [
        snapshot(&[1, 2, 3], "s1"),
        snapshot(&[3, 4], "s2"),
        snapshot(&[2, 5, 1], "s3"),
        snapshot(&[5, 5, 6], "s4"),
        snapshot(&[1], "s5"),
    ];

    let mut current: Option<Dataset> = None;
    for s in &sequence {
        let next = merge_now(current.as_ref(), s);
        assert_unique(&next);
        current = Some(next);
    }

    let d = current.unwrap();
    assert_eq!(d.owner_ids(), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(d.owner(1).unwrap().display_name, "s5-1");
    assert_eq!(d.owner(3).unwrap().display_name, "s2-3");
}

#[test]
fn merge_never_drops_current_only_owners() {
    let current = snapshot(&[10, 20, 30], "cur");
    let merged = merge_now(Some(&current), &snapshot(&[20], "inc"));
    for id in [10, 20, 30] {
        assert!(merged.contains_owner(id), "owner {id} was dropped");
    }
}

#[test]
fn merge_with_empty_snapshot_keeps_owners() {
    let current = snapshot(&[1, 2], "cur");
    let merged = merge_now(Some(&current), &Dataset::new("", Vec::new()));
    assert!(merged.same_owners(&current));
}
