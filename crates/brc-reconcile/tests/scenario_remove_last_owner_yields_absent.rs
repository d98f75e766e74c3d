//! Scenario: removal and clear collapse an empty dataset to the absent state.

use brc_reconcile::*;

fn one(id: OwnerId) -> Owner {
    Owner::new(id, "p", vec![Entity::new("Ketupat Kepat", 2.0)])
}

#[test]
fn removing_the_only_owner_returns_absent() {
    let d = Dataset::new("t", vec![one(1)]);
    assert!(remove_owner(&d, 1).is_none());
}

#[test]
fn removing_one_of_many_keeps_the_rest_in_order() {
    let d = Dataset::new("t", vec![one(1), one(2), one(3)]);
    let after = remove_owner(&d, 2).expect("two owners remain");
    assert_eq!(after.owner_ids(), vec![1, 3]);
    assert_eq!(d.len(), 3, "input dataset must be unchanged");
}

#[test]
fn removing_unknown_owner_is_not_an_error() {
    let d = Dataset::new("t", vec![one(1)]);
    let after = remove_owner(&d, 404).expect("unknown id is a no-op");
    assert!(after.same_owners(&d));
}

#[test]
fn merge_after_clear_starts_fresh() {
    let cleared = clear();
    assert!(cleared.is_none());

    let merged = merge_now(cleared.as_ref(), &Dataset::new("t", vec![one(9)]));
    assert_eq!(merged.owner_ids(), vec![9]);
}

#[test]
fn empty_dataset_collapses_to_absent() {
    assert!(Dataset::new("t", Vec::new()).into_non_empty().is_none());
}
