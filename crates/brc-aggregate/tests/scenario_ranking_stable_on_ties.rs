//! Scenario: ranking by generation is descending and stable.
//!
//! # Invariants under test
//!
//! 1. Higher total generation ranks first.
//! 2. Owners with equal generation keep their dataset order.
//! 3. Ranking a ranked list again changes nothing.
//! 4. The absent dataset ranks as empty.

use brc_aggregate::*;
use brc_reconcile::{Dataset, Entity, Owner, OwnerId};

fn owner(id: OwnerId, gens: &[f64]) -> Owner {
    Owner::new(
        id,
        format!("p{id}"),
        gens.iter().map(|g| Entity::new("Tictac Sahur", *g)).collect(),
    )
}

fn ids(owners: &[&Owner]) -> Vec<OwnerId> {
    owners.iter().map(|o| o.owner_id).collect()
}

#[test]
fn ranks_descending_by_generation() {
    let d = Dataset::new(
        "t",
        vec![owner(1, &[1.0]), owner(2, &[10.0]), owner(3, &[2.0, 3.0])],
    );
    assert_eq!(ids(&rank_owners(Some(&d))), vec![2, 3, 1]);
}

#[test]
fn ties_keep_dataset_order() {
    let d = Dataset::new(
        "t",
        vec![
            owner(7, &[5.0]),
            owner(3, &[9.0]),
            owner(5, &[2.0, 3.0]),
            owner(1, &[5.0]),
            owner(9, &[]),
            owner(2, &[]),
        ],
    );
    assert_eq!(ids(&rank_owners(Some(&d))), vec![3, 7, 5, 1, 9, 2]);
}

#[test]
fn ranking_is_idempotent() {
    let d = Dataset::new(
        "t",
        vec![owner(1, &[4.0]), owner(2, &[4.0]), owner(3, &[8.0])],
    );
    let once: Vec<Owner> = rank_owners(Some(&d)).into_iter().cloned().collect();
    let reranked = Dataset::new("t", once.clone());
    let twice: Vec<Owner> = rank_owners(Some(&reranked)).into_iter().cloned().collect();
    assert_eq!(once, twice);
}

#[test]
fn absent_dataset_ranks_empty() {
    assert!(rank_owners(None).is_empty());
    assert!(ranked_summaries(None, &PriceTable::default()).is_empty());
}

#[test]
fn summaries_follow_ranking() {
    let prices = PriceTable::default();
    let d = Dataset::new("t", vec![owner(1, &[1.0]), owner(2, &[3.0, 3.0])]);
    let rows = ranked_summaries(Some(&d), &prices);
    assert_eq!(rows[0].owner_id, 2);
    assert_eq!(rows[0].generation, 6.0);
    assert_eq!(rows[0].value, Micros::units(20));
    assert_eq!(rows[1].owner_id, 1);
}
