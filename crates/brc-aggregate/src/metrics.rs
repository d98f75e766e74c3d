use brc_reconcile::{Dataset, Owner, OwnerId};

use crate::prices::{price_of, PriceTable};
use crate::Micros;

/// Dataset-wide totals. All zero for the absent dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlobalMetrics {
    pub owner_count: usize,
    pub entity_count: usize,
    pub total_value: Micros,
    pub total_generation: f64,
}

/// Per-owner totals, as shown in one row of a listing.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnerSummary {
    pub owner_id: OwnerId,
    pub display_name: String,
    pub entity_count: usize,
    pub value: Micros,
    pub generation: f64,
}

/// value = Σ price_of(entity.name) over the owner's entities.
pub fn owner_value(owner: &Owner, prices: &PriceTable) -> Micros {
    owner
        .entities
        .iter()
        .map(|e| price_of(&e.name, prices))
        .sum()
}

/// generation = Σ entity.generation.
pub fn owner_generation(owner: &Owner) -> f64 {
    // start at +0.0; an empty float `sum()` yields -0.0
    owner.entities.iter().fold(0.0, |acc, e| acc + e.generation)
}

pub fn summarize_owner(owner: &Owner, prices: &PriceTable) -> OwnerSummary {
    OwnerSummary {
        owner_id: owner.owner_id,
        display_name: owner.display_name.clone(),
        entity_count: owner.entities.len(),
        value: owner_value(owner, prices),
        generation: owner_generation(owner),
    }
}

/// Totals across every owner. `None` (absent dataset) yields all zeros.
pub fn global_metrics(dataset: Option<&Dataset>, prices: &PriceTable) -> GlobalMetrics {
    let Some(d) = dataset else {
        return GlobalMetrics::default();
    };

    // deterministic iteration (dataset order)
    let mut m = GlobalMetrics {
        owner_count: d.len(),
        ..GlobalMetrics::default()
    };
    for owner in d.owners() {
        m.entity_count += owner.entities.len();
        m.total_value = m.total_value.saturating_add(owner_value(owner, prices));
        m.total_generation += owner_generation(owner);
    }
    m
}
