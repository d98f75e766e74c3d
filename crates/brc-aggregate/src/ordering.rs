//! Owner ranking policy.
//!
//! Owners are presented in descending total generation. Owners with equal
//! generation keep their dataset order: the sort is stable and there is no
//! secondary key, so re-ranking an already ranked list is a no-op.
//!
//! Generation values are finite and non-negative (enforced at import), so
//! `f64::total_cmp` orders them the same way `partial_cmp` would.

use brc_reconcile::{Dataset, Owner};

use crate::metrics::{owner_generation, summarize_owner, OwnerSummary};
use crate::prices::PriceTable;

/// Owners by descending generation; ties keep dataset order.
/// The absent dataset ranks as empty.
pub fn rank_owners(dataset: Option<&Dataset>) -> Vec<&Owner> {
    let Some(d) = dataset else {
        return Vec::new();
    };
    let mut keyed: Vec<(f64, &Owner)> = d
        .owners()
        .iter()
        .map(|o| (owner_generation(o), o))
        .collect();
    // slice::sort_by is stable.
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    keyed.into_iter().map(|(_, o)| o).collect()
}

/// [`rank_owners`] with each owner's totals attached.
pub fn ranked_summaries(dataset: Option<&Dataset>, prices: &PriceTable) -> Vec<OwnerSummary> {
    rank_owners(dataset)
        .into_iter()
        .map(|o| summarize_owner(o, prices))
        .collect()
}
