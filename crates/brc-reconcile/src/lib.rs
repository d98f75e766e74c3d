//! brc-reconcile
//!
//! Snapshot reconciliation for collected-entity datasets.
//!
//! Architectural decisions:
//! - Owners are keyed by `owner_id`; a dataset never holds two owners with the same id
//! - Merge is last-writer-wins per owner: an incoming owner record replaces the stored one wholesale
//! - Merge never drops an owner; only `remove_owner` / `clear` do
//! - An emptied dataset collapses to the absent state (`None`)
//! - Optional entity fields are defaulted once, at the wire boundary
//!
//! Deterministic, pure logic. No IO. The merge timestamp is supplied by the caller.

mod engine;
mod types;

pub mod snapshot_adapter;

pub use engine::{clear, merge, merge_now, merge_with_report, remove_owner, MergeReport};
pub use snapshot_adapter::{deserialize, serialize, MalformedSnapshot};
pub use types::*;
