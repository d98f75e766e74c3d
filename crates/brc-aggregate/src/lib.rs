//! brc-aggregate
//!
//! Derived metrics over a canonical dataset:
//! - Entity price lookup with a single fallback price
//! - Per-owner value and generation totals
//! - Global totals (zero for the absent dataset)
//! - Stable ranking by generation
//! - Pure deterministic logic (no IO, no time)

mod fixedpoint;
mod metrics;
mod ordering;
mod prices;

pub mod format;

pub use fixedpoint::{Micros, MICROS_SCALE};
pub use metrics::{
    global_metrics, owner_generation, owner_value, summarize_owner, GlobalMetrics, OwnerSummary,
};
pub use ordering::{rank_owners, ranked_summaries};
pub use prices::{price_of, PriceTable, PriceTableError, DEFAULT_FALLBACK_PRICE};
