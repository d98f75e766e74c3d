//! Registry of config keys the workspace actually reads.
//!
//! Entries are JSON-pointer prefixes. A leaf under any prefix counts as
//! consumed; anything else is reported by `report_unused_keys`.
//!
//! Keep this in step with `AppConfig`: a key belongs here only once code
//! reads it.

pub static CONSUMED_POINTERS: &[&str] = &[
    // brc-store (dataset file location)
    "/store/path",
    // brc-cli export
    "/exports/dir",
    // brc-cli -> brc-aggregate::PriceTable
    "/pricing/fallback_price",
    "/pricing/table",
];
