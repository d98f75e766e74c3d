//! brc-store
//!
//! Persistence lifecycle around the pure reconcile core:
//! - One JSON file holds the canonical dataset (the wire format)
//! - Missing file and empty dataset both mean "absent"
//! - Writes are atomic (temp file + rename); saving absent removes the file
//! - `Session` loads once, then saves after every successful mutation
//!
//! The dataset itself stays an explicit value; nothing here is global.

mod session;
mod store;

pub use session::{RemoveOutcome, Session};
pub use store::{resolve_store_path, DatasetStore, DEFAULT_STORE_FILE, ENV_STORE_PATH};
