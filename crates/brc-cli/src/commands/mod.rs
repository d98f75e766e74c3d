//! Command handler modules for brc.
//!
//! Shared setup (config, prices, store path) and snapshot file reading live
//! here. Command-specific logic lives in the submodules.

pub mod export;
pub mod import;
pub mod report;

use anyhow::{Context, Result};
use brc_aggregate::PriceTable;
use brc_config::{load_with_defaults, report_unused_keys, AppConfig, UnusedKeyPolicy};
use brc_reconcile::{deserialize, Dataset};
use brc_store::{resolve_store_path, DatasetStore, Session};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Shared setup
// ---------------------------------------------------------------------------

/// Everything a command needs, resolved once from flags, env and config.
pub struct Workspace {
    pub config: AppConfig,
    pub store_path: PathBuf,
    pub prices: PriceTable,
}

impl Workspace {
    pub fn load(config_paths: &[String], store_flag: Option<&Path>, strict: bool) -> Result<Self> {
        let path_refs: Vec<&str> = config_paths.iter().map(|s| s.as_str()).collect();
        let loaded = load_with_defaults(&path_refs)?;

        let policy = if strict {
            UnusedKeyPolicy::Fail
        } else {
            UnusedKeyPolicy::Warn
        };
        let report = report_unused_keys(&loaded.config_json, policy)?;
        if !report.is_clean() {
            warn!(unused = ?report.unused_leaf_pointers, "config keys not consumed");
        }

        let config = loaded.app_config()?;
        let prices = PriceTable::from_units(
            config.pricing.table.iter().map(|(k, v)| (k.as_str(), *v)),
            config.pricing.fallback_price,
        )
        .context("CONFIG_INVALID: pricing")?;
        let store_path = resolve_store_path(store_flag, &config.store.path);

        debug!(
            config_hash = %loaded.config_hash,
            store = %store_path.display(),
            prices = prices.len(),
            "workspace loaded"
        );

        Ok(Self {
            config,
            store_path,
            prices,
        })
    }

    pub fn open_session(&self) -> Result<Session> {
        Session::open(DatasetStore::new(&self.store_path))
    }
}

/// `brc config-hash`: hash of the defaults plus the given overlays.
pub fn config_hash(paths: &[String]) -> Result<()> {
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = load_with_defaults(&path_refs)?;
    println!("config_hash={}", loaded.config_hash);
    println!("{}", loaded.canonical_json);
    Ok(())
}

// ---------------------------------------------------------------------------
// Snapshot files
// ---------------------------------------------------------------------------

/// Read and parse one snapshot file. Tolerates a UTF-8 BOM (Windows editors).
pub fn read_snapshot_file(path: &Path) -> Result<Dataset> {
    let bytes = fs::read(path).with_context(|| format!("read snapshot failed: {}", path.display()))?;
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(&bytes);
    let raw = std::str::from_utf8(bytes)
        .with_context(|| format!("snapshot must be UTF-8 text: {}", path.display()))?;

    deserialize(raw.trim()).with_context(|| format!("malformed snapshot: {}", path.display()))
}
