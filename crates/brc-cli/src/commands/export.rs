//! `brc export`: write the canonical dataset in the collector's JSON shape.

use anyhow::{Context, Result};
use brc_reconcile::serialize;
use chrono::Utc;
use std::fs;
use std::path::PathBuf;

use super::Workspace;

/// Default export file name stem; the unix-millis stamp keeps exports apart.
const EXPORT_STEM: &str = "brainrot_full_database";

pub fn export(ws: &Workspace, out: Option<PathBuf>) -> Result<()> {
    let session = ws.open_session()?;
    let Some(dataset) = session.dataset() else {
        anyhow::bail!(
            "REFUSING EXPORT: no dataset at {} (import a snapshot first)",
            ws.store_path.display()
        );
    };

    let out_path = out.unwrap_or_else(|| {
        ws.config
            .exports
            .dir
            .join(format!("{EXPORT_STEM}_{}.json", Utc::now().timestamp_millis()))
    });
    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create exports dir failed: {}", parent.display()))?;
    }

    let json = serialize(dataset).context("serialize dataset failed")?;
    fs::write(&out_path, format!("{json}\n"))
        .with_context(|| format!("write export failed: {}", out_path.display()))?;

    println!(
        "exported=true owners={} path={}",
        dataset.len(),
        out_path.display()
    );
    Ok(())
}
