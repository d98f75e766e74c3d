//! Dataset mutation command handlers.
//!
//! Covers `brc import`, `brc remove` and `brc clear`. Destructive commands
//! refuse to run without `--yes`.

use anyhow::Result;
use brc_reconcile::{Dataset, OwnerId};
use brc_store::RemoveOutcome;
use std::path::PathBuf;

use super::{read_snapshot_file, Workspace};

/// Parse every file before touching the store: one bad file aborts the run
/// with the dataset unchanged. Files are folded in order (later files win
/// per owner) and merged as a single snapshot, so the store is written once.
pub fn import(ws: &Workspace, files: &[PathBuf]) -> Result<()> {
    let snapshots = files
        .iter()
        .map(|p| read_snapshot_file(p))
        .collect::<Result<Vec<_>>>()?;

    let combined = Dataset::new(
        String::new(),
        snapshots.into_iter().flat_map(Dataset::into_owners),
    );

    let mut session = ws.open_session()?;
    let report = session.import(&combined)?;

    println!(
        "imported=true files={} owners_added={} owners_replaced={} owners_total={}",
        files.len(),
        report.added.len(),
        report.replaced.len(),
        report.owners_total()
    );
    Ok(())
}

pub fn remove(ws: &Workspace, owner_id: OwnerId, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!(
            "REFUSING REMOVE: owner {} would be deleted from {}. Re-run with: `brc remove --owner-id {} --yes`",
            owner_id,
            ws.store_path.display(),
            owner_id
        );
    }

    let mut session = ws.open_session()?;
    let outcome = session.remove_owner(owner_id)?;
    let owners_total = session.dataset().map_or(0, |d| d.len());

    println!(
        "removed={} owners_total={}",
        outcome == RemoveOutcome::Removed,
        owners_total
    );
    Ok(())
}

pub fn clear(ws: &Workspace, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!(
            "REFUSING CLEAR: every owner in {} would be deleted. Re-run with: `brc clear --yes`",
            ws.store_path.display()
        );
    }

    let mut session = ws.open_session()?;
    session.clear()?;

    println!("cleared=true");
    Ok(())
}
