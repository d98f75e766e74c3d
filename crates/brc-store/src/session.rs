use anyhow::{Context, Result};
use brc_reconcile::{clear, deserialize, merge_with_report, remove_owner, Dataset, MergeReport, OwnerId};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::store::DatasetStore;

/// Result of a removal request. Unknown ids are not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    UnknownOwner,
}

/// The loaded dataset plus the store it persists to.
///
/// In-memory state only changes after the matching save succeeded, so a
/// failed write leaves the session consistent with the file.
#[derive(Debug)]
pub struct Session {
    store: DatasetStore,
    dataset: Option<Dataset>,
}

impl Session {
    /// Load the dataset once. A corrupt store starts absent.
    pub fn open(store: DatasetStore) -> Result<Self> {
        let dataset = store.load_or_absent()?;
        info!(
            path = %store.path().display(),
            owners = dataset.as_ref().map_or(0, |d| d.len()),
            "session opened"
        );
        Ok(Self { store, dataset })
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Merge `incoming` (stamped now) and save.
    pub fn import(&mut self, incoming: &Dataset) -> Result<MergeReport> {
        self.import_at(incoming, Utc::now())
    }

    /// [`import`](Self::import) with an explicit merge time.
    pub fn import_at(&mut self, incoming: &Dataset, now: DateTime<Utc>) -> Result<MergeReport> {
        let (merged, report) = merge_with_report(self.dataset.as_ref(), incoming, now);
        let merged = merged.into_non_empty();
        self.commit(merged)?;
        info!(
            added = report.added.len(),
            replaced = report.replaced.len(),
            owners_total = report.owners_total(),
            "snapshot merged"
        );
        Ok(report)
    }

    /// Parse then [`import`](Self::import). A malformed snapshot changes nothing.
    pub fn import_json(&mut self, json: &str) -> Result<MergeReport> {
        let incoming = deserialize(json).context("malformed snapshot")?;
        self.import(&incoming)
    }

    pub fn remove_owner(&mut self, owner_id: OwnerId) -> Result<RemoveOutcome> {
        let Some(current) = self.dataset.as_ref().filter(|d| d.contains_owner(owner_id)) else {
            info!(owner_id, "remove: unknown owner");
            return Ok(RemoveOutcome::UnknownOwner);
        };
        let next = remove_owner(current, owner_id);
        self.commit(next)?;
        info!(owner_id, "owner removed");
        Ok(RemoveOutcome::Removed)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.commit(clear())?;
        info!("dataset cleared");
        Ok(())
    }

    fn commit(&mut self, next: Option<Dataset>) -> Result<()> {
        self.store.save(next.as_ref())?;
        self.dataset = next;
        Ok(())
    }
}
