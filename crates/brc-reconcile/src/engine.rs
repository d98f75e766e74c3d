use chrono::{DateTime, Utc};

use crate::{Dataset, OwnerId, Upsert};

/// Format of `last_update` stamped by a merge. Matches the collector's own
/// `lastUpdate` so imported and merged datasets read the same.
pub const LAST_UPDATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What a merge did to each owner id. Ids are listed in dataset order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Present only in the incoming snapshot.
    pub added: Vec<OwnerId>,
    /// Present on both sides; the incoming record won.
    pub replaced: Vec<OwnerId>,
    /// Present only in the current dataset; kept unchanged.
    pub retained: Vec<OwnerId>,
}

impl MergeReport {
    pub fn owners_total(&self) -> usize {
        self.added.len() + self.replaced.len() + self.retained.len()
    }
}

/// Last-writer-wins merge, keyed by owner id:
/// - owner in both => incoming record replaces current wholesale (entities are not unioned)
/// - owner only in current => retained unchanged
/// - owner only in incoming => appended after current owners, in incoming order
///
/// `current` is not modified; `last_update` of the result is `now`.
pub fn merge_with_report(
    current: Option<&Dataset>,
    incoming: &Dataset,
    now: DateTime<Utc>,
) -> (Dataset, MergeReport) {
    let mut merged = match current {
        Some(d) => d.clone(),
        None => Dataset::new(String::new(), Vec::new()),
    };
    let mut report = MergeReport::default();

    for owner in incoming.owners() {
        match merged.upsert(owner.clone()) {
            Upsert::Added => report.added.push(owner.owner_id),
            Upsert::Replaced => report.replaced.push(owner.owner_id),
        }
    }

    if let Some(d) = current {
        report.retained = d
            .owners()
            .iter()
            .map(|o| o.owner_id)
            .filter(|id| !incoming.contains_owner(*id))
            .collect();
    }

    merged.set_last_update(now.format(LAST_UPDATE_FORMAT).to_string());
    (merged, report)
}

/// [`merge_with_report`] without the report.
pub fn merge(current: Option<&Dataset>, incoming: &Dataset, now: DateTime<Utc>) -> Dataset {
    merge_with_report(current, incoming, now).0
}

/// [`merge`] stamped with the wall clock.
pub fn merge_now(current: Option<&Dataset>, incoming: &Dataset) -> Dataset {
    merge(current, incoming, Utc::now())
}

/// Drop one owner. Unknown ids are a no-op. Returns `None` when the last
/// owner goes. `last_update` is left as is: removal is not an import.
pub fn remove_owner(current: &Dataset, owner_id: OwnerId) -> Option<Dataset> {
    let kept = current
        .owners()
        .iter()
        .filter(|o| o.owner_id != owner_id)
        .cloned();
    Dataset::new(current.last_update(), kept).into_non_empty()
}

/// Full reset.
pub fn clear() -> Option<Dataset> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Entity, Owner};
    use chrono::TimeZone;

    fn owner(id: OwnerId, names: &[&str]) -> Owner {
        Owner::new(
            id,
            format!("player{id}"),
            names.iter().map(|n| Entity::new(*n, 1.0)).collect(),
        )
    }

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, h, 0, 0).unwrap()
    }

    #[test]
    fn report_classifies_every_owner_once() {
        let current = Dataset::new("x", vec![owner(1, &["A"]), owner(2, &["B"])]);
        let incoming = Dataset::new("y", vec![owner(2, &["C"]), owner(3, &["D"])]);

        let (merged, report) = merge_with_report(Some(&current), &incoming, at(10));

        assert_eq!(report.added, vec![3]);
        assert_eq!(report.replaced, vec![2]);
        assert_eq!(report.retained, vec![1]);
        assert_eq!(report.owners_total(), merged.len());
    }

    #[test]
    fn merge_from_absent_adds_everything() {
        let incoming = Dataset::new("y", vec![owner(7, &["A"]), owner(8, &[])]);
        let (merged, report) = merge_with_report(None, &incoming, at(10));

        assert_eq!(merged.owner_ids(), vec![7, 8]);
        assert_eq!(report.added, vec![7, 8]);
        assert!(report.replaced.is_empty());
        assert!(report.retained.is_empty());
    }

    #[test]
    fn last_update_is_the_merge_time() {
        let incoming = Dataset::new("2020-01-01 00:00:00", vec![owner(1, &["A"])]);
        let merged = merge(None, &incoming, at(9));
        assert_eq!(merged.last_update(), "2025-03-01 09:00:00");
    }

    #[test]
    fn remove_keeps_last_update() {
        let d = Dataset::new("stamp", vec![owner(1, &["A"]), owner(2, &["B"])]);
        let after = remove_owner(&d, 1).unwrap();
        assert_eq!(after.last_update(), "stamp");
        assert_eq!(after.owner_ids(), vec![2]);
    }

    #[test]
    fn remove_unknown_owner_is_noop() {
        let d = Dataset::new("stamp", vec![owner(1, &["A"])]);
        let after = remove_owner(&d, 99).unwrap();
        assert_eq!(after, d);
    }

    #[test]
    fn clear_is_absent() {
        assert!(clear().is_none());
    }
}
