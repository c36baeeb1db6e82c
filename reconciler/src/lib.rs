//! Pure state transitions of the activation monitor.
//!
//! Nothing in this crate performs I/O. The caller loads and persists the record,
//! queries the beacon node and acts on the keys reported as activated.

use std::collections::{BTreeMap, BTreeSet, btree_map::Entry};

use log::debug;
use types::{StatusRecord, ValidatorKey, ValidatorStatus};

/// Status assigned to keys that are tracked before anything is known about them.
pub const SEED_STATUS: ValidatorStatus = ValidatorStatus::PendingQueued;

#[derive(PartialEq, Eq, Debug)]
pub struct Reconciliation {
    /// Previous record with observed statuses applied.
    pub record: StatusRecord,
    /// Keys that entered `active_ongoing` in this reconciliation.
    pub activated: BTreeSet<ValidatorKey>,
    /// Keys of `record` that still have to be polled.
    pub pending: BTreeSet<ValidatorKey>,
}

/// Merges `observed` statuses into `previous`.
///
/// Only keys already present in `previous` are updated. Keys absent from `observed` keep their
/// previous status. A key is reported as activated only when its status changes to
/// `active_ongoing`, so applying the same observation twice activates nothing the second time.
#[must_use]
pub fn reconcile(
    previous: &StatusRecord,
    observed: impl IntoIterator<Item = (ValidatorKey, ValidatorStatus)>,
) -> Reconciliation {
    let mut record = previous.clone();
    let mut activated = BTreeSet::new();

    for (key, new_status) in observed {
        let Some(status) = record.get_mut(&key) else {
            debug!("ignoring status of untracked validator {key}: {new_status}");
            continue;
        };

        let old_status = core::mem::replace(status, new_status);

        if old_status != new_status {
            debug!("validator {key} changed status from {old_status} to {new_status}");
        }

        if !old_status.triggers_registration() && new_status.triggers_registration() {
            activated.insert(key);
        }
    }

    let pending = pending_keys(&record);

    Reconciliation {
        record,
        activated,
        pending,
    }
}

/// Starts tracking `keys` that are not tracked yet.
///
/// Existing entries are never overwritten. Returns the number of newly tracked keys.
pub fn seed(record: &mut StatusRecord, keys: impl IntoIterator<Item = ValidatorKey>) -> usize {
    let mut inserted = 0;

    for key in keys {
        if let Entry::Vacant(vacant) = record.entry(key) {
            vacant.insert(SEED_STATUS);
            inserted += 1;
        }
    }

    inserted
}

#[must_use]
pub fn pending_keys(record: &StatusRecord) -> BTreeSet<ValidatorKey> {
    record
        .iter()
        .filter(|(_, status)| status.is_pending())
        .map(|(key, _)| *key)
        .collect()
}

/// Counts tracked validators per status.
#[must_use]
pub fn status_counts(record: &StatusRecord) -> BTreeMap<ValidatorStatus, usize> {
    record.values().fold(BTreeMap::new(), |mut counts, status| {
        *counts.entry(*status).or_default() += 1;
        counts
    })
}
