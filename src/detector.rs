//! Polling-based change detection over the host's live slots.
//!
//! The host offers no change events for slot values, so each active owner
//! keeps a snapshot of the last observed state and diffs the live slots
//! against it on a fixed cadence. Values that pass host validation flow into
//! the owner's recency list; values that fail are treated as a transient
//! failed load and leave the snapshot untouched, so a failed reload cannot
//! re-add an entry the user just removed.

use std::sync::atomic::Ordering;

use crate::metrics::DetectorMetrics;
use crate::store::RecencyStore;

/// Host boundary for slot observation. One implementation per feature
/// (plugin loader rows, content-browser panels); all host-specific lookup
/// lives behind it.
pub trait SlotHost {
    /// True once the owner's dependent sub-resources exist. Owners report
    /// not-ready during host construction and are retried, not failed.
    fn is_ready(&self, owner: &str) -> bool;

    /// Number of value-bearing slots currently observed for the owner.
    fn slot_count(&self, owner: &str) -> usize;

    /// Current value carried by one slot; empty when the slot is vacant.
    fn slot_value(&self, owner: &str, index: usize) -> String;

    /// Whether the value in a slot actually attached/loaded successfully.
    fn validate_slot(&self, owner: &str, index: usize) -> bool;

    /// Attempt to use a previously recorded entry; false means the entry is
    /// no longer usable and should drop out of the recency list.
    fn use_entry(&self, owner: &str, entry: &str) -> bool;
}

/// Last-known observation of one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SlotRecord {
    index: usize,
    value: String,
}

/// Tracked snapshot for one owner: ordered slot records, compared against the
/// live source by count first, then pairwise by value.
#[derive(Debug, Default)]
pub struct SlotSnapshot {
    slots: Vec<SlotRecord>,
}

impl SlotSnapshot {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn contains_value(&self, value: &str) -> bool {
        self.slots.iter().any(|s| s.value == value)
    }
}

/// Diff the live slots for `owner` against `snapshot`, feeding accepted
/// values into `store`.
///
/// Count change: rebuild the snapshot from the live slots (dropping slots
/// that fail validation) and add every non-empty value absent from the
/// previous snapshot. Count match: pairwise value comparison; a changed value
/// is recorded and added only if it validates.
pub(crate) fn poll_changes(
    host: &dyn SlotHost,
    owner: &str,
    snapshot: &mut SlotSnapshot,
    store: &mut RecencyStore,
    metrics: &DetectorMetrics,
) {
    metrics.polls.fetch_add(1, Ordering::Relaxed);

    let live_count = host.slot_count(owner);
    if live_count != snapshot.slots.len() {
        let mut fresh = Vec::with_capacity(live_count);
        for index in 0..live_count {
            if !host.validate_slot(owner, index) {
                metrics.rejected.fetch_add(1, Ordering::Relaxed);
                continue;
            }
            fresh.push(SlotRecord {
                index,
                value: host.slot_value(owner, index),
            });
        }
        for record in &fresh {
            if record.value.is_empty() || snapshot.contains_value(&record.value) {
                continue;
            }
            if store.add(&record.value) {
                metrics.accepted.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("owner {owner}: new slot value {:?}", record.value);
            }
        }
        snapshot.slots = fresh;
        return;
    }

    for record in &mut snapshot.slots {
        let live = host.slot_value(owner, record.index);
        if live == record.value {
            continue;
        }
        if !host.validate_slot(owner, record.index) {
            // Failed load: keep the previous recorded value so a later
            // recovery still registers as a change.
            metrics.rejected.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("owner {owner}: slot {} value {live:?} failed validation", record.index);
            continue;
        }
        record.value = live.clone();
        if store.add(&live) {
            metrics.accepted.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("owner {owner}: slot {} changed to {live:?}", record.index);
        }
    }
}
