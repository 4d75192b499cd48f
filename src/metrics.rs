//! Change-detection metrics for observability.
//! All counters use AtomicUsize for lock-free, zero-overhead-when-idle tracking.

use std::sync::atomic::{AtomicUsize, Ordering};

pub struct DetectorMetrics {
    /// Changed checks executed across all owners.
    pub polls: AtomicUsize,
    /// Slot values accepted into a recency list.
    pub accepted: AtomicUsize,
    /// Slot values that failed host validation and were excluded.
    pub rejected: AtomicUsize,
    /// Deferred owners promoted to active.
    pub promotions: AtomicUsize,
    /// Per-owner checks that panicked and were isolated.
    pub isolated_failures: AtomicUsize,
}

impl DetectorMetrics {
    pub const fn new() -> Self {
        Self {
            polls: AtomicUsize::new(0),
            accepted: AtomicUsize::new(0),
            rejected: AtomicUsize::new(0),
            promotions: AtomicUsize::new(0),
            isolated_failures: AtomicUsize::new(0),
        }
    }

    /// Build a metrics snapshot from the current counters.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "polls": self.polls.load(Ordering::Relaxed),
            "accepted": self.accepted.load(Ordering::Relaxed),
            "rejected": self.rejected.load(Ordering::Relaxed),
            "promotions": self.promotions.load(Ordering::Relaxed),
            "isolated_failures": self.isolated_failures.load(Ordering::Relaxed),
        })
    }
}

impl Default for DetectorMetrics {
    fn default() -> Self {
        Self::new()
    }
}
