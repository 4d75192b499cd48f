//! The per-owner recency list, synchronized with its persisted document.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config;
use crate::groups::{GroupKey, SharedRegistry};

/// Hard cap on entries in one recency list.
pub const MAX_RECENT: usize = 30;

/// Persisted shape: one recognized field, an ordered most-recent-first array.
/// Unknown fields in an existing document are ignored on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct RecentsDocument {
    #[serde(default)]
    pub(crate) recent: Vec<String>,
}

/// One owner's bounded, deduplicated, most-recent-first list of identifiers.
///
/// The list is loaded lazily on first read and saved synchronously on every
/// mutation. The document lives at a path derived from the owner's group key,
/// so sibling owners (same key) share persisted state even though each holds
/// its own in-memory copy; a mutation here marks those siblings stale through
/// the shared registry, and they re-read the document before their next
/// display.
pub struct RecencyStore {
    owner: String,
    group: GroupKey,
    path: PathBuf,
    max_recent: usize,
    registry: SharedRegistry,
    /// None until first read.
    entries: Option<Vec<String>>,
}

impl RecencyStore {
    pub(crate) fn new(
        owner: &str,
        group: GroupKey,
        dir: &Path,
        prefix: &str,
        max_recent: usize,
        registry: SharedRegistry,
    ) -> Self {
        let path = config::recents_path(dir, prefix, group.as_str());
        Self {
            owner: owner.to_string(),
            group,
            path,
            max_recent,
            registry,
            entries: None,
        }
    }

    pub fn group(&self) -> &GroupKey {
        &self.group
    }

    /// Current list, most recent first. Reads the document on first access;
    /// a missing or corrupt document is an empty list, never an error.
    pub fn entries(&mut self) -> &[String] {
        self.entries_mut()
    }

    /// Discard in-memory state so the next read reflects the document.
    /// Called when a sibling's mutation marked this owner stale.
    pub fn reload(&mut self) {
        self.entries = None;
    }

    /// Record an identifier as most recent. An entry already in the list is
    /// left exactly where it is — recency means "most recently first-used",
    /// so repeated use does not promote. Returns whether anything changed.
    pub fn add(&mut self, entry: &str) -> bool {
        if entry.is_empty() {
            return false;
        }
        let max = self.max_recent;
        let list = self.entries_mut();
        if list.iter().any(|e| e == entry) {
            return false;
        }
        list.insert(0, entry.to_string());
        while list.len() > max {
            list.pop();
        }
        self.save_and_broadcast();
        true
    }

    /// Remove an identifier by exact match. A missing entry is logged and
    /// left alone. Returns whether anything changed.
    pub fn remove(&mut self, entry: &str) -> bool {
        let list = self.entries_mut();
        let Some(position) = list.iter().position(|e| e == entry) else {
            tracing::warn!("entry {entry:?} not in recents for group {}", self.group);
            return false;
        };
        list.remove(position);
        self.save_and_broadcast();
        true
    }

    /// Remove by position. An out-of-range index is logged and left alone.
    /// Returns whether anything changed.
    pub fn remove_at(&mut self, index: usize) -> bool {
        let list = self.entries_mut();
        if index >= list.len() {
            let len = list.len();
            tracing::warn!(
                "remove_at index {index} out of range (len {len}) for group {}",
                self.group
            );
            return false;
        }
        list.remove(index);
        self.save_and_broadcast();
        true
    }

    fn entries_mut(&mut self) -> &mut Vec<String> {
        self.entries.get_or_insert_with(|| {
            let doc: RecentsDocument = config::load_json_document(&self.path);
            doc.recent
        })
    }

    fn save_and_broadcast(&mut self) {
        let doc = RecentsDocument {
            recent: self.entries.clone().unwrap_or_default(),
        };
        if let Err(e) = config::save_json_document(&self.path, &doc) {
            tracing::error!("failed to save recents for group {}: {e}", self.group);
        }
        // Synchronous, inside the mutating call: siblings observe the flag
        // before the next driver tick touches them.
        self.registry.lock().notify_mutated(&self.owner);
    }
}
