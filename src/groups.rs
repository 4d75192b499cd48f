//! Group keys and the live-owner registry.
//!
//! Owners that share a group key ("siblings") share one persisted recents
//! document and invalidate each other's cached projections: when one owner's
//! list mutates, every sibling's stale flag is raised. Nothing is rebuilt
//! eagerly — consumers check and clear the flag right before a projection is
//! displayed.

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Classification key shared by sibling owners.
///
/// Derived from an owner's classification attribute; determines which owners
/// share a persisted list and staleness notifications.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey(String);

impl GroupKey {
    /// Derive a key from a classification attribute: keep ASCII alphanumeric
    /// characters as-is (case preserved); an empty result becomes the
    /// literal `"None"`.
    pub fn derive(classification: &str) -> Self {
        let filtered: String = classification
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();
        if filtered.is_empty() {
            Self("None".to_string())
        } else {
            Self(filtered)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Function that turns a classification attribute into a [`GroupKey`].
/// [`GroupKey::derive`] is the default; hosts with their own grouping rules
/// supply a replacement via `EngineOptions`.
pub type GroupKeyFn = fn(&str) -> GroupKey;

struct RegistryMember {
    owner: String,
    group: GroupKey,
    stale: Arc<AtomicBool>,
}

/// Live registry of all active owners.
///
/// A plain `Vec` with a linear scan on every mutation — the subsystem tracks
/// tens of owners, not thousands.
#[derive(Default)]
pub struct GroupRegistry {
    members: Vec<RegistryMember>,
}

/// Registry handle shared between the engine and every store, so a store can
/// broadcast synchronously from inside `add`/`remove`.
pub type SharedRegistry = Arc<Mutex<GroupRegistry>>;

impl GroupRegistry {
    /// Register an owner's stale flag under its group key.
    /// Re-registering an owner id replaces the previous entry.
    pub fn register(&mut self, owner: &str, group: GroupKey, stale: Arc<AtomicBool>) {
        self.members.retain(|m| m.owner != owner);
        self.members.push(RegistryMember {
            owner: owner.to_string(),
            group,
            stale,
        });
    }

    pub fn unregister(&mut self, owner: &str) {
        self.members.retain(|m| m.owner != owner);
    }

    /// Mark every registered sibling of `owner` stale. The mutating owner's
    /// own flag is never touched — it already reflects the new state.
    pub fn notify_mutated(&self, owner: &str) {
        let Some(source) = self.members.iter().find(|m| m.owner == owner) else {
            tracing::debug!("mutation from unregistered owner {owner}");
            return;
        };
        for member in &self.members {
            if member.owner != owner && member.group == source.group {
                member.stale.store(true, Ordering::Relaxed);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
