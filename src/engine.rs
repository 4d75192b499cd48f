//! Owner lifecycle and the tick-driven polling driver.
//!
//! The host feeds entity add/remove/reload events in and calls `tick(dt)`
//! once per frame; everything else — deferred readiness retries, changed
//! checks, lazy projection rebuilds — happens inside those calls on the
//! driver thread. No operation blocks and no background threads are spawned.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config;
use crate::detector::{SlotHost, SlotSnapshot, poll_changes};
use crate::groups::{GroupKey, GroupKeyFn, GroupRegistry, SharedRegistry};
use crate::metrics::DetectorMetrics;
use crate::resolver::DisplayNameResolver;
use crate::store::{MAX_RECENT, RecencyStore};

/// How often deferred (not-yet-ready) owners retry initialization.
pub const DEFERRED_CHECK_INTERVAL: Duration = Duration::from_millis(500);

/// How often active owners are polled for externally-driven slot changes.
pub const CHANGED_CHECK_INTERVAL: Duration = Duration::from_secs(1);

/// Ticks to wait after a user-action mutation before re-rendering the
/// mutating owner, so the host's own layout settles first.
pub const REBUILD_DELAY_TICKS: u8 = 2;

/// Where the engine renders projections. Invoked only when a stale
/// projection is about to be displayed, or after the settle delay that
/// follows a user-action mutation.
pub trait ProjectionSink {
    /// `entries` is ordered most recent first: (raw identifier, display label).
    fn render_list(&self, owner: &str, entries: &[(String, String)]);
}

/// Per-feature configuration. One engine instance per feature replaces the
/// per-feature copies of this logic; everything that varied between them is a
/// field here.
pub struct EngineOptions {
    /// Directory holding the persisted recents documents.
    pub config_dir: PathBuf,
    /// File-name prefix, e.g. `aui.plugins.recent` or `aui.mru.browser`.
    pub file_prefix: String,
    pub max_recent: usize,
    pub deferred_check_interval: Duration,
    pub changed_check_interval: Duration,
    pub rebuild_delay_ticks: u8,
    pub group_key_fn: GroupKeyFn,
    pub resolver: DisplayNameResolver,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            config_dir: config::default_config_dir(),
            file_prefix: "aui.plugins.recent".to_string(),
            max_recent: MAX_RECENT,
            deferred_check_interval: DEFERRED_CHECK_INTERVAL,
            changed_check_interval: CHANGED_CHECK_INTERVAL,
            rebuild_delay_ticks: REBUILD_DELAY_TICKS,
            group_key_fn: GroupKey::derive,
            resolver: DisplayNameResolver::default(),
        }
    }
}

struct Owner {
    id: String,
    store: RecencyStore,
    snapshot: SlotSnapshot,
    /// Raised by sibling mutations; cleared when the projection rebuilds.
    stale: Arc<AtomicBool>,
}

struct PendingRebuild {
    owner: String,
    ticks_left: u8,
}

/// Lifecycle manager and polling driver for all owners of one feature.
pub struct RecentsEngine {
    options: EngineOptions,
    host: Box<dyn SlotHost>,
    sink: Box<dyn ProjectionSink>,
    registry: SharedRegistry,
    owners: HashMap<String, Owner>,
    /// Not-yet-ready owners: id -> classification attribute.
    deferred: HashMap<String, String>,
    deferred_elapsed: Duration,
    changed_elapsed: Duration,
    pending_rebuilds: Vec<PendingRebuild>,
    metrics: DetectorMetrics,
}

impl RecentsEngine {
    pub fn new(options: EngineOptions, host: Box<dyn SlotHost>, sink: Box<dyn ProjectionSink>) -> Self {
        Self {
            options,
            host,
            sink,
            registry: Arc::new(Mutex::new(GroupRegistry::default())),
            owners: HashMap::new(),
            deferred: HashMap::new(),
            deferred_elapsed: Duration::ZERO,
            changed_elapsed: Duration::ZERO,
            pending_rebuilds: Vec::new(),
            metrics: DetectorMetrics::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Entity feed
    // -----------------------------------------------------------------------

    /// An external entity appeared. Creates its owner immediately when the
    /// host reports it ready, otherwise parks it in the deferred set.
    pub fn on_entity_added(&mut self, id: &str, classification: &str) {
        if self.owners.contains_key(id) || self.deferred.contains_key(id) {
            return;
        }
        if self.host.is_ready(id) {
            self.activate(id, classification);
        } else {
            tracing::debug!("owner {id} not ready; deferring");
            self.deferred.insert(id.to_string(), classification.to_string());
        }
    }

    /// An external entity disappeared. In-memory state is discarded; the
    /// persisted list survives under its group key.
    pub fn on_entity_removed(&mut self, id: &str) {
        self.owners.remove(id);
        self.deferred.remove(id);
        self.registry.lock().unregister(id);
        // Implicit cancellation: a scheduled rebuild for a dead owner is dropped.
        self.pending_rebuilds.retain(|p| p.owner != id);
    }

    /// The whole container reloaded: rebuild the active and deferred sets
    /// from the live entity list of (id, classification) pairs.
    pub fn on_container_reloaded(&mut self, entities: &[(String, String)]) {
        {
            let mut registry = self.registry.lock();
            for id in self.owners.keys() {
                registry.unregister(id);
            }
        }
        self.owners.clear();
        self.deferred.clear();
        self.pending_rebuilds.clear();
        for (id, classification) in entities {
            self.on_entity_added(id, classification);
        }
    }

    fn activate(&mut self, id: &str, classification: &str) {
        let group = (self.options.group_key_fn)(classification);
        let stale = Arc::new(AtomicBool::new(true));
        self.registry.lock().register(id, group.clone(), stale.clone());
        let store = RecencyStore::new(
            id,
            group,
            &self.options.config_dir,
            &self.options.file_prefix,
            self.options.max_recent,
            self.registry.clone(),
        );
        self.owners.insert(
            id.to_string(),
            Owner {
                id: id.to_string(),
                store,
                snapshot: SlotSnapshot::default(),
                stale,
            },
        );
        tracing::debug!("owner {id} active");
    }

    // -----------------------------------------------------------------------
    // Driver
    // -----------------------------------------------------------------------

    /// Advance both polling cadences by the frame delta and fire any due
    /// deferred projection rebuilds. Called once per frame by the host.
    pub fn tick(&mut self, dt: Duration) {
        // Deferred cadence only accumulates while there is work; an empty
        // set costs nothing per frame.
        if !self.deferred.is_empty() {
            self.deferred_elapsed += dt;
            if self.deferred_elapsed >= self.options.deferred_check_interval {
                self.deferred_elapsed = Duration::ZERO;
                self.retry_deferred();
            }
        } else {
            self.deferred_elapsed = Duration::ZERO;
        }

        self.changed_elapsed += dt;
        if self.changed_elapsed >= self.options.changed_check_interval {
            self.changed_elapsed = Duration::ZERO;
            self.run_changed_checks();
        }

        self.fire_pending_rebuilds();
    }

    fn retry_deferred(&mut self) {
        let ready: Vec<(String, String)> = self
            .deferred
            .iter()
            .filter(|(id, _)| self.host.is_ready(id))
            .map(|(id, class)| (id.clone(), class.clone()))
            .collect();
        for (id, classification) in ready {
            self.deferred.remove(&id);
            self.activate(&id, &classification);
            self.metrics.promotions.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("owner {id} ready; promoted from deferred set");
        }
    }

    fn run_changed_checks(&mut self) {
        let host = &*self.host;
        let metrics = &self.metrics;
        for owner in self.owners.values_mut() {
            // One malformed owner must not halt the rest: its check is
            // isolated, logged, and skipped for this cycle.
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                poll_changes(host, &owner.id, &mut owner.snapshot, &mut owner.store, metrics);
            }));
            if outcome.is_err() {
                metrics.isolated_failures.fetch_add(1, Ordering::Relaxed);
                tracing::error!("changed check panicked for owner {}; skipped", owner.id);
            }
        }
    }

    fn fire_pending_rebuilds(&mut self) {
        if self.pending_rebuilds.is_empty() {
            return;
        }
        let mut due = Vec::new();
        self.pending_rebuilds.retain_mut(|p| {
            p.ticks_left = p.ticks_left.saturating_sub(1);
            if p.ticks_left == 0 {
                due.push(p.owner.clone());
                false
            } else {
                true
            }
        });
        for id in due {
            self.rebuild_projection(&id);
        }
    }

    // -----------------------------------------------------------------------
    // Projection
    // -----------------------------------------------------------------------

    /// Lazy pull: the host is about to display this owner's projection.
    /// Rebuilds only when a sibling's mutation left it stale.
    pub fn projection_opening(&mut self, id: &str) {
        let Some(owner) = self.owners.get_mut(id) else {
            return;
        };
        if !owner.stale.load(Ordering::Relaxed) {
            return;
        }
        // A sibling wrote the shared document; drop the in-memory copy so
        // the rebuild reads the current state.
        owner.store.reload();
        self.rebuild_projection(id);
    }

    fn rebuild_projection(&mut self, id: &str) {
        let resolver = &self.options.resolver;
        let Some(owner) = self.owners.get_mut(id) else {
            return;
        };
        owner.stale.store(false, Ordering::Relaxed);
        let entries: Vec<(String, String)> = owner
            .store
            .entries()
            .iter()
            .map(|raw| (raw.clone(), resolver.resolve(raw)))
            .collect();
        self.sink.render_list(id, &entries);
    }

    // -----------------------------------------------------------------------
    // User actions
    // -----------------------------------------------------------------------

    /// The user picked an entry from the projection. The host attempts to
    /// use it; an entry that fails to load the same way slot validation
    /// fails is dropped from the list. Returns whether the use succeeded.
    pub fn select_entry(&mut self, id: &str, raw: &str) -> bool {
        if !self.owners.contains_key(id) {
            tracing::warn!("select_entry for unknown owner {id}");
            return false;
        }
        if self.host.use_entry(id, raw) {
            return true;
        }
        tracing::warn!("entry {raw:?} failed to load for owner {id}; removing from recents");
        if let Some(owner) = self.owners.get_mut(id) {
            owner.store.remove(raw);
        }
        self.schedule_rebuild(id);
        false
    }

    /// Explicit removal by position (right-click on a row).
    pub fn remove_entry_at(&mut self, id: &str, index: usize) -> bool {
        let Some(owner) = self.owners.get_mut(id) else {
            tracing::warn!("remove_entry_at for unknown owner {id}");
            return false;
        };
        let removed = owner.store.remove_at(index);
        if removed {
            self.schedule_rebuild(id);
        }
        removed
    }

    fn schedule_rebuild(&mut self, id: &str) {
        let delay = self.options.rebuild_delay_ticks;
        if delay == 0 {
            self.rebuild_projection(id);
            return;
        }
        if let Some(pending) = self.pending_rebuilds.iter_mut().find(|p| p.owner == id) {
            pending.ticks_left = delay;
        } else {
            self.pending_rebuilds.push(PendingRebuild {
                owner: id.to_string(),
                ticks_left: delay,
            });
        }
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    pub fn is_active(&self, id: &str) -> bool {
        self.owners.contains_key(id)
    }

    pub fn is_deferred(&self, id: &str) -> bool {
        self.deferred.contains_key(id)
    }

    /// Current recency list for an active owner, most recent first.
    pub fn entries_for(&mut self, id: &str) -> Option<Vec<String>> {
        self.owners
            .get_mut(id)
            .map(|owner| owner.store.entries().to_vec())
    }

    pub fn metrics(&self) -> &DetectorMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    /// Scriptable host shared with the test through an Arc handle.
    #[derive(Default)]
    struct HostState {
        ready: HashSet<String>,
        /// owner id -> slots of (value, valid)
        slots: HashMap<String, Vec<(String, bool)>>,
        usable: HashSet<String>,
        panic_on: HashSet<String>,
    }

    #[derive(Clone, Default)]
    struct FakeHost(Arc<Mutex<HostState>>);

    impl FakeHost {
        fn mark_ready(&self, owner: &str) {
            self.0.lock().ready.insert(owner.to_string());
        }

        fn set_slots(&self, owner: &str, slots: &[(&str, bool)]) {
            self.0.lock().slots.insert(
                owner.to_string(),
                slots.iter().map(|(v, ok)| (v.to_string(), *ok)).collect(),
            );
        }

        fn mark_usable(&self, entry: &str) {
            self.0.lock().usable.insert(entry.to_string());
        }

        fn panic_on(&self, owner: &str) {
            self.0.lock().panic_on.insert(owner.to_string());
        }
    }

    impl SlotHost for FakeHost {
        fn is_ready(&self, owner: &str) -> bool {
            self.0.lock().ready.contains(owner)
        }

        fn slot_count(&self, owner: &str) -> usize {
            let panic_requested = self.0.lock().panic_on.contains(owner);
            if panic_requested {
                panic!("host lookup failed for {owner}");
            }
            self.0.lock().slots.get(owner).map_or(0, Vec::len)
        }

        fn slot_value(&self, owner: &str, index: usize) -> String {
            self.0
                .lock()
                .slots
                .get(owner)
                .and_then(|s| s.get(index))
                .map(|(v, _)| v.clone())
                .unwrap_or_default()
        }

        fn validate_slot(&self, owner: &str, index: usize) -> bool {
            self.0
                .lock()
                .slots
                .get(owner)
                .and_then(|s| s.get(index))
                .is_some_and(|(_, ok)| *ok)
        }

        fn use_entry(&self, _owner: &str, entry: &str) -> bool {
            self.0.lock().usable.contains(entry)
        }
    }

    type Render = (String, Vec<(String, String)>);

    #[derive(Clone, Default)]
    struct RecordingSink(Arc<Mutex<Vec<Render>>>);

    impl RecordingSink {
        fn renders(&self) -> Vec<Render> {
            self.0.lock().clone()
        }
    }

    impl ProjectionSink for RecordingSink {
        fn render_list(&self, owner: &str, entries: &[(String, String)]) {
            self.0.lock().push((owner.to_string(), entries.to_vec()));
        }
    }

    struct Fixture {
        _dir: TempDir,
        host: FakeHost,
        sink: RecordingSink,
        engine: RecentsEngine,
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn fixture() -> Fixture {
        init_tracing();
        let dir = TempDir::new().unwrap();
        let host = FakeHost::default();
        let sink = RecordingSink::default();
        let options = EngineOptions {
            config_dir: dir.path().to_path_buf(),
            ..EngineOptions::default()
        };
        let engine = RecentsEngine::new(options, Box::new(host.clone()), Box::new(sink.clone()));
        Fixture {
            _dir: dir,
            host,
            sink,
            engine,
        }
    }

    /// One full changed-check interval in a single tick.
    const POLL: Duration = CHANGED_CHECK_INTERVAL;

    #[test]
    fn ready_entity_becomes_active_immediately() {
        let mut f = fixture();
        f.host.mark_ready("o1");
        f.engine.on_entity_added("o1", "People");
        assert!(f.engine.is_active("o1"));
        assert!(!f.engine.is_deferred("o1"));
    }

    #[test]
    fn not_ready_entity_is_deferred_then_promoted() {
        let mut f = fixture();
        f.engine.on_entity_added("o1", "People");
        assert!(f.engine.is_deferred("o1"));

        // Still not ready after an interval: stays deferred.
        f.engine.tick(DEFERRED_CHECK_INTERVAL);
        assert!(f.engine.is_deferred("o1"));

        f.host.mark_ready("o1");
        f.engine.tick(DEFERRED_CHECK_INTERVAL);
        assert!(f.engine.is_active("o1"));
        assert_eq!(f.engine.metrics().promotions.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn readiness_retry_waits_for_the_interval() {
        let mut f = fixture();
        f.engine.on_entity_added("o1", "People");
        f.host.mark_ready("o1");

        f.engine.tick(DEFERRED_CHECK_INTERVAL / 4);
        assert!(f.engine.is_deferred("o1"), "cadence has not elapsed yet");

        f.engine.tick(DEFERRED_CHECK_INTERVAL);
        assert!(f.engine.is_active("o1"));
    }

    #[test]
    fn changed_check_feeds_new_slot_values_into_recents() {
        let mut f = fixture();
        f.host.mark_ready("o1");
        f.host.set_slots("o1", &[("v1", true), ("v2", true)]);
        f.engine.on_entity_added("o1", "People");

        f.engine.tick(POLL);
        assert_eq!(f.engine.entries_for("o1").unwrap(), ["v2", "v1"]);

        f.host.set_slots("o1", &[("v1", true), ("v2", true), ("v3", true)]);
        let before = f.engine.metrics().accepted.load(Ordering::Relaxed);
        f.engine.tick(POLL);
        assert_eq!(f.engine.entries_for("o1").unwrap(), ["v3", "v2", "v1"]);
        assert_eq!(
            f.engine.metrics().accepted.load(Ordering::Relaxed) - before,
            1
        );
    }

    #[test]
    fn one_panicking_owner_does_not_stop_the_others() {
        let mut f = fixture();
        f.host.mark_ready("bad");
        f.host.mark_ready("good");
        f.host.set_slots("good", &[("v1", true)]);
        f.engine.on_entity_added("bad", "People");
        f.engine.on_entity_added("good", "Props");
        f.host.panic_on("bad");

        f.engine.tick(POLL);

        assert_eq!(f.engine.entries_for("good").unwrap(), ["v1"]);
        assert_eq!(
            f.engine.metrics().isolated_failures.load(Ordering::Relaxed),
            1
        );
    }

    #[test]
    fn projection_opening_rebuilds_once_until_stale_again() {
        let mut f = fixture();
        f.host.mark_ready("o1");
        f.host.set_slots("o1", &[("Foo.Bar.3:/scripts/x.cs", true)]);
        f.engine.on_entity_added("o1", "People");
        f.engine.tick(POLL);

        // Owners start stale, so the first open renders.
        f.engine.projection_opening("o1");
        let renders = f.sink.renders();
        assert_eq!(renders.len(), 1);
        assert_eq!(renders[0].0, "o1");
        assert_eq!(
            renders[0].1,
            [("Foo.Bar.3:/scripts/x.cs".to_string(), "Bar:x.cs".to_string())]
        );

        // Flag is cleared: reopening without a sibling mutation is free.
        f.engine.projection_opening("o1");
        assert_eq!(f.sink.renders().len(), 1);
    }

    #[test]
    fn sibling_mutation_marks_peers_stale_and_rebuild_sees_the_write() {
        let mut f = fixture();
        f.host.mark_ready("o1");
        f.host.mark_ready("o2");
        f.host.set_slots("o1", &[("v1", true)]);
        f.engine.on_entity_added("o1", "People");
        f.engine.on_entity_added("o2", "People");
        f.engine.tick(POLL);

        // Drain both initial projections.
        f.engine.projection_opening("o1");
        f.engine.projection_opening("o2");
        let drained = f.sink.renders().len();

        // o1 mutates via a user removal; o2 shares the group key.
        f.engine.remove_entry_at("o1", 0);

        f.engine.projection_opening("o2");
        let renders = f.sink.renders();
        assert_eq!(renders.len(), drained + 1);
        let (owner, entries) = renders.last().unwrap();
        assert_eq!(owner, "o2");
        assert!(entries.is_empty(), "o2 re-read the shared document");
    }

    #[test]
    fn group_isolation_across_different_keys() {
        let mut f = fixture();
        f.host.mark_ready("o1");
        f.host.mark_ready("o2");
        f.host.set_slots("o1", &[("v1", true)]);
        f.engine.on_entity_added("o1", "People");
        f.engine.on_entity_added("o2", "Props");
        f.engine.tick(POLL);
        f.engine.projection_opening("o1");
        f.engine.projection_opening("o2");
        let drained = f.sink.renders().len();

        f.engine.remove_entry_at("o1", 0);

        // o2 is in another group: still clean, no rebuild on open.
        f.engine.projection_opening("o2");
        assert_eq!(f.sink.renders().len(), drained);
    }

    #[test]
    fn user_action_rerender_fires_after_the_settle_delay() {
        let mut f = fixture();
        f.host.mark_ready("o1");
        f.host.set_slots("o1", &[("v1", true), ("v2", true)]);
        f.engine.on_entity_added("o1", "People");
        f.engine.tick(POLL);
        f.engine.projection_opening("o1");
        let drained = f.sink.renders().len();

        f.engine.remove_entry_at("o1", 0);
        assert_eq!(f.sink.renders().len(), drained, "render is deferred");

        f.engine.tick(Duration::from_millis(1));
        assert_eq!(f.sink.renders().len(), drained, "one tick is not enough");

        f.engine.tick(Duration::from_millis(1));
        let renders = f.sink.renders();
        assert_eq!(renders.len(), drained + 1);
        let (_, entries) = renders.last().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "v1");
    }

    #[test]
    fn destroying_an_owner_drops_its_pending_rebuild() {
        let mut f = fixture();
        f.host.mark_ready("o1");
        f.host.set_slots("o1", &[("v1", true)]);
        f.engine.on_entity_added("o1", "People");
        f.engine.tick(POLL);
        let drained = f.sink.renders().len();

        f.engine.remove_entry_at("o1", 0);
        f.engine.on_entity_removed("o1");

        f.engine.tick(Duration::from_millis(1));
        f.engine.tick(Duration::from_millis(1));
        assert_eq!(f.sink.renders().len(), drained, "rebuild was dropped");
        assert!(!f.engine.is_active("o1"));
    }

    #[test]
    fn select_entry_failure_removes_it_from_recents() {
        let mut f = fixture();
        f.host.mark_ready("o1");
        f.host.set_slots("o1", &[("v1", true), ("v2", true)]);
        f.engine.on_entity_added("o1", "People");
        f.engine.tick(POLL);
        f.host.mark_usable("v2");

        assert!(f.engine.select_entry("o1", "v2"));
        assert_eq!(f.engine.entries_for("o1").unwrap(), ["v2", "v1"]);

        assert!(!f.engine.select_entry("o1", "v1"));
        assert_eq!(f.engine.entries_for("o1").unwrap(), ["v2"]);
    }

    #[test]
    fn persisted_lists_survive_owner_recreation() {
        let mut f = fixture();
        f.host.mark_ready("o1");
        f.host.set_slots("o1", &[("v1", true)]);
        f.engine.on_entity_added("o1", "People");
        f.engine.tick(POLL);
        f.engine.on_entity_removed("o1");

        // Same classification, different entity: shares the group document.
        f.host.mark_ready("o9");
        f.engine.on_entity_added("o9", "People");
        assert_eq!(f.engine.entries_for("o9").unwrap(), ["v1"]);
    }

    #[test]
    fn container_reload_rebuilds_both_sets() {
        let mut f = fixture();
        f.host.mark_ready("o1");
        f.engine.on_entity_added("o1", "People");
        f.engine.on_entity_added("o2", "Props");
        assert!(f.engine.is_active("o1"));
        assert!(f.engine.is_deferred("o2"));

        f.host.mark_ready("o3");
        f.engine.on_container_reloaded(&[
            ("o3".to_string(), "People".to_string()),
            ("o4".to_string(), "Props".to_string()),
        ]);

        assert!(!f.engine.is_active("o1"));
        assert!(!f.engine.is_deferred("o2"));
        assert!(f.engine.is_active("o3"));
        assert!(f.engine.is_deferred("o4"));
    }

    #[test]
    fn duplicate_entity_add_is_ignored() {
        let mut f = fixture();
        f.host.mark_ready("o1");
        f.engine.on_entity_added("o1", "People");
        f.engine.on_entity_added("o1", "People");
        assert!(f.engine.is_active("o1"));
        assert_eq!(f.engine.registry.lock().len(), 1);
    }

    #[test]
    fn actions_on_unknown_owners_are_no_ops() {
        let mut f = fixture();
        assert!(!f.engine.select_entry("ghost", "v1"));
        assert!(!f.engine.remove_entry_at("ghost", 0));
        f.engine.projection_opening("ghost");
        assert!(f.sink.renders().is_empty());
    }
}
