//! Recently-used resource tracking for the AUI host plugin.
//!
//! One engine instance per feature owns a set of live "owners" (one per host
//! entity), each with a bounded, deduplicated, persisted recency list.
//! Owners sharing a classification key share persisted state and invalidate
//! each other's cached projections; externally-driven changes are discovered
//! by polling the host's slots, since the host emits no change events for
//! them. Display labels come from ordered regex tables and always resolve to
//! something usable.

pub mod config;
pub mod detector;
pub mod engine;
pub mod groups;
pub mod metrics;
pub mod resolver;
pub mod store;

pub use config::{default_config_dir, recents_path};
pub use detector::{SlotHost, SlotSnapshot};
pub use engine::{
    CHANGED_CHECK_INTERVAL, DEFERRED_CHECK_INTERVAL, EngineOptions, ProjectionSink, REBUILD_DELAY_TICKS,
    RecentsEngine,
};
pub use groups::{GroupKey, GroupKeyFn, GroupRegistry, SharedRegistry};
pub use metrics::DetectorMetrics;
pub use resolver::{DisplayNameResolver, DisplayRule};
pub use store::{MAX_RECENT, RecencyStore};
