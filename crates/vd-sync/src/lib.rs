//! vd-sync: dual-view circuit/load-schedule synchronization.
//!
//! Owns the canonical circuit and load-schedule collections, detects and
//! resolves conflicts between the voltage-drop and load-schedule views,
//! tracks which edits invalidate cached results, and maintains undo/redo
//! history plus an append-only audit event log.

pub mod conflict;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod history;
pub mod tracker;
pub mod types;

pub use conflict::{
    compare_views, Conflict, ConflictSeverity, PropertyComparison, ResolutionStrategy,
};
pub use coordinator::{PairingState, SyncCoordinator, SyncOutcome, SyncStats};
pub use error::{SyncError, SyncResult};
pub use events::{
    query_events, EventFilter, EventPage, SyncEvent, SyncEventPayload, SyncEventType, SyncSource,
};
pub use history::{HistoryStack, StateSnapshot};
pub use tracker::{ChangeTracker, PropertyChange, PropertyValue, RECALCULATION_PROPERTIES};
pub use types::{LoadItem, LoadSchedule, UnifiedCircuitData};
