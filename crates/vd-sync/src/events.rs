//! Append-only sync audit log and its query pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::conflict::ResolutionStrategy;

/// Event-type tag, used for filtering and search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncEventType {
    CircuitUpdated,
    CircuitDeleted,
    ScheduleUpdated,
    ScheduleDeleted,
    ConflictDetected,
    ConflictResolved,
    SyncStarted,
    SyncCompleted,
}

impl SyncEventType {
    pub fn label(self) -> &'static str {
        match self {
            SyncEventType::CircuitUpdated => "circuit-updated",
            SyncEventType::CircuitDeleted => "circuit-deleted",
            SyncEventType::ScheduleUpdated => "schedule-updated",
            SyncEventType::ScheduleDeleted => "schedule-deleted",
            SyncEventType::ConflictDetected => "conflict-detected",
            SyncEventType::ConflictResolved => "conflict-resolved",
            SyncEventType::SyncStarted => "sync-started",
            SyncEventType::SyncCompleted => "sync-completed",
        }
    }
}

/// Which side of the system produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncSource {
    VoltageDropView,
    LoadScheduleView,
    System,
}

impl SyncSource {
    pub fn label(self) -> &'static str {
        match self {
            SyncSource::VoltageDropView => "voltage-drop-view",
            SyncSource::LoadScheduleView => "load-schedule-view",
            SyncSource::System => "system",
        }
    }
}

/// Typed payload, one variant per event type; each carries only the fields
/// relevant to that type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SyncEventPayload {
    CircuitUpdated {
        circuit_id: String,
        changed_properties: Vec<String>,
    },
    CircuitDeleted {
        circuit_id: String,
    },
    ScheduleUpdated {
        schedule_id: String,
        item_count: usize,
    },
    ScheduleDeleted {
        schedule_id: String,
    },
    ConflictDetected {
        conflict_id: Uuid,
        circuit_id: String,
        comparison_count: usize,
    },
    ConflictResolved {
        conflict_id: Uuid,
        strategy: ResolutionStrategy,
    },
    SyncStarted,
    SyncCompleted {
        circuits_checked: usize,
        conflicts_found: usize,
    },
}

impl SyncEventPayload {
    pub fn event_type(&self) -> SyncEventType {
        match self {
            SyncEventPayload::CircuitUpdated { .. } => SyncEventType::CircuitUpdated,
            SyncEventPayload::CircuitDeleted { .. } => SyncEventType::CircuitDeleted,
            SyncEventPayload::ScheduleUpdated { .. } => SyncEventType::ScheduleUpdated,
            SyncEventPayload::ScheduleDeleted { .. } => SyncEventType::ScheduleDeleted,
            SyncEventPayload::ConflictDetected { .. } => SyncEventType::ConflictDetected,
            SyncEventPayload::ConflictResolved { .. } => SyncEventType::ConflictResolved,
            SyncEventPayload::SyncStarted => SyncEventType::SyncStarted,
            SyncEventPayload::SyncCompleted { .. } => SyncEventType::SyncCompleted,
        }
    }
}

/// One audit entry. Immutable once appended; `seq` makes ordering
/// deterministic when timestamps collide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncEvent {
    pub id: Uuid,
    pub seq: u64,
    pub timestamp: DateTime<Utc>,
    pub source: SyncSource,
    pub message: String,
    pub payload: SyncEventPayload,
}

impl SyncEvent {
    pub fn event_type(&self) -> SyncEventType {
        self.payload.event_type()
    }
}

/// Filter for the audit log. Every predicate is independent; an empty
/// value short-circuits its predicate.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub types: Vec<SyncEventType>,
    pub sources: Vec<SyncSource>,
    /// Inclusive lower bound.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound.
    pub to: Option<DateTime<Utc>>,
    /// Case-insensitive substring over type, source, and message.
    pub search: Option<String>,
    pub offset: usize,
    pub limit: Option<usize>,
}

/// One page of matches plus the total match count before paging.
#[derive(Debug, Clone, PartialEq)]
pub struct EventPage {
    pub events: Vec<SyncEvent>,
    pub total: usize,
}

/// Filter, sort newest-first, then paginate. Deterministic for any input.
pub fn query_events(events: &[SyncEvent], filter: &EventFilter) -> EventPage {
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut matched: Vec<&SyncEvent> = events
        .iter()
        .filter(|e| filter.types.is_empty() || filter.types.contains(&e.event_type()))
        .filter(|e| filter.sources.is_empty() || filter.sources.contains(&e.source))
        .filter(|e| filter.from.map_or(true, |t| e.timestamp >= t))
        .filter(|e| filter.to.map_or(true, |t| e.timestamp <= t))
        .filter(|e| match &needle {
            None => true,
            Some(needle) => {
                e.event_type().label().contains(needle)
                    || e.source.label().contains(needle)
                    || e.message.to_lowercase().contains(needle)
            }
        })
        .collect();

    matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.seq.cmp(&a.seq)));

    let total = matched.len();
    let events = matched
        .into_iter()
        .skip(filter.offset)
        .take(filter.limit.unwrap_or(usize::MAX))
        .cloned()
        .collect();

    EventPage { events, total }
}
