//! Owns the canonical circuit and load-schedule collections and keeps the
//! two calculator views consistent.
//!
//! Every mutation follows the same shape: push a full-state snapshot onto
//! the undo history, apply the edit, feed field-level diffs to the change
//! tracker, append an audit event, then re-run conflict detection for the
//! touched pairings. A single coordinator instance is owned by the
//! composition root and passed by reference to both front ends; exclusive
//! access comes from `&mut self`, not from internal locking.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::conflict::{compare_views, Conflict, ResolutionStrategy};
use crate::error::{SyncError, SyncResult};
use crate::events::{
    query_events, EventFilter, EventPage, SyncEvent, SyncEventPayload, SyncSource,
};
use crate::history::{HistoryStack, StateSnapshot};
use crate::tracker::{ChangeTracker, PropertyValue};
use crate::types::{LoadSchedule, UnifiedCircuitData};

/// Conceptual state of one circuit/load-schedule pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingState {
    InSync,
    Dirty,
    Conflicted,
    Resolved,
}

/// Aggregate counters surfaced to the status bar.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncStats {
    pub circuit_count: usize,
    pub schedule_count: usize,
    pub changed_since_sync: usize,
    pub open_conflicts: usize,
    pub last_sync: Option<DateTime<Utc>>,
}

/// Outcome of a `sync_now` call. A call while another is in flight is a
/// no-op; callers retry rather than queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Completed {
        circuits_checked: usize,
        conflicts_found: usize,
    },
    AlreadyInFlight,
}

pub struct SyncCoordinator {
    circuits: BTreeMap<String, UnifiedCircuitData>,
    load_schedules: BTreeMap<String, LoadSchedule>,
    conflicts: Vec<Conflict>,
    events: Vec<SyncEvent>,
    history: HistoryStack,
    tracker: ChangeTracker,
    next_seq: u64,
    changed_since_sync: usize,
    last_sync: Option<DateTime<Utc>>,
    is_syncing: bool,
}

impl SyncCoordinator {
    pub fn new() -> Self {
        Self {
            circuits: BTreeMap::new(),
            load_schedules: BTreeMap::new(),
            conflicts: Vec::new(),
            events: Vec::new(),
            history: HistoryStack::new(),
            tracker: ChangeTracker::new(),
            next_seq: 0,
            changed_since_sync: 0,
            last_sync: None,
            is_syncing: false,
        }
    }

    fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            circuits: self.circuits.clone(),
            load_schedules: self.load_schedules.clone(),
            conflicts: self.conflicts.clone(),
        }
    }

    fn restore(&mut self, snapshot: StateSnapshot) {
        self.circuits = snapshot.circuits;
        self.load_schedules = snapshot.load_schedules;
        self.conflicts = snapshot.conflicts;
    }

    fn append_event(&mut self, source: SyncSource, message: String, payload: SyncEventPayload) {
        let event = SyncEvent {
            id: Uuid::new_v4(),
            seq: self.next_seq,
            timestamp: Utc::now(),
            source,
            message,
            payload,
        };
        self.next_seq += 1;
        self.events.push(event);
    }

    /// Create or replace a circuit record. Field-level diffs against the
    /// previous record feed the change tracker.
    pub fn upsert_circuit(&mut self, circuit: UnifiedCircuitData, source: SyncSource) {
        let snapshot = self.snapshot();
        self.history.record(snapshot);

        let changes = match self.circuits.get(&circuit.id) {
            Some(existing) => diff_circuit(existing, &circuit),
            None => Vec::new(),
        };
        for (property, previous, updated) in &changes {
            self.tracker
                .record(&circuit.id, property, previous.clone(), updated.clone());
        }
        let changed_properties: Vec<String> =
            changes.into_iter().map(|(property, _, _)| property).collect();

        let circuit_id = circuit.id.clone();
        let message = format!("Circuit {} updated", circuit_id);
        tracing::debug!(
            circuit_id = %circuit_id,
            changed = changed_properties.len(),
            "circuit upserted"
        );

        self.circuits.insert(circuit_id.clone(), circuit);
        self.changed_since_sync += 1;
        self.append_event(
            source,
            message,
            SyncEventPayload::CircuitUpdated {
                circuit_id: circuit_id.clone(),
                changed_properties,
            },
        );

        self.detect_conflict_for(&circuit_id);
    }

    /// Remove a circuit. Returns false (no snapshot, no event) for an
    /// unknown id.
    pub fn delete_circuit(&mut self, circuit_id: &str, source: SyncSource) -> bool {
        if !self.circuits.contains_key(circuit_id) {
            return false;
        }
        let snapshot = self.snapshot();
        self.history.record(snapshot);

        self.circuits.remove(circuit_id);
        self.tracker.clear_circuit(circuit_id);
        self.changed_since_sync += 1;
        self.append_event(
            source,
            format!("Circuit {} deleted", circuit_id),
            SyncEventPayload::CircuitDeleted {
                circuit_id: circuit_id.to_string(),
            },
        );
        true
    }

    /// Create or replace a load schedule, then re-check every circuit it
    /// references.
    pub fn upsert_load_schedule(&mut self, schedule: LoadSchedule, source: SyncSource) {
        let snapshot = self.snapshot();
        self.history.record(snapshot);

        let schedule_id = schedule.id.clone();
        let item_count = schedule.items.len();
        let circuit_ids: Vec<String> = schedule
            .items
            .iter()
            .map(|item| item.circuit_id.clone())
            .collect();
        let message = format!("Load schedule {} updated", schedule_id);
        tracing::debug!(
            schedule_id = %schedule_id,
            items = item_count,
            "load schedule upserted"
        );

        self.load_schedules.insert(schedule_id.clone(), schedule);
        self.changed_since_sync += 1;
        self.append_event(
            source,
            message,
            SyncEventPayload::ScheduleUpdated {
                schedule_id,
                item_count,
            },
        );

        for circuit_id in circuit_ids {
            self.detect_conflict_for(&circuit_id);
        }
    }

    /// Remove a load schedule. Returns false for an unknown id.
    pub fn delete_load_schedule(&mut self, schedule_id: &str, source: SyncSource) -> bool {
        if !self.load_schedules.contains_key(schedule_id) {
            return false;
        }
        let snapshot = self.snapshot();
        self.history.record(snapshot);

        self.load_schedules.remove(schedule_id);
        self.changed_since_sync += 1;
        self.append_event(
            source,
            format!("Load schedule {} deleted", schedule_id),
            SyncEventPayload::ScheduleDeleted {
                schedule_id: schedule_id.to_string(),
            },
        );
        true
    }

    /// Compare both views of one circuit and open a conflict on divergence.
    /// At most one conflict per circuit is open at a time. Returns true
    /// when a new conflict was opened.
    fn detect_conflict_for(&mut self, circuit_id: &str) -> bool {
        let comparisons = {
            let circuit = match self.circuits.get(circuit_id) {
                Some(circuit) => circuit,
                None => return false,
            };
            let item = self
                .load_schedules
                .values()
                .find_map(|schedule| schedule.item_for_circuit(circuit_id));
            match item {
                Some(item) => compare_views(circuit, item),
                None => return false,
            }
        };

        if comparisons.is_empty() {
            return false;
        }
        if self
            .conflicts
            .iter()
            .any(|c| c.circuit_id == circuit_id && !c.resolved)
        {
            return false;
        }

        let conflict = Conflict {
            id: Uuid::new_v4(),
            circuit_id: circuit_id.to_string(),
            comparisons,
            resolved: false,
            resolution: None,
            detected_at: Utc::now(),
        };
        let message = format!(
            "Conflict detected on circuit {}: {} differing propert{}",
            circuit_id,
            conflict.comparisons.len(),
            if conflict.comparisons.len() == 1 { "y" } else { "ies" },
        );
        tracing::info!(
            circuit_id = %circuit_id,
            comparisons = conflict.comparisons.len(),
            severity = ?conflict.severity(),
            "conflict detected"
        );
        let payload = SyncEventPayload::ConflictDetected {
            conflict_id: conflict.id,
            circuit_id: circuit_id.to_string(),
            comparison_count: conflict.comparisons.len(),
        };
        self.conflicts.push(conflict);
        self.append_event(SyncSource::System, message, payload);
        true
    }

    /// Settle an open conflict. Critical conflicts accept only the manual
    /// strategy; winner strategies propagate the winning side's values.
    pub fn resolve_conflict(
        &mut self,
        conflict_id: Uuid,
        strategy: ResolutionStrategy,
    ) -> SyncResult<()> {
        let idx = self
            .conflicts
            .iter()
            .position(|c| c.id == conflict_id)
            .ok_or(SyncError::UnknownConflict { id: conflict_id })?;
        if self.conflicts[idx].resolved {
            return Err(SyncError::AlreadyResolved { id: conflict_id });
        }
        if self.conflicts[idx].has_critical() && strategy != ResolutionStrategy::Manual {
            return Err(SyncError::ManualResolutionRequired { id: conflict_id });
        }

        let snapshot = self.snapshot();
        self.history.record(snapshot);

        let circuit_id = self.conflicts[idx].circuit_id.clone();
        match strategy {
            ResolutionStrategy::VoltageDropWins => self.propagate_circuit_to_schedule(&circuit_id),
            ResolutionStrategy::ScheduleWins => self.propagate_schedule_to_circuit(&circuit_id),
            ResolutionStrategy::Manual | ResolutionStrategy::Merge => {}
        }

        let conflict = &mut self.conflicts[idx];
        conflict.resolved = true;
        conflict.resolution = Some(strategy);
        tracing::info!(circuit_id = %circuit_id, strategy = ?strategy, "conflict resolved");

        self.append_event(
            SyncSource::System,
            format!("Conflict on circuit {} resolved", circuit_id),
            SyncEventPayload::ConflictResolved {
                conflict_id,
                strategy,
            },
        );
        Ok(())
    }

    fn propagate_circuit_to_schedule(&mut self, circuit_id: &str) {
        let circuit = match self.circuits.get(circuit_id) {
            Some(circuit) => circuit.clone(),
            None => return,
        };
        for schedule in self.load_schedules.values_mut() {
            let mut touched = false;
            for item in schedule
                .items
                .iter_mut()
                .filter(|item| item.circuit_id == circuit_id)
            {
                item.conductor_size = circuit.conductor_size;
                item.load_current_a = circuit.load_current_a;
                item.voltage_v = circuit.system_voltage_v;
                item.breaker_rating_a = circuit.breaker_rating_a;
                item.phase = circuit.phase;
                item.notes = circuit.notes.clone();
                touched = true;
            }
            if touched {
                schedule.last_modified = Utc::now();
            }
        }
    }

    fn propagate_schedule_to_circuit(&mut self, circuit_id: &str) {
        let item = self
            .load_schedules
            .values()
            .find_map(|schedule| schedule.item_for_circuit(circuit_id))
            .cloned();
        let item = match item {
            Some(item) => item,
            None => return,
        };
        if let Some(circuit) = self.circuits.get_mut(circuit_id) {
            // The schedule is authoritative; route the edits through the
            // tracker like any other mutation.
            self.tracker.record(
                circuit_id,
                "conductor_size",
                PropertyValue::Text(circuit.conductor_size.to_string()),
                PropertyValue::Text(item.conductor_size.to_string()),
            );
            self.tracker.record(
                circuit_id,
                "load_current_a",
                circuit.load_current_a.into(),
                item.load_current_a.into(),
            );
            self.tracker.record(
                circuit_id,
                "system_voltage_v",
                circuit.system_voltage_v.into(),
                item.voltage_v.into(),
            );
            self.tracker.record(
                circuit_id,
                "phase",
                PropertyValue::Text(circuit.phase.to_string()),
                PropertyValue::Text(item.phase.to_string()),
            );

            circuit.conductor_size = item.conductor_size;
            circuit.load_current_a = item.load_current_a;
            circuit.system_voltage_v = item.voltage_v;
            circuit.breaker_rating_a = item.breaker_rating_a;
            circuit.phase = item.phase;
            circuit.notes = item.notes;
            circuit.last_modified = Utc::now();
        }
    }

    /// Run conflict detection over every pairing. Single-flight: a call
    /// while one is in flight returns `AlreadyInFlight` and does nothing.
    pub fn sync_now(&mut self) -> SyncOutcome {
        if self.is_syncing {
            return SyncOutcome::AlreadyInFlight;
        }
        self.is_syncing = true;

        self.append_event(
            SyncSource::System,
            "Synchronization started".to_string(),
            SyncEventPayload::SyncStarted,
        );

        let circuit_ids: Vec<String> = self.circuits.keys().cloned().collect();
        let mut conflicts_found = 0;
        for circuit_id in &circuit_ids {
            if self.detect_conflict_for(circuit_id) {
                conflicts_found += 1;
            }
        }

        self.changed_since_sync = 0;
        self.last_sync = Some(Utc::now());
        self.append_event(
            SyncSource::System,
            format!(
                "Synchronization completed: {} circuit(s) checked, {} conflict(s) found",
                circuit_ids.len(),
                conflicts_found,
            ),
            SyncEventPayload::SyncCompleted {
                circuits_checked: circuit_ids.len(),
                conflicts_found,
            },
        );
        tracing::info!(
            circuits = circuit_ids.len(),
            conflicts = conflicts_found,
            "sync completed"
        );

        self.is_syncing = false;
        SyncOutcome::Completed {
            circuits_checked: circuit_ids.len(),
            conflicts_found,
        }
    }

    pub fn is_syncing(&self) -> bool {
        self.is_syncing
    }

    /// Restore the previous snapshot. No-op at the bottom of the stack.
    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Re-apply the next snapshot. No-op at the top of the stack.
    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Query the audit log; see [`EventFilter`] for the pipeline.
    pub fn events(&self, filter: &EventFilter) -> EventPage {
        query_events(&self.events, filter)
    }

    pub fn event_log(&self) -> &[SyncEvent] {
        &self.events
    }

    pub fn circuit(&self, circuit_id: &str) -> Option<&UnifiedCircuitData> {
        self.circuits.get(circuit_id)
    }

    pub fn circuits(&self) -> impl Iterator<Item = &UnifiedCircuitData> {
        self.circuits.values()
    }

    pub fn load_schedule(&self, schedule_id: &str) -> Option<&LoadSchedule> {
        self.load_schedules.get(schedule_id)
    }

    pub fn load_schedules(&self) -> impl Iterator<Item = &LoadSchedule> {
        self.load_schedules.values()
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn open_conflicts(&self) -> impl Iterator<Item = &Conflict> {
        self.conflicts.iter().filter(|c| !c.resolved)
    }

    pub fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut ChangeTracker {
        &mut self.tracker
    }

    pub fn pairing_state(&self, circuit_id: &str) -> PairingState {
        if self
            .conflicts
            .iter()
            .any(|c| c.circuit_id == circuit_id && !c.resolved)
        {
            return PairingState::Conflicted;
        }
        if self.tracker.needs_recalculation(circuit_id) {
            return PairingState::Dirty;
        }
        if self
            .conflicts
            .iter()
            .any(|c| c.circuit_id == circuit_id && c.resolved)
        {
            return PairingState::Resolved;
        }
        PairingState::InSync
    }

    pub fn stats(&self) -> SyncStats {
        SyncStats {
            circuit_count: self.circuits.len(),
            schedule_count: self.load_schedules.len(),
            changed_since_sync: self.changed_since_sync,
            open_conflicts: self.open_conflicts().count(),
            last_sync: self.last_sync,
        }
    }
}

impl Default for SyncCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

fn diff_circuit(
    before: &UnifiedCircuitData,
    after: &UnifiedCircuitData,
) -> Vec<(String, PropertyValue, PropertyValue)> {
    let mut changes: Vec<(String, PropertyValue, PropertyValue)> = Vec::new();
    let mut push_text = |property: &str, a: String, b: String| {
        if a != b {
            changes.push((
                property.to_string(),
                PropertyValue::Text(a),
                PropertyValue::Text(b),
            ));
        }
    };

    push_text("name", before.name.clone(), after.name.clone());
    push_text(
        "circuit_type",
        before.circuit_type.to_string(),
        after.circuit_type.to_string(),
    );
    push_text(
        "conductor_size",
        before.conductor_size.to_string(),
        after.conductor_size.to_string(),
    );
    push_text(
        "conductor_material",
        before.conductor_material.to_string(),
        after.conductor_material.to_string(),
    );
    push_text(
        "conduit_material",
        before.conduit_material.to_string(),
        after.conduit_material.to_string(),
    );
    push_text("phase", before.phase.to_string(), after.phase.to_string());
    push_text("notes", before.notes.clone(), after.notes.clone());

    let mut push_number = |property: &str, a: f64, b: f64| {
        if a != b {
            changes.push((
                property.to_string(),
                PropertyValue::Number(a),
                PropertyValue::Number(b),
            ));
        }
    };
    push_number(
        "conductor_length_ft",
        before.conductor_length_ft,
        after.conductor_length_ft,
    );
    push_number(
        "system_voltage_v",
        before.system_voltage_v,
        after.system_voltage_v,
    );
    push_number("load_current_a", before.load_current_a, after.load_current_a);
    push_number(
        "breaker_rating_a",
        before.breaker_rating_a,
        after.breaker_rating_a,
    );

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LoadItem;
    use vd_calc::{
        CircuitType, ConductorMaterial, ConductorSize, ConduitMaterial, PhaseConfiguration,
    };

    fn circuit(id: &str, load_current_a: f64) -> UnifiedCircuitData {
        UnifiedCircuitData {
            id: id.to_string(),
            name: format!("Circuit {id}"),
            circuit_type: CircuitType::Branch,
            conductor_size: ConductorSize::Awg12,
            conductor_material: ConductorMaterial::Copper,
            conduit_material: ConduitMaterial::Pvc,
            conductor_length_ft: 80.0,
            system_voltage_v: 120.0,
            load_current_a,
            phase: PhaseConfiguration::Single,
            breaker_rating_a: 20.0,
            notes: String::new(),
            last_modified: Utc::now(),
        }
    }

    fn schedule_with_item(schedule_id: &str, item: LoadItem) -> LoadSchedule {
        LoadSchedule {
            id: schedule_id.to_string(),
            name: format!("Schedule {schedule_id}"),
            panel: "LP-1".into(),
            items: vec![item],
            last_modified: Utc::now(),
        }
    }

    fn matching_item(circuit: &UnifiedCircuitData) -> LoadItem {
        LoadItem {
            circuit_id: circuit.id.clone(),
            description: circuit.name.clone(),
            load_current_a: circuit.load_current_a,
            voltage_v: circuit.system_voltage_v,
            breaker_rating_a: circuit.breaker_rating_a,
            conductor_size: circuit.conductor_size,
            phase: circuit.phase,
            notes: circuit.notes.clone(),
        }
    }

    #[test]
    fn upsert_records_event_and_stats() {
        let mut coordinator = SyncCoordinator::new();
        coordinator.upsert_circuit(circuit("ckt-1", 16.0), SyncSource::VoltageDropView);
        let stats = coordinator.stats();
        assert_eq!(stats.circuit_count, 1);
        assert_eq!(stats.changed_since_sync, 1);
        assert_eq!(coordinator.event_log().len(), 1);
        assert!(coordinator.can_undo());
    }

    #[test]
    fn editing_a_relevant_property_marks_the_pairing_dirty() {
        let mut coordinator = SyncCoordinator::new();
        coordinator.upsert_circuit(circuit("ckt-1", 16.0), SyncSource::VoltageDropView);
        assert_eq!(coordinator.pairing_state("ckt-1"), PairingState::InSync);

        coordinator.upsert_circuit(circuit("ckt-1", 24.0), SyncSource::VoltageDropView);
        assert_eq!(coordinator.pairing_state("ckt-1"), PairingState::Dirty);
        assert!(coordinator.tracker().needs_recalculation("ckt-1"));
    }

    #[test]
    fn divergent_schedule_opens_a_conflict() {
        let mut coordinator = SyncCoordinator::new();
        let ckt = circuit("ckt-1", 16.0);
        coordinator.upsert_circuit(ckt.clone(), SyncSource::VoltageDropView);

        let mut item = matching_item(&ckt);
        item.load_current_a = 20.0;
        coordinator.upsert_load_schedule(
            schedule_with_item("ls-1", item),
            SyncSource::LoadScheduleView,
        );

        assert_eq!(coordinator.open_conflicts().count(), 1);
        assert_eq!(coordinator.pairing_state("ckt-1"), PairingState::Conflicted);
        assert_eq!(coordinator.stats().open_conflicts, 1);
    }

    #[test]
    fn at_most_one_open_conflict_per_circuit() {
        let mut coordinator = SyncCoordinator::new();
        let ckt = circuit("ckt-1", 16.0);
        coordinator.upsert_circuit(ckt.clone(), SyncSource::VoltageDropView);

        let mut item = matching_item(&ckt);
        item.load_current_a = 20.0;
        coordinator.upsert_load_schedule(
            schedule_with_item("ls-1", item),
            SyncSource::LoadScheduleView,
        );
        coordinator.sync_now();
        coordinator.sync_now();

        assert_eq!(coordinator.open_conflicts().count(), 1);
    }

    #[test]
    fn schedule_wins_propagates_to_the_circuit() {
        let mut coordinator = SyncCoordinator::new();
        let ckt = circuit("ckt-1", 16.0);
        coordinator.upsert_circuit(ckt.clone(), SyncSource::VoltageDropView);

        let mut item = matching_item(&ckt);
        item.load_current_a = 20.0;
        coordinator.upsert_load_schedule(
            schedule_with_item("ls-1", item),
            SyncSource::LoadScheduleView,
        );

        let conflict_id = coordinator.open_conflicts().next().unwrap().id;
        coordinator
            .resolve_conflict(conflict_id, ResolutionStrategy::ScheduleWins)
            .unwrap();

        assert_eq!(coordinator.circuit("ckt-1").unwrap().load_current_a, 20.0);
        assert_eq!(coordinator.open_conflicts().count(), 0);
        assert_eq!(coordinator.pairing_state("ckt-1"), PairingState::Dirty);
    }

    #[test]
    fn critical_conflicts_demand_manual_resolution() {
        let mut coordinator = SyncCoordinator::new();
        let ckt = circuit("ckt-1", 16.0);
        coordinator.upsert_circuit(ckt.clone(), SyncSource::VoltageDropView);

        let mut item = matching_item(&ckt);
        item.conductor_size = ConductorSize::Awg10;
        coordinator.upsert_load_schedule(
            schedule_with_item("ls-1", item),
            SyncSource::LoadScheduleView,
        );

        let conflict_id = coordinator.open_conflicts().next().unwrap().id;
        for strategy in [
            ResolutionStrategy::VoltageDropWins,
            ResolutionStrategy::ScheduleWins,
            ResolutionStrategy::Merge,
        ] {
            assert_eq!(
                coordinator.resolve_conflict(conflict_id, strategy),
                Err(SyncError::ManualResolutionRequired { id: conflict_id })
            );
        }
        assert_eq!(coordinator.open_conflicts().count(), 1);

        coordinator
            .resolve_conflict(conflict_id, ResolutionStrategy::Manual)
            .unwrap();
        assert_eq!(coordinator.open_conflicts().count(), 0);
    }

    #[test]
    fn resolution_misuse_is_a_typed_error() {
        let mut coordinator = SyncCoordinator::new();
        let missing = Uuid::new_v4();
        assert_eq!(
            coordinator.resolve_conflict(missing, ResolutionStrategy::Manual),
            Err(SyncError::UnknownConflict { id: missing })
        );

        let ckt = circuit("ckt-1", 16.0);
        coordinator.upsert_circuit(ckt.clone(), SyncSource::VoltageDropView);
        let mut item = matching_item(&ckt);
        item.notes = "field note".into();
        coordinator.upsert_load_schedule(
            schedule_with_item("ls-1", item),
            SyncSource::LoadScheduleView,
        );
        let conflict_id = coordinator.open_conflicts().next().unwrap().id;
        coordinator
            .resolve_conflict(conflict_id, ResolutionStrategy::Merge)
            .unwrap();
        assert_eq!(
            coordinator.resolve_conflict(conflict_id, ResolutionStrategy::Merge),
            Err(SyncError::AlreadyResolved { id: conflict_id })
        );
    }

    #[test]
    fn sync_now_is_single_flight() {
        let mut coordinator = SyncCoordinator::new();
        coordinator.upsert_circuit(circuit("ckt-1", 16.0), SyncSource::VoltageDropView);

        // Simulate a re-entrant call arriving while a sync is in flight.
        coordinator.is_syncing = true;
        assert_eq!(coordinator.sync_now(), SyncOutcome::AlreadyInFlight);
        assert_eq!(coordinator.event_log().len(), 1);

        coordinator.is_syncing = false;
        let outcome = coordinator.sync_now();
        assert_eq!(
            outcome,
            SyncOutcome::Completed {
                circuits_checked: 1,
                conflicts_found: 0,
            }
        );
        assert!(!coordinator.is_syncing());
        assert_eq!(coordinator.stats().changed_since_sync, 0);
    }

    #[test]
    fn deleting_unknown_ids_is_a_quiet_noop() {
        let mut coordinator = SyncCoordinator::new();
        assert!(!coordinator.delete_circuit("ghost", SyncSource::System));
        assert!(!coordinator.delete_load_schedule("ghost", SyncSource::System));
        assert!(coordinator.event_log().is_empty());
        assert!(!coordinator.can_undo());
    }
}
