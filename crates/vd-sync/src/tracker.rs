//! Dirty-bit tracking of circuit property edits.
//!
//! Every edit is recorded per circuit, but only edits to voltage-drop
//! relevant properties flag the circuit for recalculation. Tracking can be
//! suspended globally during bulk imports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Old/new value of an edited property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Number(v) => write!(f, "{v}"),
            PropertyValue::Text(v) => f.write_str(v),
            PropertyValue::Flag(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Number(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::Text(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::Text(v)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Flag(v)
    }
}

/// One recorded edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyChange {
    pub property: String,
    pub previous_value: PropertyValue,
    pub new_value: PropertyValue,
    pub timestamp: DateTime<Utc>,
}

/// Properties whose edits invalidate cached voltage-drop results.
pub const RECALCULATION_PROPERTIES: [&str; 10] = [
    "conductor_size",
    "conductor_material",
    "conduit_material",
    "conductor_length_ft",
    "system_voltage_v",
    "load_current_a",
    "phase",
    "circuit_type",
    "ambient_temperature_c",
    "insulation_rating",
];

/// Tracks edits per circuit id since the last clear.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    changes: HashMap<String, Vec<PropertyChange>>,
    dirty: HashSet<String>,
    suspended: bool,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one edit. Returns true when the edit requires recalculation.
    /// No-op edits (unchanged value) and edits while suspended are not
    /// recorded.
    pub fn record(
        &mut self,
        circuit_id: &str,
        property: &str,
        previous_value: PropertyValue,
        new_value: PropertyValue,
    ) -> bool {
        if self.suspended || previous_value == new_value {
            return false;
        }

        self.changes
            .entry(circuit_id.to_string())
            .or_default()
            .push(PropertyChange {
                property: property.to_string(),
                previous_value,
                new_value,
                timestamp: Utc::now(),
            });

        let relevant = RECALCULATION_PROPERTIES.contains(&property);
        if relevant {
            self.dirty.insert(circuit_id.to_string());
        }
        relevant
    }

    pub fn needs_recalculation(&self, circuit_id: &str) -> bool {
        self.dirty.contains(circuit_id)
    }

    /// Circuits currently flagged for recalculation.
    pub fn dirty_circuits(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.dirty.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn changes_for(&self, circuit_id: &str) -> &[PropertyChange] {
        self.changes
            .get(circuit_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Drop the record for one circuit, typically after recalculation.
    pub fn clear_circuit(&mut self, circuit_id: &str) {
        self.changes.remove(circuit_id);
        self.dirty.remove(circuit_id);
    }

    pub fn clear(&mut self) {
        self.changes.clear();
        self.dirty.clear();
    }

    /// Stop recording, e.g. for a bulk import.
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    pub fn resume(&mut self) {
        self.suspended = false;
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }
}
