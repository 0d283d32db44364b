//! Canonical circuit and load-schedule records shared by both calculator
//! views. Linked by circuit id; mutated only through the coordinator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vd_calc::{
    CircuitType, ConductorMaterial, ConductorSize, ConduitMaterial, PhaseConfiguration,
};

/// The voltage-drop view's record of one circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedCircuitData {
    pub id: String,
    pub name: String,
    pub circuit_type: CircuitType,
    pub conductor_size: ConductorSize,
    pub conductor_material: ConductorMaterial,
    pub conduit_material: ConduitMaterial,
    pub conductor_length_ft: f64,
    pub system_voltage_v: f64,
    pub load_current_a: f64,
    pub phase: PhaseConfiguration,
    pub breaker_rating_a: f64,
    #[serde(default)]
    pub notes: String,
    pub last_modified: DateTime<Utc>,
}

/// One row of a load schedule; `circuit_id` links it to the voltage-drop
/// view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadItem {
    pub circuit_id: String,
    pub description: String,
    pub load_current_a: f64,
    pub voltage_v: f64,
    pub breaker_rating_a: f64,
    pub conductor_size: ConductorSize,
    pub phase: PhaseConfiguration,
    #[serde(default)]
    pub notes: String,
}

/// The load-schedule view's record of a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSchedule {
    pub id: String,
    pub name: String,
    pub panel: String,
    #[serde(default)]
    pub items: Vec<LoadItem>,
    pub last_modified: DateTime<Utc>,
}

impl LoadSchedule {
    pub fn item_for_circuit(&self, circuit_id: &str) -> Option<&LoadItem> {
        self.items.iter().find(|item| item.circuit_id == circuit_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> LoadSchedule {
        LoadSchedule {
            id: "ls-1".into(),
            name: "First Floor".into(),
            panel: "LP-1".into(),
            items: vec![LoadItem {
                circuit_id: "ckt-7".into(),
                description: "Receptacles".into(),
                load_current_a: 16.0,
                voltage_v: 120.0,
                breaker_rating_a: 20.0,
                conductor_size: ConductorSize::Awg12,
                phase: PhaseConfiguration::Single,
                notes: String::new(),
            }],
            last_modified: Utc::now(),
        }
    }

    #[test]
    fn item_lookup_by_circuit_id() {
        let schedule = schedule();
        assert!(schedule.item_for_circuit("ckt-7").is_some());
        assert!(schedule.item_for_circuit("ckt-8").is_none());
    }

    #[test]
    fn schedule_roundtrips_json() {
        let schedule = schedule();
        let json = serde_json::to_string(&schedule).unwrap();
        let loaded: LoadSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(schedule, loaded);
    }
}
