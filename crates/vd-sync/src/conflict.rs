//! Divergence detection between the two views of a circuit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{LoadItem, UnifiedCircuitData};

/// How much a divergence matters. Ordered: `Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ConflictSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// How a conflict gets settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionStrategy {
    /// The voltage-drop view's values win.
    VoltageDropWins,
    /// The load schedule's values win.
    ScheduleWins,
    /// A person reconciles the views by hand.
    Manual,
    /// Field-by-field merge following each comparison's suggestion.
    Merge,
}

/// One differing property between the circuit view and the schedule view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyComparison {
    pub property: String,
    pub circuit_value: String,
    pub schedule_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub severity: ConflictSeverity,
    pub suggested_resolution: ResolutionStrategy,
}

/// A detected divergence. Created by comparison, never deleted; resolution
/// only marks it and records the strategy. The comparisons are history and
/// are never rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub id: Uuid,
    pub circuit_id: String,
    pub comparisons: Vec<PropertyComparison>,
    pub resolved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<ResolutionStrategy>,
    pub detected_at: DateTime<Utc>,
}

impl Conflict {
    /// Worst severity among the comparisons.
    pub fn severity(&self) -> ConflictSeverity {
        self.comparisons
            .iter()
            .map(|c| c.severity)
            .max()
            .unwrap_or(ConflictSeverity::Low)
    }

    pub fn has_critical(&self) -> bool {
        self.severity() == ConflictSeverity::Critical
    }
}

fn differs(a: f64, b: f64) -> bool {
    (a - b).abs() > 1e-9
}

/// Compare the shared properties of the two views of one circuit. Every
/// difference becomes a tagged comparison; an empty result means the pair
/// is in sync.
pub fn compare_views(circuit: &UnifiedCircuitData, item: &LoadItem) -> Vec<PropertyComparison> {
    let mut comparisons = Vec::new();

    if circuit.conductor_size != item.conductor_size {
        comparisons.push(PropertyComparison {
            property: "conductor_size".into(),
            circuit_value: circuit.conductor_size.to_string(),
            schedule_value: item.conductor_size.to_string(),
            unit: None,
            severity: ConflictSeverity::Critical,
            suggested_resolution: ResolutionStrategy::Manual,
        });
    }

    if differs(circuit.breaker_rating_a, item.breaker_rating_a) {
        comparisons.push(PropertyComparison {
            property: "breaker_rating_a".into(),
            circuit_value: format!("{}", circuit.breaker_rating_a),
            schedule_value: format!("{}", item.breaker_rating_a),
            unit: Some("A".into()),
            severity: ConflictSeverity::Critical,
            suggested_resolution: ResolutionStrategy::Manual,
        });
    }

    if differs(circuit.load_current_a, item.load_current_a) {
        comparisons.push(PropertyComparison {
            property: "load_current_a".into(),
            circuit_value: format!("{}", circuit.load_current_a),
            schedule_value: format!("{}", item.load_current_a),
            unit: Some("A".into()),
            severity: ConflictSeverity::High,
            suggested_resolution: ResolutionStrategy::ScheduleWins,
        });
    }

    if differs(circuit.system_voltage_v, item.voltage_v) {
        comparisons.push(PropertyComparison {
            property: "system_voltage_v".into(),
            circuit_value: format!("{}", circuit.system_voltage_v),
            schedule_value: format!("{}", item.voltage_v),
            unit: Some("V".into()),
            severity: ConflictSeverity::High,
            suggested_resolution: ResolutionStrategy::ScheduleWins,
        });
    }

    if circuit.phase != item.phase {
        comparisons.push(PropertyComparison {
            property: "phase".into(),
            circuit_value: circuit.phase.to_string(),
            schedule_value: item.phase.to_string(),
            unit: None,
            severity: ConflictSeverity::Medium,
            suggested_resolution: ResolutionStrategy::VoltageDropWins,
        });
    }

    if circuit.notes != item.notes {
        comparisons.push(PropertyComparison {
            property: "notes".into(),
            circuit_value: circuit.notes.clone(),
            schedule_value: item.notes.clone(),
            unit: None,
            severity: ConflictSeverity::Low,
            suggested_resolution: ResolutionStrategy::Merge,
        });
    }

    comparisons
}
