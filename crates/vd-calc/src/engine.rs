//! Voltage-drop, power-loss, compliance, and ampacity evaluation.
//!
//! Resistance follows the NEC-style K constants (ohm-cmil/ft) with a linear
//! ambient-temperature adjustment. Reactance is a small fixed per-conduit
//! lookup, independent of conductor size and spacing.

use serde::{Deserialize, Serialize};

use crate::catalog::{
    catalog_entry, ConductorMaterial, ConduitMaterial, PhaseConfiguration,
};
use crate::error::{CalcError, CalcResult};
use crate::inputs::{CircuitType, VoltageDropInputs, DEFAULT_STARTING_CURRENT_MULTIPLIER};
use crate::recommend;

/// Circuit factor for single-phase, 2-wire runs.
pub const SINGLE_PHASE_FACTOR: f64 = 2.0;
/// Circuit factor for balanced three-phase runs (sqrt 3).
pub const THREE_PHASE_FACTOR: f64 = 1.732_050_807_568_877_2;

/// Reference temperature for the resistivity constants, degC.
const RESISTIVITY_REFERENCE_C: f64 = 20.0;

pub fn phase_factor(phase: PhaseConfiguration) -> f64 {
    match phase {
        PhaseConfiguration::Single => SINGLE_PHASE_FACTOR,
        PhaseConfiguration::Three => THREE_PHASE_FACTOR,
    }
}

/// Effective resistivity in ohm-cmil/ft at the reference temperature.
pub fn resistivity_ohm_cmil_ft(material: ConductorMaterial) -> f64 {
    match material {
        ConductorMaterial::Copper => 12.9,
        ConductorMaterial::Aluminum => 21.2,
    }
}

fn temperature_coefficient(material: ConductorMaterial) -> f64 {
    match material {
        ConductorMaterial::Copper => 0.00393,
        ConductorMaterial::Aluminum => 0.00403,
    }
}

/// Linear resistivity correction for ambient temperature.
pub fn temperature_adjustment(material: ConductorMaterial, ambient_c: f64) -> f64 {
    1.0 + temperature_coefficient(material) * (ambient_c - RESISTIVITY_REFERENCE_C)
}

/// Series reactance per 1000 ft for conductors in the given raceway.
pub fn reactance_ohm_per_kft(conduit: ConduitMaterial) -> f64 {
    match conduit {
        ConduitMaterial::Pvc => 0.050,
        ConduitMaterial::Aluminum => 0.052,
        ConduitMaterial::Steel => 0.062,
    }
}

/// One-way conductor resistance in ohms.
pub fn conductor_resistance_ohm(inputs: &VoltageDropInputs) -> f64 {
    let entry = catalog_entry(inputs.conductor_size);
    resistivity_ohm_cmil_ft(inputs.conductor_material)
        * temperature_adjustment(inputs.conductor_material, inputs.ambient_temperature_c)
        * inputs.conductor_length_ft
        / entry.area_cmil
}

/// One-way conductor reactance in ohms.
pub fn conductor_reactance_ohm(inputs: &VoltageDropInputs) -> f64 {
    reactance_ohm_per_kft(inputs.conduit_material) * inputs.conductor_length_ft / 1000.0
}

/// Voltage drop along the run plus the impedance it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropBreakdown {
    pub drop_v: f64,
    pub resistance_ohm: f64,
    pub reactance_ohm: f64,
}

/// drop = k * I * (R cos(phi) + X sin(phi)), k = 2 or sqrt(3).
pub fn compute_voltage_drop(inputs: &VoltageDropInputs) -> CalcResult<VoltageDropBreakdown> {
    inputs.validate()?;
    let resistance_ohm = conductor_resistance_ohm(inputs);
    let reactance_ohm = conductor_reactance_ohm(inputs);
    let cos_phi = inputs.power_factor;
    let sin_phi = (1.0 - cos_phi * cos_phi).max(0.0).sqrt();
    let drop_v = phase_factor(inputs.phase)
        * inputs.load_current_a
        * (resistance_ohm * cos_phi + reactance_ohm * sin_phi);
    Ok(VoltageDropBreakdown {
        drop_v,
        resistance_ohm,
        reactance_ohm,
    })
}

/// Conductor losses at full load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerLoss {
    pub resistive_w: f64,
    pub reactive_var: f64,
    pub total_va: f64,
}

/// resistive = k * I^2 * R, reactive = k * I^2 * X (same k convention).
pub fn compute_power_loss(inputs: &VoltageDropInputs) -> CalcResult<PowerLoss> {
    inputs.validate()?;
    let k = phase_factor(inputs.phase);
    let i_sq = inputs.load_current_a * inputs.load_current_a;
    let resistive_w = k * i_sq * conductor_resistance_ohm(inputs);
    let reactive_var = k * i_sq * conductor_reactance_ohm(inputs);
    let total_va = resistive_w.hypot(reactive_var);
    Ok(PowerLoss {
        resistive_w,
        reactive_var,
        total_va,
    })
}

/// Maximum allowed voltage drop for a circuit type, percent.
pub fn compliance_limit_percent(circuit_type: CircuitType) -> f64 {
    match circuit_type {
        CircuitType::Branch => 3.0,
        CircuitType::Feeder => 5.0,
        CircuitType::Service => 5.0,
        // Motor circuits carry their own limit.
        CircuitType::Motor => 3.0,
    }
}

/// Current the conductor must be rated for; motor circuits size for inrush.
pub fn required_ampacity_a(inputs: &VoltageDropInputs) -> f64 {
    if inputs.circuit.circuit_type == CircuitType::Motor {
        let mult = inputs
            .circuit
            .starting_current_multiplier
            .unwrap_or(DEFAULT_STARTING_CURRENT_MULTIPLIER);
        inputs.load_current_a.max(inputs.load_current_a * mult)
    } else {
        inputs.load_current_a
    }
}

/// Ampacity rating of the configured conductor and its adequacy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmpacityRating {
    pub rating_a: f64,
    pub adequate: bool,
}

pub fn ampacity_rating(inputs: &VoltageDropInputs) -> CalcResult<AmpacityRating> {
    let entry = catalog_entry(inputs.conductor_size);
    let rating_a = entry
        .ampacity(inputs.conductor_material)
        .ok_or(CalcError::InvalidInput {
            what: "conductor material is not rated at this size",
        })?;
    Ok(AmpacityRating {
        rating_a,
        adequate: rating_a >= required_ampacity_a(inputs),
    })
}

/// Compliance verdict against the circuit-type limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
}

/// Full evaluation of one circuit configuration. Pure and deterministic;
/// never persisted directly, but round-trips losslessly through serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropResult {
    pub voltage_drop_v: f64,
    pub voltage_drop_percent: f64,
    pub receiving_end_voltage_v: f64,
    pub resistive_loss_w: f64,
    pub reactive_loss_var: f64,
    pub total_loss_va: f64,
    pub compliance: ComplianceStatus,
    pub max_allowed_drop_percent: f64,
    pub ampacity: AmpacityRating,
    pub recommendations: Vec<String>,
}

/// Evaluate one circuit configuration.
pub fn evaluate(inputs: &VoltageDropInputs) -> CalcResult<VoltageDropResult> {
    let breakdown = compute_voltage_drop(inputs)?;
    let loss = compute_power_loss(inputs)?;
    let ampacity = ampacity_rating(inputs)?;

    let max_allowed_drop_percent = compliance_limit_percent(inputs.circuit.circuit_type);
    let voltage_drop_percent = breakdown.drop_v / inputs.system_voltage_v * 100.0;
    let compliance = if voltage_drop_percent <= max_allowed_drop_percent {
        ComplianceStatus::Compliant
    } else {
        ComplianceStatus::NonCompliant
    };

    let recommendations = recommend::build_recommendations(
        inputs,
        voltage_drop_percent,
        max_allowed_drop_percent,
        &ampacity,
    );

    Ok(VoltageDropResult {
        voltage_drop_v: breakdown.drop_v,
        voltage_drop_percent,
        receiving_end_voltage_v: inputs.system_voltage_v - breakdown.drop_v,
        resistive_loss_w: loss.resistive_w,
        reactive_loss_var: loss.reactive_var,
        total_loss_va: loss.total_va,
        compliance,
        max_allowed_drop_percent,
        ampacity,
        recommendations,
    })
}
