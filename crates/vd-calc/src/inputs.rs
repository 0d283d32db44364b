//! Circuit configuration and voltage-drop input records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use vd_core::ensure_finite;

use crate::catalog::{ConductorMaterial, ConductorSize, ConduitMaterial, PhaseConfiguration};
use crate::error::{CalcError, CalcResult};

/// Default power factor assumed when the caller does not supply one.
pub const DEFAULT_POWER_FACTOR: f64 = 0.85;

/// Starting-current multiplier assumed for motor circuits without an
/// explicit value.
pub const DEFAULT_STARTING_CURRENT_MULTIPLIER: f64 = 1.25;

/// Kind of circuit being evaluated; selects the compliance tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CircuitType {
    Branch,
    Feeder,
    Service,
    Motor,
}

impl CircuitType {
    pub fn label(self) -> &'static str {
        match self {
            CircuitType::Branch => "branch",
            CircuitType::Feeder => "feeder",
            CircuitType::Service => "service",
            CircuitType::Motor => "motor",
        }
    }
}

impl fmt::Display for CircuitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CircuitType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "branch" => Ok(CircuitType::Branch),
            "feeder" => Ok(CircuitType::Feeder),
            "service" => Ok(CircuitType::Service),
            "motor" => Ok(CircuitType::Motor),
            _ => Err(CalcError::InvalidInput {
                what: "circuit type must be branch, feeder, service, or motor",
            }),
        }
    }
}

/// Wireway kind, used for advisory text only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WirewayKind {
    Conduit,
    CableTray,
    Raceway,
}

impl WirewayKind {
    pub fn label(self) -> &'static str {
        match self {
            WirewayKind::Conduit => "conduit",
            WirewayKind::CableTray => "cable-tray",
            WirewayKind::Raceway => "raceway",
        }
    }
}

/// Type-specific circuit options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitConfiguration {
    pub circuit_type: CircuitType,
    /// Branch circuits: distance to the furthest outlet, when it exceeds
    /// the modeled run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub furthest_outlet_distance_ft: Option<f64>,
    /// Motor circuits: inrush multiple of full-load current.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_current_multiplier: Option<f64>,
    /// Motor circuits: nameplate service factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_factor: Option<f64>,
    /// Motor circuits: fed from a variable-frequency drive.
    #[serde(default)]
    pub vfd_driven: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wireway: Option<WirewayKind>,
}

impl CircuitConfiguration {
    pub fn new(circuit_type: CircuitType) -> Self {
        Self {
            circuit_type,
            furthest_outlet_distance_ft: None,
            starting_current_multiplier: None,
            service_factor: None,
            vfd_driven: false,
            wireway: None,
        }
    }

    pub fn branch() -> Self {
        Self::new(CircuitType::Branch)
    }

    pub fn motor(starting_current_multiplier: Option<f64>) -> Self {
        Self {
            starting_current_multiplier,
            ..Self::new(CircuitType::Motor)
        }
    }
}

impl Default for CircuitConfiguration {
    fn default() -> Self {
        Self::branch()
    }
}

/// Everything the engine needs to evaluate one circuit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropInputs {
    pub system_voltage_v: f64,
    pub load_current_a: f64,
    /// One-way run length.
    pub conductor_length_ft: f64,
    pub conductor_size: ConductorSize,
    pub conductor_material: ConductorMaterial,
    pub conduit_material: ConduitMaterial,
    pub phase: PhaseConfiguration,
    pub ambient_temperature_c: f64,
    #[serde(default = "default_power_factor")]
    pub power_factor: f64,
    #[serde(default)]
    pub circuit: CircuitConfiguration,
}

fn default_power_factor() -> f64 {
    DEFAULT_POWER_FACTOR
}

impl VoltageDropInputs {
    /// Fail fast on malformed fields; the engine never silently defaults.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_finite(self.system_voltage_v, "system voltage")?;
        if self.system_voltage_v <= 0.0 {
            return Err(CalcError::InvalidInput {
                what: "system voltage must be positive",
            });
        }
        ensure_finite(self.load_current_a, "load current")?;
        if self.load_current_a <= 0.0 {
            return Err(CalcError::InvalidInput {
                what: "load current must be positive",
            });
        }
        ensure_finite(self.conductor_length_ft, "conductor length")?;
        if self.conductor_length_ft <= 0.0 {
            return Err(CalcError::InvalidInput {
                what: "conductor length must be positive",
            });
        }
        ensure_finite(self.ambient_temperature_c, "ambient temperature")?;
        if self.ambient_temperature_c < 0.0 {
            return Err(CalcError::InvalidInput {
                what: "ambient temperature must be non-negative",
            });
        }
        ensure_finite(self.power_factor, "power factor")?;
        if !(0.0..=1.0).contains(&self.power_factor) {
            return Err(CalcError::InvalidInput {
                what: "power factor must be within [0, 1]",
            });
        }
        if let Some(mult) = self.circuit.starting_current_multiplier {
            ensure_finite(mult, "starting-current multiplier")?;
            if mult < 1.0 {
                return Err(CalcError::InvalidInput {
                    what: "starting-current multiplier must be at least 1",
                });
            }
        }
        if let Some(sf) = self.circuit.service_factor {
            ensure_finite(sf, "service factor")?;
            if sf <= 0.0 {
                return Err(CalcError::InvalidInput {
                    what: "service factor must be positive",
                });
            }
        }
        if let Some(dist) = self.circuit.furthest_outlet_distance_ft {
            ensure_finite(dist, "furthest outlet distance")?;
            if dist <= 0.0 {
                return Err(CalcError::InvalidInput {
                    what: "furthest outlet distance must be positive",
                });
            }
        }
        Ok(())
    }
}
