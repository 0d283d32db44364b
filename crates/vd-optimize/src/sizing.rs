//! Minimum-size scans over the conductor catalog.

use serde::{Deserialize, Serialize};

use vd_calc::{
    catalog_entry, compliance_limit_percent, compute_voltage_drop, conductor_catalog,
    minimum_size_for_ampacity, required_ampacity_a, ConductorSize, VoltageDropInputs,
};

use crate::error::OptimizeResult;

/// Outcome of a catalog scan. `satisfied == false` means the catalog was
/// exhausted and `size` is the largest entry; an explicit signal, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizingOutcome {
    pub size: ConductorSize,
    pub satisfied: bool,
}

/// Smallest size whose voltage drop stays within the circuit-type limit.
/// Scans ascending by area; the configured size in `inputs` is ignored.
pub fn find_minimum_compliant_size(inputs: &VoltageDropInputs) -> OptimizeResult<SizingOutcome> {
    inputs.validate()?;
    let limit = compliance_limit_percent(inputs.circuit.circuit_type);

    let mut candidate = inputs.clone();
    let mut largest = candidate.conductor_size;
    for entry in conductor_catalog() {
        candidate.conductor_size = entry.size;
        let breakdown = compute_voltage_drop(&candidate)?;
        let drop_percent = breakdown.drop_v / candidate.system_voltage_v * 100.0;
        if drop_percent <= limit {
            return Ok(SizingOutcome {
                size: entry.size,
                satisfied: true,
            });
        }
        largest = entry.size;
    }

    tracing::debug!(limit_percent = limit, "no compliant size in catalog");
    Ok(SizingOutcome {
        size: largest,
        satisfied: false,
    })
}

/// Smallest size rated for the circuit's required current (inrush-adjusted
/// for motor circuits).
pub fn find_ampacity_minimum_size(inputs: &VoltageDropInputs) -> OptimizeResult<SizingOutcome> {
    inputs.validate()?;
    let required_a = required_ampacity_a(inputs);
    match minimum_size_for_ampacity(inputs.conductor_material, required_a) {
        Some(size) => Ok(SizingOutcome {
            size,
            satisfied: true,
        }),
        None => {
            let largest = conductor_catalog()
                .last()
                .expect("catalog is never empty")
                .size;
            Ok(SizingOutcome {
                size: largest,
                satisfied: false,
            })
        }
    }
}

/// Larger of the compliance and ampacity minima; both constraints must be
/// met for `satisfied`.
pub fn find_optimal_conductor_size(inputs: &VoltageDropInputs) -> OptimizeResult<SizingOutcome> {
    let compliant = find_minimum_compliant_size(inputs)?;
    let adequate = find_ampacity_minimum_size(inputs)?;

    let size = if catalog_entry(compliant.size).area_cmil >= catalog_entry(adequate.size).area_cmil
    {
        compliant.size
    } else {
        adequate.size
    };

    Ok(SizingOutcome {
        size,
        satisfied: compliant.satisfied && adequate.satisfied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vd_calc::{
        CircuitConfiguration, CircuitType, ConductorMaterial, ConduitMaterial,
        PhaseConfiguration,
    };

    fn inputs(load_current_a: f64, conductor_length_ft: f64) -> VoltageDropInputs {
        VoltageDropInputs {
            system_voltage_v: 230.0,
            load_current_a,
            conductor_length_ft,
            conductor_size: ConductorSize::Awg12,
            conductor_material: ConductorMaterial::Copper,
            conduit_material: ConduitMaterial::Pvc,
            phase: PhaseConfiguration::Single,
            ambient_temperature_c: 30.0,
            power_factor: 0.85,
            circuit: CircuitConfiguration::branch(),
        }
    }

    #[test]
    fn short_light_run_needs_the_smallest_size() {
        let outcome = find_minimum_compliant_size(&inputs(5.0, 20.0)).unwrap();
        assert_eq!(outcome.size, ConductorSize::Awg14);
        assert!(outcome.satisfied);
    }

    #[test]
    fn heavier_run_steps_up_the_catalog() {
        let outcome = find_minimum_compliant_size(&inputs(20.0, 100.0)).unwrap();
        assert_eq!(outcome.size, ConductorSize::Awg10);
        assert!(outcome.satisfied);
    }

    #[test]
    fn impossible_run_returns_largest_with_flag() {
        let mut unservable = inputs(400.0, 5000.0);
        unservable.circuit.circuit_type = CircuitType::Feeder;
        let outcome = find_minimum_compliant_size(&unservable).unwrap();
        assert_eq!(outcome.size, ConductorSize::Kcmil1000);
        assert!(!outcome.satisfied);
    }

    #[test]
    fn ampacity_minimum_tracks_required_current() {
        let outcome = find_ampacity_minimum_size(&inputs(60.0, 100.0)).unwrap();
        assert_eq!(outcome.size, ConductorSize::Awg6);
        assert!(outcome.satisfied);
    }

    #[test]
    fn ampacity_minimum_for_motor_covers_inrush() {
        let mut motor = inputs(60.0, 100.0);
        motor.circuit = CircuitConfiguration::motor(Some(1.5));
        // 90 A required: 3 AWG copper (100 A) is the first adequate size.
        let outcome = find_ampacity_minimum_size(&motor).unwrap();
        assert_eq!(outcome.size, ConductorSize::Awg3);
    }

    #[test]
    fn optimal_size_takes_the_larger_constraint() {
        // Ampacity needs 6 AWG at 60 A, but the 300 ft run needs more copper
        // to stay under the drop limit.
        let outcome = find_optimal_conductor_size(&inputs(60.0, 300.0)).unwrap();
        let compliant = find_minimum_compliant_size(&inputs(60.0, 300.0)).unwrap();
        let adequate = find_ampacity_minimum_size(&inputs(60.0, 300.0)).unwrap();
        assert!(outcome.satisfied);
        let max_area = catalog_entry(compliant.size)
            .area_cmil
            .max(catalog_entry(adequate.size).area_cmil);
        assert_eq!(catalog_entry(outcome.size).area_cmil, max_area);
    }

    #[test]
    fn oversized_current_exhausts_the_ampacity_table() {
        let outcome = find_ampacity_minimum_size(&inputs(800.0, 10.0)).unwrap();
        assert_eq!(outcome.size, ConductorSize::Kcmil1000);
        assert!(!outcome.satisfied);
    }
}
