//! Advisory text for non-compliant or marginal circuit configurations.
//!
//! The strings are opaque display text for the presentation layer; order is
//! stable (compliance findings first, then ampacity, then circuit-specific
//! advisories).

use crate::catalog::{minimum_size_for_ampacity, next_size_up};
use crate::engine::{required_ampacity_a, AmpacityRating};
use crate::inputs::{CircuitType, VoltageDropInputs, WirewayKind};

pub fn build_recommendations(
    inputs: &VoltageDropInputs,
    voltage_drop_percent: f64,
    max_allowed_drop_percent: f64,
    ampacity: &AmpacityRating,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if voltage_drop_percent > max_allowed_drop_percent {
        recommendations.push(format!(
            "Voltage drop of {:.2}% exceeds the {:.1}% limit by {:.2} points",
            voltage_drop_percent,
            max_allowed_drop_percent,
            voltage_drop_percent - max_allowed_drop_percent,
        ));
        if let Some(size) = next_size_up(inputs.conductor_size) {
            recommendations.push(format!("Increase conductor size to {}", size));
        }
        recommendations.push("Reduce the one-way circuit length if the layout allows".to_string());
        recommendations.push("Consider a higher system voltage for this load".to_string());
        recommendations
            .push("Locate the transformer or panelboard closer to the load".to_string());
    }

    if !ampacity.adequate {
        let required = required_ampacity_a(inputs);
        match minimum_size_for_ampacity(inputs.conductor_material, required) {
            Some(size) => recommendations.push(format!(
                "Conductor ampacity {:.0} A is below the required {:.0} A; minimum size with adequate ampacity: {}",
                ampacity.rating_a, required, size,
            )),
            None => recommendations.push(format!(
                "No {} conductor in the catalog is rated for {:.0} A; use parallel runs",
                inputs.conductor_material, required,
            )),
        }
    }

    if inputs.circuit.circuit_type == CircuitType::Motor {
        recommendations.push(
            "Verify voltage drop during motor starting; inrush can cause nuisance dips"
                .to_string(),
        );
        if let Some(sf) = inputs.circuit.service_factor {
            recommendations.push(format!(
                "Motor service factor {:.2} assumed continuously loaded",
                sf
            ));
        }
        if inputs.circuit.vfd_driven {
            recommendations.push(
                "VFD loads introduce harmonics; verify drive input voltage tolerance and \
                 consider an oversized neutral"
                    .to_string(),
            );
        }
    }

    if inputs.circuit.circuit_type == CircuitType::Branch {
        if let Some(dist) = inputs.circuit.furthest_outlet_distance_ft {
            if dist > inputs.conductor_length_ft {
                recommendations.push(format!(
                    "Furthest outlet at {:.0} ft exceeds the modeled {:.0} ft run; evaluate drop at the outlet",
                    dist, inputs.conductor_length_ft,
                ));
            }
        }
    }

    if matches!(inputs.circuit.wireway, Some(WirewayKind::CableTray)) {
        recommendations.push(
            "Reactance figures assume conductors in conduit; tray spacing may differ".to_string(),
        );
    }

    recommendations
}
