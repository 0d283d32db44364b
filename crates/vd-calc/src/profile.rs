//! Analytic voltage profile along the conductor run.
//!
//! Charting consumes `(distance_ft, voltage_v)` samples generated from the
//! linear-drop assumption; downsampling happens downstream.

use crate::engine::compute_voltage_drop;
use crate::error::CalcResult;
use crate::inputs::VoltageDropInputs;

/// Evenly spaced samples from the source to the receiving end. The first
/// sample is always `(0, system_voltage)` and the last is exactly
/// `(length, receiving_end_voltage)`.
pub fn voltage_profile(
    inputs: &VoltageDropInputs,
    points: usize,
) -> CalcResult<Vec<(f64, f64)>> {
    let breakdown = compute_voltage_drop(inputs)?;
    let length = inputs.conductor_length_ft;
    let end_voltage = inputs.system_voltage_v - breakdown.drop_v;

    let points = points.max(2);
    let mut profile = Vec::with_capacity(points);
    let step = length / (points - 1) as f64;
    for i in 0..points {
        let distance = i as f64 * step;
        let fraction = distance / length;
        profile.push((
            distance,
            inputs.system_voltage_v - breakdown.drop_v * fraction,
        ));
    }

    // Ensure exact endpoint
    profile[points - 1] = (length, end_voltage);
    Ok(profile)
}
