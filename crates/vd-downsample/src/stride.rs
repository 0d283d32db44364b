//! Naive stride sampling.

/// Keep every n-th point so at most `threshold` survive. Fastest and
/// weakest on shape fidelity; an explicit opt-in fallback. Degenerate
/// thresholds return the series unchanged.
pub fn every_nth(data: &[(f64, f64)], threshold: usize) -> Vec<(f64, f64)> {
    if threshold == 0 || threshold >= data.len() {
        return data.to_vec();
    }
    let stride = data.len().div_ceil(threshold);
    data.iter().copied().step_by(stride).collect()
}
