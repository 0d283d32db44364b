//! Min/max-preserving downsampling.

use std::collections::BTreeSet;

/// Reduce `data` to about `threshold` points while guaranteeing the global
/// minimum and maximum survive.
///
/// Always retains the first point, the last point, and the global min/max
/// by y (deduplicated against the endpoints); the remaining budget is
/// filled with evenly spaced points. Output stays ordered by x. Degenerate
/// thresholds return the series unchanged.
pub fn min_max_downsample(data: &[(f64, f64)], threshold: usize) -> Vec<(f64, f64)> {
    let n = data.len();
    if threshold == 0 || threshold >= n || n <= 2 {
        return data.to_vec();
    }

    let mut keep = BTreeSet::new();
    keep.insert(0);
    keep.insert(n - 1);

    let mut min_idx = 0usize;
    let mut max_idx = 0usize;
    for (idx, point) in data.iter().enumerate() {
        if point.1 < data[min_idx].1 {
            min_idx = idx;
        }
        if point.1 > data[max_idx].1 {
            max_idx = idx;
        }
    }
    keep.insert(min_idx);
    keep.insert(max_idx);

    // Spread any remaining budget evenly across the run; collisions with
    // points already kept simply shrink the output.
    if threshold > keep.len() {
        let extra = threshold - keep.len();
        for k in 1..=extra {
            keep.insert(k * (n - 1) / (extra + 1));
        }
    }

    keep.into_iter().map(|idx| data[idx]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(n: usize) -> Vec<(f64, f64)> {
        // One full sine period: interior maximum and minimum.
        (0..n)
            .map(|i| {
                let x = i as f64;
                (x, (x * std::f64::consts::TAU / n as f64).sin())
            })
            .collect()
    }

    #[test]
    fn extremes_survive_any_reduction() {
        let data = wave(500);
        let min = data
            .iter()
            .copied()
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
            .unwrap();
        let max = data
            .iter()
            .copied()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
            .unwrap();
        for threshold in [4, 5, 10, 100] {
            let out = min_max_downsample(&data, threshold);
            assert!(out.contains(&min), "min lost at threshold {threshold}");
            assert!(out.contains(&max), "max lost at threshold {threshold}");
        }
    }

    #[test]
    fn endpoints_are_kept() {
        let data = wave(100);
        let out = min_max_downsample(&data, 10);
        assert_eq!(out[0], data[0]);
        assert_eq!(*out.last().unwrap(), data[99]);
    }

    #[test]
    fn output_is_sorted_by_x() {
        let data = wave(300);
        let out = min_max_downsample(&data, 25);
        for pair in out.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }

    #[test]
    fn output_respects_the_budget() {
        let data = wave(1000);
        let out = min_max_downsample(&data, 50);
        assert!(out.len() <= 50);
        assert!(out.len() >= 4);
    }

    #[test]
    fn degenerate_thresholds_return_input() {
        let data = wave(20);
        assert_eq!(min_max_downsample(&data, 0), data);
        assert_eq!(min_max_downsample(&data, 20), data);
        assert_eq!(min_max_downsample(&data, 500), data);
    }

    #[test]
    fn tiny_budget_still_keeps_the_mandatory_points() {
        // Budget below the mandatory set: extremes still win.
        let data = wave(100);
        let out = min_max_downsample(&data, 3);
        assert_eq!(out.len(), 4);
    }
}
