//! Largest-Triangle-Three-Buckets downsampling.

/// Reduce `data` to `threshold` points, always keeping the first and last.
///
/// The interior is partitioned into `threshold - 2` near-equal buckets; each
/// bucket contributes the point forming the largest triangle with the
/// previously selected point and the average of the next bucket. A
/// `threshold` of zero, one, or at least `data.len()` returns the series
/// unchanged.
pub fn lttb(data: &[(f64, f64)], threshold: usize) -> Vec<(f64, f64)> {
    let n = data.len();
    if threshold >= n || n <= 2 || threshold < 2 {
        return data.to_vec();
    }
    if threshold == 2 {
        return vec![data[0], data[n - 1]];
    }

    let bucket_count = threshold - 2;
    let every = (n - 2) as f64 / bucket_count as f64;

    let mut sampled = Vec::with_capacity(threshold);
    sampled.push(data[0]);
    let mut selected = 0usize;

    for bucket in 0..bucket_count {
        let range_start = (bucket as f64 * every).floor() as usize + 1;
        let range_end = (((bucket + 1) as f64) * every).floor() as usize + 1;
        let range_end = range_end.min(n - 1);

        // Representative of the following bucket: its average, or the final
        // point when this is the last bucket.
        let next_start = range_end;
        let next_end = ((((bucket + 2) as f64) * every).floor() as usize + 1).min(n - 1);
        let (next_x, next_y) = if bucket == bucket_count - 1 || next_start >= next_end {
            data[n - 1]
        } else {
            let slice = &data[next_start..next_end];
            let inv = 1.0 / slice.len() as f64;
            (
                slice.iter().map(|p| p.0).sum::<f64>() * inv,
                slice.iter().map(|p| p.1).sum::<f64>() * inv,
            )
        };

        let (ax, ay) = data[selected];
        let mut best_idx = range_start;
        let mut best_area = -1.0;
        for idx in range_start..range_end {
            let (px, py) = data[idx];
            // Twice the triangle area; the ranking is unaffected.
            let area = ((ax - next_x) * (py - ay) - (ax - px) * (next_y - ay)).abs();
            if area > best_area {
                best_area = area;
                best_idx = idx;
            }
        }

        sampled.push(data[best_idx]);
        selected = best_idx;
    }

    sampled.push(data[n - 1]);
    sampled
}
