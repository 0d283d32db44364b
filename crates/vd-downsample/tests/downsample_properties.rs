use proptest::prelude::*;
use vd_core::{nearly_equal, Tolerances};
use vd_downsample::{every_nth, lttb, min_max_downsample};

fn sine_series(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let x = i as f64;
            (x, (x * std::f64::consts::TAU / n as f64).sin())
        })
        .collect()
}

#[test]
fn sine_reduced_to_twenty_points() {
    let data = sine_series(100);
    let out = lttb(&data, 20);
    assert_eq!(out.len(), 20);
    assert_eq!(out[0], data[0]);
    assert_eq!(out[19], data[99]);
}

#[test]
fn reduced_sine_still_spans_the_amplitude() {
    let data = sine_series(100);
    let out = lttb(&data, 20);
    let top = out.iter().map(|p| p.1).fold(f64::MIN, f64::max);
    let bottom = out.iter().map(|p| p.1).fold(f64::MAX, f64::min);
    let tol = Tolerances {
        abs: 0.05,
        rel: 0.05,
    };
    assert!(nearly_equal(top, 1.0, tol), "peak flattened to {top}");
    assert!(nearly_equal(bottom, -1.0, tol), "trough flattened to {bottom}");
}

fn series_strategy() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec(-1000.0..1000.0f64, 2..400)
        .prop_map(|ys| ys.into_iter().enumerate().map(|(i, y)| (i as f64, y)).collect())
}

proptest! {
    #[test]
    fn lttb_identity_at_or_above_length(data in series_strategy()) {
        let len = data.len();
        prop_assert_eq!(&lttb(&data, len), &data);
        prop_assert_eq!(&lttb(&data, len + 1), &data);
    }

    #[test]
    fn lttb_preserves_endpoints(data in series_strategy(), threshold in 2..400usize) {
        let out = lttb(&data, threshold);
        prop_assert_eq!(out[0], data[0]);
        prop_assert_eq!(*out.last().unwrap(), *data.last().unwrap());
    }

    #[test]
    fn lttb_length_is_exact_below_input(data in series_strategy(), threshold in 3..400usize) {
        prop_assume!(threshold < data.len());
        prop_assert_eq!(lttb(&data, threshold).len(), threshold);
    }

    #[test]
    fn min_max_keeps_global_extremes(data in series_strategy(), threshold in 4..50usize) {
        let out = min_max_downsample(&data, threshold);
        let min = data.iter().copied().min_by(|a, b| a.1.total_cmp(&b.1)).unwrap();
        let max = data.iter().copied().max_by(|a, b| a.1.total_cmp(&b.1)).unwrap();
        prop_assert!(out.iter().any(|p| p.1 == min.1));
        prop_assert!(out.iter().any(|p| p.1 == max.1));
    }

    #[test]
    fn every_nth_never_errors_or_grows(data in series_strategy(), threshold in 0..500usize) {
        let out = every_nth(&data, threshold);
        prop_assert!(out.len() <= data.len());
        if threshold > 0 && threshold < data.len() {
            prop_assert!(out.len() <= threshold);
        }
    }
}
