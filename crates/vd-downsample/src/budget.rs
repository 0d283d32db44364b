//! Chart point budgeting and series preparation.

use crate::lttb::lttb;

/// Fewest points worth plotting regardless of container size.
pub const MIN_CHART_POINTS: usize = 20;
/// Most points any chart is given.
pub const MAX_CHART_POINTS: usize = 200;

/// Point budget for a container, roughly one point per 10 px scaled by a
/// complexity factor (1.0 for a plain series). Always within
/// [`MIN_CHART_POINTS`, `MAX_CHART_POINTS`]; a nonsensical width never
/// fails rendering.
pub fn estimate_optimal_point_count(container_width_px: f64, complexity: f64) -> usize {
    let raw = (container_width_px / 10.0 * complexity).floor();
    if raw.is_nan() {
        return MIN_CHART_POINTS;
    }
    raw.clamp(MIN_CHART_POINTS as f64, MAX_CHART_POINTS as f64) as usize
}

/// A reduced series together with its derived axis labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub points: Vec<(f64, f64)>,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

/// Reduce a voltage profile to the container's point budget.
pub fn prepare_chart_series(data: &[(f64, f64)], container_width_px: f64) -> ChartSeries {
    let budget = estimate_optimal_point_count(container_width_px, 1.0);
    ChartSeries {
        points: lttb(data, budget),
        x_label: "Distance [ft]",
        y_label: "Voltage [V]",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_scales_with_width() {
        assert_eq!(estimate_optimal_point_count(800.0, 1.0), 80);
        assert_eq!(estimate_optimal_point_count(1255.0, 1.0), 125);
    }

    #[test]
    fn budget_is_clamped() {
        assert_eq!(estimate_optimal_point_count(50.0, 1.0), MIN_CHART_POINTS);
        assert_eq!(estimate_optimal_point_count(10_000.0, 1.0), MAX_CHART_POINTS);
        assert_eq!(estimate_optimal_point_count(0.0, 1.0), MIN_CHART_POINTS);
        assert_eq!(estimate_optimal_point_count(-100.0, 1.0), MIN_CHART_POINTS);
    }

    #[test]
    fn complexity_widens_the_budget() {
        assert_eq!(estimate_optimal_point_count(800.0, 2.0), 160);
        assert_eq!(estimate_optimal_point_count(800.0, 0.5), 40);
    }

    #[test]
    fn pathological_width_degrades_to_minimum() {
        assert_eq!(estimate_optimal_point_count(f64::NAN, 1.0), MIN_CHART_POINTS);
        assert_eq!(
            estimate_optimal_point_count(f64::INFINITY, 1.0),
            MAX_CHART_POINTS
        );
    }

    #[test]
    fn prepared_series_is_bounded_and_labeled() {
        let data: Vec<(f64, f64)> = (0..2000).map(|i| (i as f64, (i as f64).sqrt())).collect();
        let series = prepare_chart_series(&data, 640.0);
        assert_eq!(series.points.len(), 64);
        assert_eq!(series.x_label, "Distance [ft]");
        assert_eq!(series.y_label, "Voltage [V]");
    }

    #[test]
    fn short_series_is_passed_through() {
        let data: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, 1.0)).collect();
        let series = prepare_chart_series(&data, 1280.0);
        assert_eq!(series.points, data);
    }
}
