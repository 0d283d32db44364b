//! vd-downsample: bounded-size reduction of chart point series.
//!
//! Reduces large analytically-generated `(x, y)` series to a
//! render-friendly count while preserving perceptual shape (LTTB) or
//! guaranteed extremes (min-max). Downsampling never fails; a degenerate
//! threshold degrades to returning the original series.

pub mod budget;
pub mod extremes;
pub mod lttb;
pub mod stride;

pub use budget::{
    estimate_optimal_point_count, prepare_chart_series, ChartSeries, MAX_CHART_POINTS,
    MIN_CHART_POINTS,
};
pub use extremes::min_max_downsample;
pub use lttb::lttb;
pub use stride::every_nth;
