//! vd-optimize: conductor sizing and economic comparison.
//!
//! Scans the conductor catalog through the calculation engine to find the
//! minimum compliant and ampacity-adequate sizes, and prices candidate
//! sizes over a multi-year study period to recommend the economical choice.

pub mod economics;
pub mod error;
pub mod sizing;

pub use economics::{
    compare_conductors, cost_per_cmil_ft, recommend_conductor, ConductorEconomics,
    EconomicAssumptions, EconomicRecommendation, STUDY_PERIOD_YEARS,
};
pub use error::{OptimizeError, OptimizeResult};
pub use sizing::{
    find_ampacity_minimum_size, find_minimum_compliant_size, find_optimal_conductor_size,
    SizingOutcome,
};
