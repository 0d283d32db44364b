//! vd-calc: conductor catalog and voltage-drop calculation engine.
//!
//! Pure, deterministic evaluation of one circuit configuration: voltage
//! drop, power loss, code-compliance verdict, ampacity adequacy, and
//! advisory text, plus a fingerprint-keyed memoization cache and the
//! analytic voltage profile used for charting.

pub mod cache;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod inputs;
pub mod profile;
pub mod recommend;

pub use cache::{fingerprint, CachedEngine, Memo};
pub use catalog::{
    catalog_entry, conductor_catalog, filter_catalog, minimum_size_for_ampacity, next_size_up,
    ConductorCatalogEntry, ConductorMaterial, ConductorSize, ConduitMaterial, PhaseConfiguration,
};
pub use engine::{
    compliance_limit_percent, compute_power_loss, compute_voltage_drop, evaluate,
    required_ampacity_a, AmpacityRating, ComplianceStatus, PowerLoss, VoltageDropBreakdown,
    VoltageDropResult,
};
pub use error::{CalcError, CalcResult};
pub use inputs::{
    CircuitConfiguration, CircuitType, VoltageDropInputs, WirewayKind, DEFAULT_POWER_FACTOR,
    DEFAULT_STARTING_CURRENT_MULTIPLIER,
};
pub use profile::voltage_profile;
