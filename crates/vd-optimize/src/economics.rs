//! Multi-year economic comparison of conductor choices.
//!
//! Capital cost scales with copper in the ground; operating cost scales with
//! resistive losses. The recommendation prefers the smallest compliant size
//! unless a larger one pays back its extra capital within the horizon.

use serde::{Deserialize, Serialize};

use vd_calc::{
    catalog_entry, compliance_limit_percent, compute_power_loss, compute_voltage_drop,
    ConductorMaterial, ConductorSize, VoltageDropInputs,
};

use crate::error::{OptimizeError, OptimizeResult};

/// Study period for total cost of ownership, years.
pub const STUDY_PERIOD_YEARS: f64 = 5.0;

/// Tunable knobs for the cost model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicAssumptions {
    /// Current-carrying conductors per run.
    pub conductor_count: u32,
    pub operating_hours_per_year: f64,
    pub energy_price_per_kwh: f64,
    /// Labor/equipment base for the installation curve.
    pub base_installation_cost: f64,
    /// Area the installation curve is normalized against, circular mils.
    pub baseline_area_cmil: f64,
    /// A larger size is recommended only if it pays back within this.
    pub payback_horizon_years: f64,
}

impl Default for EconomicAssumptions {
    fn default() -> Self {
        Self {
            conductor_count: 2,
            operating_hours_per_year: 3000.0,
            energy_price_per_kwh: 0.12,
            base_installation_cost: 500.0,
            baseline_area_cmil: 10_380.0,
            payback_horizon_years: 3.0,
        }
    }
}

/// Installed cost per circular-mil-foot of conductor metal.
pub fn cost_per_cmil_ft(material: ConductorMaterial) -> f64 {
    match material {
        ConductorMaterial::Copper => 1.2e-5,
        ConductorMaterial::Aluminum => 0.45e-5,
    }
}

/// Cost breakdown for one candidate size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConductorEconomics {
    pub size: ConductorSize,
    pub area_cmil: f64,
    pub voltage_drop_percent: f64,
    pub compliant: bool,
    pub power_loss_w: f64,
    pub material_cost: f64,
    pub installation_cost: f64,
    pub annual_operating_cost: f64,
    pub total_cost_of_ownership: f64,
    /// Years for the extra capital over the baseline (smallest compliant
    /// candidate) to pay back through lower losses. `None` means never.
    pub payback_years: Option<f64>,
}

impl ConductorEconomics {
    pub fn capital_cost(&self) -> f64 {
        self.material_cost + self.installation_cost
    }
}

fn installation_cost(area_cmil: f64, assumptions: &EconomicAssumptions) -> f64 {
    assumptions.base_installation_cost
        * (0.8 + 0.4 * (area_cmil / assumptions.baseline_area_cmil + 0.5).ln())
}

/// Evaluate every candidate size against the same circuit and price the
/// differences. Paybacks are relative to the smallest compliant candidate.
pub fn compare_conductors(
    inputs: &VoltageDropInputs,
    candidates: &[ConductorSize],
    assumptions: &EconomicAssumptions,
) -> OptimizeResult<Vec<ConductorEconomics>> {
    if candidates.is_empty() {
        return Err(OptimizeError::EmptyCandidates);
    }
    inputs.validate()?;

    let limit = compliance_limit_percent(inputs.circuit.circuit_type);
    let mut rows = Vec::with_capacity(candidates.len());

    for &size in candidates {
        let mut candidate = inputs.clone();
        candidate.conductor_size = size;
        let breakdown = compute_voltage_drop(&candidate)?;
        let loss = compute_power_loss(&candidate)?;
        let voltage_drop_percent = breakdown.drop_v / candidate.system_voltage_v * 100.0;
        let area_cmil = catalog_entry(size).area_cmil;

        let material_cost = cost_per_cmil_ft(inputs.conductor_material)
            * area_cmil
            * inputs.conductor_length_ft
            * assumptions.conductor_count as f64;
        let installation_cost = installation_cost(area_cmil, assumptions);
        let annual_operating_cost = (loss.resistive_w / 1000.0)
            * assumptions.operating_hours_per_year
            * assumptions.energy_price_per_kwh;

        rows.push(ConductorEconomics {
            size,
            area_cmil,
            voltage_drop_percent,
            compliant: voltage_drop_percent <= limit,
            power_loss_w: loss.resistive_w,
            material_cost,
            installation_cost,
            annual_operating_cost,
            total_cost_of_ownership: material_cost
                + installation_cost
                + STUDY_PERIOD_YEARS * annual_operating_cost,
            payback_years: None,
        });
    }

    rows.sort_by(|a, b| {
        a.area_cmil
            .partial_cmp(&b.area_cmil)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Baseline for payback: the smallest compliant candidate.
    let baseline = rows
        .iter()
        .find(|row| row.compliant)
        .map(|row| (row.capital_cost(), row.annual_operating_cost, row.size));

    if let Some((base_capital, base_annual, base_size)) = baseline {
        for row in rows.iter_mut() {
            if row.size == base_size {
                continue;
            }
            let extra_capital = row.capital_cost() - base_capital;
            let annual_savings = base_annual - row.annual_operating_cost;
            if annual_savings > 0.0 {
                row.payback_years = Some((extra_capital / annual_savings).max(0.0));
            }
        }
    }

    Ok(rows)
}

/// The optimizer's verdict over a candidate set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicRecommendation {
    pub recommended: ConductorSize,
    /// Smallest compliant candidate, when one exists.
    pub baseline: Option<ConductorSize>,
    pub payback_years: Option<f64>,
    pub reason: String,
    pub comparisons: Vec<ConductorEconomics>,
}

/// Smallest compliant size, unless a larger compliant size pays back its
/// incremental capital within the horizon.
pub fn recommend_conductor(
    inputs: &VoltageDropInputs,
    candidates: &[ConductorSize],
    assumptions: &EconomicAssumptions,
) -> OptimizeResult<EconomicRecommendation> {
    let comparisons = compare_conductors(inputs, candidates, assumptions)?;

    let baseline = match comparisons.iter().find(|row| row.compliant) {
        Some(row) => row,
        None => {
            let largest = comparisons
                .last()
                .expect("compare_conductors rejects empty candidate sets");
            return Ok(EconomicRecommendation {
                recommended: largest.size,
                baseline: None,
                payback_years: None,
                reason: format!(
                    "No compliant size among the candidates; {} has the lowest voltage drop ({:.2}%)",
                    largest.size, largest.voltage_drop_percent,
                ),
                comparisons,
            });
        }
    };

    let upgrade = comparisons
        .iter()
        .filter(|row| {
            row.compliant
                && row.area_cmil > baseline.area_cmil
                && row
                    .payback_years
                    .is_some_and(|years| years <= assumptions.payback_horizon_years)
        })
        .min_by(|a, b| {
            a.payback_years
                .partial_cmp(&b.payback_years)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let recommendation = match upgrade {
        Some(row) => {
            let payback = row.payback_years.expect("filtered on payback");
            tracing::debug!(size = %row.size, payback_years = payback, "upsizing pays back");
            EconomicRecommendation {
                recommended: row.size,
                baseline: Some(baseline.size),
                payback_years: row.payback_years,
                reason: format!(
                    "{} recovers its extra ${:.0} in {:.1} years through ${:.0}/yr lower losses",
                    row.size,
                    row.capital_cost() - baseline.capital_cost(),
                    payback,
                    baseline.annual_operating_cost - row.annual_operating_cost,
                ),
                comparisons: comparisons.clone(),
            }
        }
        None => EconomicRecommendation {
            recommended: baseline.size,
            baseline: Some(baseline.size),
            payback_years: None,
            reason: format!(
                "{} is the smallest compliant size; no larger candidate pays back within {:.1} years",
                baseline.size, assumptions.payback_horizon_years,
            ),
            comparisons: comparisons.clone(),
        },
    };

    Ok(recommendation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vd_calc::{
        CircuitConfiguration, ConduitMaterial, PhaseConfiguration,
    };

    fn inputs() -> VoltageDropInputs {
        VoltageDropInputs {
            system_voltage_v: 230.0,
            load_current_a: 20.0,
            conductor_length_ft: 100.0,
            conductor_size: ConductorSize::Awg12,
            conductor_material: ConductorMaterial::Copper,
            conduit_material: ConduitMaterial::Pvc,
            phase: PhaseConfiguration::Single,
            ambient_temperature_c: 30.0,
            power_factor: 0.85,
            circuit: CircuitConfiguration::branch(),
        }
    }

    fn candidates() -> Vec<ConductorSize> {
        vec![
            ConductorSize::Awg12,
            ConductorSize::Awg10,
            ConductorSize::Awg8,
            ConductorSize::Awg6,
        ]
    }

    #[test]
    fn rows_come_back_sorted_by_area() {
        let shuffled = vec![
            ConductorSize::Awg6,
            ConductorSize::Awg12,
            ConductorSize::Awg8,
        ];
        let rows = compare_conductors(&inputs(), &shuffled, &EconomicAssumptions::default())
            .unwrap();
        assert_eq!(rows[0].size, ConductorSize::Awg12);
        assert_eq!(rows[2].size, ConductorSize::Awg6);
    }

    #[test]
    fn material_cost_grows_with_area() {
        let rows =
            compare_conductors(&inputs(), &candidates(), &EconomicAssumptions::default())
                .unwrap();
        for pair in rows.windows(2) {
            assert!(pair[1].material_cost > pair[0].material_cost);
            assert!(pair[1].installation_cost > pair[0].installation_cost);
            assert!(pair[1].annual_operating_cost < pair[0].annual_operating_cost);
        }
    }

    #[test]
    fn baseline_and_non_compliant_rows_have_no_payback() {
        let rows =
            compare_conductors(&inputs(), &candidates(), &EconomicAssumptions::default())
                .unwrap();
        // 12 AWG is non-compliant on this run, 10 AWG is the baseline.
        assert!(!rows[0].compliant);
        assert!(rows[0].payback_years.is_none());
        assert!(rows[1].compliant);
        assert!(rows[1].payback_years.is_none());
    }

    #[test]
    fn larger_sizes_report_payback_when_losses_shrink() {
        let rows =
            compare_conductors(&inputs(), &candidates(), &EconomicAssumptions::default())
                .unwrap();
        let eight = rows.iter().find(|r| r.size == ConductorSize::Awg8).unwrap();
        assert!(eight.payback_years.is_some());
        assert!(eight.payback_years.unwrap() > 0.0);
    }

    #[test]
    fn empty_candidate_set_is_an_error() {
        let result = compare_conductors(&inputs(), &[], &EconomicAssumptions::default());
        assert!(matches!(result, Err(OptimizeError::EmptyCandidates)));
    }

    #[test]
    fn recommendation_defaults_to_smallest_compliant() {
        // Cheap energy: upsizing never pays back.
        let mut assumptions = EconomicAssumptions::default();
        assumptions.energy_price_per_kwh = 0.001;
        let rec = recommend_conductor(&inputs(), &candidates(), &assumptions).unwrap();
        assert_eq!(rec.recommended, ConductorSize::Awg10);
        assert!(rec.payback_years.is_none());
        assert!(rec.reason.contains("smallest compliant"));
    }

    #[test]
    fn expensive_energy_justifies_upsizing() {
        let mut assumptions = EconomicAssumptions::default();
        assumptions.energy_price_per_kwh = 1.5;
        assumptions.operating_hours_per_year = 8760.0;
        let rec = recommend_conductor(&inputs(), &candidates(), &assumptions).unwrap();
        let baseline_area = ConductorSize::Awg10.area_cmil();
        assert!(rec.recommended.area_cmil() > baseline_area);
        assert!(rec.payback_years.unwrap() <= assumptions.payback_horizon_years);
        assert!(rec.reason.contains("recovers"));
    }

    #[test]
    fn hopeless_candidate_set_reports_no_compliant_size() {
        let mut far = inputs();
        far.conductor_length_ft = 3000.0;
        let rec = recommend_conductor(
            &far,
            &[ConductorSize::Awg12, ConductorSize::Awg10],
            &EconomicAssumptions::default(),
        )
        .unwrap();
        assert_eq!(rec.recommended, ConductorSize::Awg10);
        assert!(rec.baseline.is_none());
        assert!(rec.reason.contains("No compliant size"));
    }
}
