//! Conductor catalog: sizes, cross-sections, and ampacity ratings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalcError;

/// Conductor sizes carried by the catalog, smallest cross-section first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ConductorSize {
    #[serde(rename = "14 AWG")]
    Awg14,
    #[serde(rename = "12 AWG")]
    Awg12,
    #[serde(rename = "10 AWG")]
    Awg10,
    #[serde(rename = "8 AWG")]
    Awg8,
    #[serde(rename = "6 AWG")]
    Awg6,
    #[serde(rename = "4 AWG")]
    Awg4,
    #[serde(rename = "3 AWG")]
    Awg3,
    #[serde(rename = "2 AWG")]
    Awg2,
    #[serde(rename = "1 AWG")]
    Awg1,
    #[serde(rename = "1/0 AWG")]
    Awg1_0,
    #[serde(rename = "2/0 AWG")]
    Awg2_0,
    #[serde(rename = "3/0 AWG")]
    Awg3_0,
    #[serde(rename = "4/0 AWG")]
    Awg4_0,
    #[serde(rename = "250 kcmil")]
    Kcmil250,
    #[serde(rename = "300 kcmil")]
    Kcmil300,
    #[serde(rename = "350 kcmil")]
    Kcmil350,
    #[serde(rename = "400 kcmil")]
    Kcmil400,
    #[serde(rename = "500 kcmil")]
    Kcmil500,
    #[serde(rename = "600 kcmil")]
    Kcmil600,
    #[serde(rename = "750 kcmil")]
    Kcmil750,
    #[serde(rename = "1000 kcmil")]
    Kcmil1000,
}

impl ConductorSize {
    pub const ALL: [ConductorSize; 21] = [
        ConductorSize::Awg14,
        ConductorSize::Awg12,
        ConductorSize::Awg10,
        ConductorSize::Awg8,
        ConductorSize::Awg6,
        ConductorSize::Awg4,
        ConductorSize::Awg3,
        ConductorSize::Awg2,
        ConductorSize::Awg1,
        ConductorSize::Awg1_0,
        ConductorSize::Awg2_0,
        ConductorSize::Awg3_0,
        ConductorSize::Awg4_0,
        ConductorSize::Kcmil250,
        ConductorSize::Kcmil300,
        ConductorSize::Kcmil350,
        ConductorSize::Kcmil400,
        ConductorSize::Kcmil500,
        ConductorSize::Kcmil600,
        ConductorSize::Kcmil750,
        ConductorSize::Kcmil1000,
    ];

    /// Display label, also the serialized catalog key.
    pub fn label(self) -> &'static str {
        match self {
            ConductorSize::Awg14 => "14 AWG",
            ConductorSize::Awg12 => "12 AWG",
            ConductorSize::Awg10 => "10 AWG",
            ConductorSize::Awg8 => "8 AWG",
            ConductorSize::Awg6 => "6 AWG",
            ConductorSize::Awg4 => "4 AWG",
            ConductorSize::Awg3 => "3 AWG",
            ConductorSize::Awg2 => "2 AWG",
            ConductorSize::Awg1 => "1 AWG",
            ConductorSize::Awg1_0 => "1/0 AWG",
            ConductorSize::Awg2_0 => "2/0 AWG",
            ConductorSize::Awg3_0 => "3/0 AWG",
            ConductorSize::Awg4_0 => "4/0 AWG",
            ConductorSize::Kcmil250 => "250 kcmil",
            ConductorSize::Kcmil300 => "300 kcmil",
            ConductorSize::Kcmil350 => "350 kcmil",
            ConductorSize::Kcmil400 => "400 kcmil",
            ConductorSize::Kcmil500 => "500 kcmil",
            ConductorSize::Kcmil600 => "600 kcmil",
            ConductorSize::Kcmil750 => "750 kcmil",
            ConductorSize::Kcmil1000 => "1000 kcmil",
        }
    }

    /// Equivalent cross-sectional area in circular mils.
    pub fn area_cmil(self) -> f64 {
        catalog_entry(self).area_cmil
    }
}

impl fmt::Display for ConductorSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ConductorSize {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let query = s.trim();
        ConductorSize::ALL
            .iter()
            .copied()
            .find(|size| size.label().eq_ignore_ascii_case(query))
            .ok_or_else(|| CalcError::UnknownConductorSize {
                size: query.to_string(),
            })
    }
}

/// Conductor material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConductorMaterial {
    Copper,
    Aluminum,
}

impl ConductorMaterial {
    pub fn label(self) -> &'static str {
        match self {
            ConductorMaterial::Copper => "copper",
            ConductorMaterial::Aluminum => "aluminum",
        }
    }
}

impl fmt::Display for ConductorMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ConductorMaterial {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "copper" | "cu" => Ok(ConductorMaterial::Copper),
            "aluminum" | "aluminium" | "al" => Ok(ConductorMaterial::Aluminum),
            _ => Err(CalcError::InvalidInput {
                what: "conductor material must be copper or aluminum",
            }),
        }
    }
}

/// Raceway material around the conductors; drives the reactance lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConduitMaterial {
    Pvc,
    Steel,
    Aluminum,
}

impl ConduitMaterial {
    pub fn label(self) -> &'static str {
        match self {
            ConduitMaterial::Pvc => "pvc",
            ConduitMaterial::Steel => "steel",
            ConduitMaterial::Aluminum => "aluminum",
        }
    }
}

impl fmt::Display for ConduitMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ConduitMaterial {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pvc" => Ok(ConduitMaterial::Pvc),
            "steel" => Ok(ConduitMaterial::Steel),
            "aluminum" | "aluminium" => Ok(ConduitMaterial::Aluminum),
            _ => Err(CalcError::InvalidInput {
                what: "conduit material must be pvc, steel, or aluminum",
            }),
        }
    }
}

/// Phase configuration of the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseConfiguration {
    Single,
    Three,
}

impl PhaseConfiguration {
    pub fn label(self) -> &'static str {
        match self {
            PhaseConfiguration::Single => "single",
            PhaseConfiguration::Three => "three",
        }
    }
}

impl fmt::Display for PhaseConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PhaseConfiguration {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "1" | "1ph" => Ok(PhaseConfiguration::Single),
            "three" | "3" | "3ph" => Ok(PhaseConfiguration::Three),
            _ => Err(CalcError::InvalidInput {
                what: "phase configuration must be single or three",
            }),
        }
    }
}

/// One catalog row. Ampacities are the 75 degC ratings; `None` means the
/// material is not rated at that size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConductorCatalogEntry {
    pub size: ConductorSize,
    pub area_cmil: f64,
    pub ampacity_copper_a: Option<f64>,
    pub ampacity_aluminum_a: Option<f64>,
}

impl ConductorCatalogEntry {
    pub fn ampacity(&self, material: ConductorMaterial) -> Option<f64> {
        match material {
            ConductorMaterial::Copper => self.ampacity_copper_a,
            ConductorMaterial::Aluminum => self.ampacity_aluminum_a,
        }
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }
        self.size.label().to_ascii_lowercase().contains(&query)
    }
}

const CONDUCTOR_CATALOG: [ConductorCatalogEntry; 21] = [
    ConductorCatalogEntry {
        size: ConductorSize::Awg14,
        area_cmil: 4_110.0,
        ampacity_copper_a: Some(20.0),
        ampacity_aluminum_a: None,
    },
    ConductorCatalogEntry {
        size: ConductorSize::Awg12,
        area_cmil: 6_530.0,
        ampacity_copper_a: Some(25.0),
        ampacity_aluminum_a: Some(20.0),
    },
    ConductorCatalogEntry {
        size: ConductorSize::Awg10,
        area_cmil: 10_380.0,
        ampacity_copper_a: Some(35.0),
        ampacity_aluminum_a: Some(30.0),
    },
    ConductorCatalogEntry {
        size: ConductorSize::Awg8,
        area_cmil: 16_510.0,
        ampacity_copper_a: Some(50.0),
        ampacity_aluminum_a: Some(40.0),
    },
    ConductorCatalogEntry {
        size: ConductorSize::Awg6,
        area_cmil: 26_240.0,
        ampacity_copper_a: Some(65.0),
        ampacity_aluminum_a: Some(50.0),
    },
    ConductorCatalogEntry {
        size: ConductorSize::Awg4,
        area_cmil: 41_740.0,
        ampacity_copper_a: Some(85.0),
        ampacity_aluminum_a: Some(65.0),
    },
    ConductorCatalogEntry {
        size: ConductorSize::Awg3,
        area_cmil: 52_620.0,
        ampacity_copper_a: Some(100.0),
        ampacity_aluminum_a: Some(75.0),
    },
    ConductorCatalogEntry {
        size: ConductorSize::Awg2,
        area_cmil: 66_360.0,
        ampacity_copper_a: Some(115.0),
        ampacity_aluminum_a: Some(90.0),
    },
    ConductorCatalogEntry {
        size: ConductorSize::Awg1,
        area_cmil: 83_690.0,
        ampacity_copper_a: Some(130.0),
        ampacity_aluminum_a: Some(100.0),
    },
    ConductorCatalogEntry {
        size: ConductorSize::Awg1_0,
        area_cmil: 105_600.0,
        ampacity_copper_a: Some(150.0),
        ampacity_aluminum_a: Some(120.0),
    },
    ConductorCatalogEntry {
        size: ConductorSize::Awg2_0,
        area_cmil: 133_100.0,
        ampacity_copper_a: Some(175.0),
        ampacity_aluminum_a: Some(135.0),
    },
    ConductorCatalogEntry {
        size: ConductorSize::Awg3_0,
        area_cmil: 167_800.0,
        ampacity_copper_a: Some(200.0),
        ampacity_aluminum_a: Some(155.0),
    },
    ConductorCatalogEntry {
        size: ConductorSize::Awg4_0,
        area_cmil: 211_600.0,
        ampacity_copper_a: Some(230.0),
        ampacity_aluminum_a: Some(180.0),
    },
    ConductorCatalogEntry {
        size: ConductorSize::Kcmil250,
        area_cmil: 250_000.0,
        ampacity_copper_a: Some(255.0),
        ampacity_aluminum_a: Some(205.0),
    },
    ConductorCatalogEntry {
        size: ConductorSize::Kcmil300,
        area_cmil: 300_000.0,
        ampacity_copper_a: Some(285.0),
        ampacity_aluminum_a: Some(230.0),
    },
    ConductorCatalogEntry {
        size: ConductorSize::Kcmil350,
        area_cmil: 350_000.0,
        ampacity_copper_a: Some(310.0),
        ampacity_aluminum_a: Some(250.0),
    },
    ConductorCatalogEntry {
        size: ConductorSize::Kcmil400,
        area_cmil: 400_000.0,
        ampacity_copper_a: Some(335.0),
        ampacity_aluminum_a: Some(270.0),
    },
    ConductorCatalogEntry {
        size: ConductorSize::Kcmil500,
        area_cmil: 500_000.0,
        ampacity_copper_a: Some(380.0),
        ampacity_aluminum_a: Some(310.0),
    },
    ConductorCatalogEntry {
        size: ConductorSize::Kcmil600,
        area_cmil: 600_000.0,
        ampacity_copper_a: Some(420.0),
        ampacity_aluminum_a: Some(340.0),
    },
    ConductorCatalogEntry {
        size: ConductorSize::Kcmil750,
        area_cmil: 750_000.0,
        ampacity_copper_a: Some(475.0),
        ampacity_aluminum_a: Some(385.0),
    },
    ConductorCatalogEntry {
        size: ConductorSize::Kcmil1000,
        area_cmil: 1_000_000.0,
        ampacity_copper_a: Some(545.0),
        ampacity_aluminum_a: Some(445.0),
    },
];

/// The full catalog, ascending by cross-sectional area.
pub fn conductor_catalog() -> &'static [ConductorCatalogEntry] {
    &CONDUCTOR_CATALOG
}

/// Catalog row for a size. Every `ConductorSize` has exactly one row.
pub fn catalog_entry(size: ConductorSize) -> &'static ConductorCatalogEntry {
    CONDUCTOR_CATALOG
        .iter()
        .find(|entry| entry.size == size)
        .expect("every conductor size has a catalog entry")
}

/// Next size up in the catalog, if the given size is not already the largest.
pub fn next_size_up(size: ConductorSize) -> Option<ConductorSize> {
    let idx = ConductorSize::ALL.iter().position(|&s| s == size)?;
    ConductorSize::ALL.get(idx + 1).copied()
}

/// Smallest size whose rating for `material` is at least `required_a`.
pub fn minimum_size_for_ampacity(
    material: ConductorMaterial,
    required_a: f64,
) -> Option<ConductorSize> {
    CONDUCTOR_CATALOG
        .iter()
        .find(|entry| entry.ampacity(material).is_some_and(|a| a >= required_a))
        .map(|entry| entry.size)
}

/// Catalog rows matching a free-text query (empty query matches all).
pub fn filter_catalog(query: &str) -> Vec<ConductorCatalogEntry> {
    conductor_catalog()
        .iter()
        .copied()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn labels_are_unique() {
        let mut seen = HashSet::new();
        for size in ConductorSize::ALL {
            assert!(seen.insert(size.label()), "duplicate label: {}", size);
        }
    }

    #[test]
    fn catalog_is_ascending_by_area() {
        for pair in CONDUCTOR_CATALOG.windows(2) {
            assert!(
                pair[0].area_cmil < pair[1].area_cmil,
                "{} should be smaller than {}",
                pair[0].size,
                pair[1].size
            );
        }
    }

    #[test]
    fn every_size_has_an_entry() {
        for size in ConductorSize::ALL {
            assert_eq!(catalog_entry(size).size, size);
        }
    }

    #[test]
    fn labels_parse_back() {
        for size in ConductorSize::ALL {
            assert_eq!(size.label().parse::<ConductorSize>().unwrap(), size);
        }
        assert!("13 AWG".parse::<ConductorSize>().is_err());
    }

    #[test]
    fn next_size_up_walks_the_catalog() {
        assert_eq!(
            next_size_up(ConductorSize::Awg12),
            Some(ConductorSize::Awg10)
        );
        assert_eq!(next_size_up(ConductorSize::Kcmil1000), None);
    }

    #[test]
    fn aluminum_14_awg_is_unrated() {
        let entry = catalog_entry(ConductorSize::Awg14);
        assert!(entry.ampacity(ConductorMaterial::Copper).is_some());
        assert!(entry.ampacity(ConductorMaterial::Aluminum).is_none());
    }

    #[test]
    fn minimum_size_for_ampacity_scans_ascending() {
        assert_eq!(
            minimum_size_for_ampacity(ConductorMaterial::Copper, 20.0),
            Some(ConductorSize::Awg14)
        );
        assert_eq!(
            minimum_size_for_ampacity(ConductorMaterial::Copper, 60.0),
            Some(ConductorSize::Awg6)
        );
        assert_eq!(
            minimum_size_for_ampacity(ConductorMaterial::Aluminum, 20.0),
            Some(ConductorSize::Awg12)
        );
        assert_eq!(
            minimum_size_for_ampacity(ConductorMaterial::Copper, 10_000.0),
            None
        );
    }

    #[test]
    fn filter_matches_kcmil_family() {
        let results = filter_catalog("kcmil");
        assert_eq!(results.len(), 8);
        assert!(filter_catalog("").len() == CONDUCTOR_CATALOG.len());
    }
}
