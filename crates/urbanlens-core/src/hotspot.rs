//! Hotspot computation: per-district exposure indices.
//!
//! Pipeline:
//! 1. Derive composite indices per district (tree equity, heat exposure,
//!    air exposure)
//! 2. Smooth skew with `ln(1 + x)`
//! 3. Min-max normalize each index across the cohort
//! 4. Attach a rule-based recommendation
//!
//! The normalized indices feed the priority ranking in [`crate::priority`].

use serde::{Deserialize, Serialize};

use crate::district::DistrictReading;
use crate::rules;

/// Guard against division by zero-population districts.
const POPULATION_EPS: f64 = 1e-5;
/// Guard against zero-span normalization denominators.
const NORM_EPS: f64 = 1e-12;

/// A district reading with derived exposure indices and a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotRecord {
    #[serde(flatten)]
    pub reading: DistrictReading,
    /// ln(1 + vegetation / population): green access per resident.
    pub tree_equity: f64,
    /// ln(1 + heat × population): heat burden weighted by residents.
    pub heat_exposure: f64,
    /// ln(1 + air × population): pollution burden weighted by residents.
    pub air_exposure: f64,
    /// Tree equity min-max normalized over the cohort, [0, 1].
    pub tree_equity_norm: f64,
    /// Heat exposure min-max normalized over the cohort, [0, 1].
    pub heat_exposure_norm: f64,
    /// Air exposure min-max normalized over the cohort, [0, 1].
    pub air_exposure_norm: f64,
    /// Rule-based intervention recommendation.
    pub recommendation: String,
}

/// Compute hotspot records for a cohort of district readings.
///
/// Normalization spans the given cohort: the least-exposed district maps
/// to 0, the most-exposed to 1. An empty input yields an empty output.
pub fn compute_hotspots(readings: &[DistrictReading]) -> Vec<HotspotRecord> {
    let tree: Vec<f64> = readings
        .iter()
        .map(|r| (r.vegetation / (r.population + POPULATION_EPS)).ln_1p())
        .collect();
    let heat: Vec<f64> = readings
        .iter()
        .map(|r| (r.heat_island_c * r.population).ln_1p())
        .collect();
    let air: Vec<f64> = readings
        .iter()
        .map(|r| (r.air_quality * r.population).ln_1p())
        .collect();

    let tree_norm = min_max_normalize(&tree);
    let heat_norm = min_max_normalize(&heat);
    let air_norm = min_max_normalize(&air);

    readings
        .iter()
        .enumerate()
        .map(|(i, reading)| HotspotRecord {
            reading: reading.clone(),
            tree_equity: tree[i],
            heat_exposure: heat[i],
            air_exposure: air[i],
            tree_equity_norm: tree_norm[i],
            heat_exposure_norm: heat_norm[i],
            air_exposure_norm: air_norm[i],
            recommendation: rules::recommend(reading).to_string(),
        })
        .collect()
}

/// Min-max normalize a column to [0, 1]. A zero-span column maps to all
/// zeros via the epsilon denominator.
fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min + NORM_EPS;
    values.iter().map(|v| (v - min) / span).collect()
}
