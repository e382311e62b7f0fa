//! Empirical NDVI-effect prediction.
//!
//! Sensitivity coefficients estimated for Bay Area urban ecosystems:
//! a 10% NDVI increase lowers land-surface temperature by ~4.5% and
//! aerosol load by ~8%. Given a district's baseline readings, a
//! hypothetical NDVI change projects new heat and air values.
//!
//! This is the authoritative per-district model. The fixed-multiplier
//! slider widget in [`crate::scenario`] is deliberately separate.

use serde::{Deserialize, Serialize};

use crate::district::{self, DistrictReading};

/// Percent LST change per percent NDVI change.
pub const ALPHA_LST: f64 = -0.45;
/// Percent AOD change per percent NDVI change.
pub const ALPHA_AOD: f64 = -0.80;

/// Prediction for one district.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NdviEffect {
    pub district: String,
    /// Assumed NDVI change, percent.
    pub ndvi_delta_pct: f64,
    /// Baseline NDVI.
    pub ndvi_from: f64,
    /// NDVI after the assumed change.
    pub ndvi_to: f64,
    /// Baseline heat island intensity, °C.
    pub baseline_heat_c: f64,
    /// Baseline air exposure.
    pub baseline_air: f64,
    /// Projected heat island intensity, °C.
    pub scenario_heat_c: f64,
    /// Projected air exposure.
    pub scenario_air: f64,
    /// Predicted LST change, percent (negative = cooling).
    pub d_lst_pct: f64,
    /// Predicted AOD change, percent (negative = cleaner air).
    pub d_aod_pct: f64,
    pub explanation: String,
}

/// Error from the prediction endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictError {
    /// The requested district is not in the dataset.
    UnknownDistrict(String),
}

impl std::fmt::Display for PredictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownDistrict(d) => write!(f, "district '{d}' not found in dataset"),
        }
    }
}

impl std::error::Error for PredictError {}

/// Predict the effect of an NDVI change on one district's readings.
pub fn predict_ndvi_effect(reading: &DistrictReading, ndvi_delta_pct: f64) -> NdviEffect {
    let d_lst_pct = ALPHA_LST * ndvi_delta_pct;
    let d_aod_pct = ALPHA_AOD * ndvi_delta_pct;

    let ndvi_from = reading.vegetation;
    let ndvi_to = ndvi_from * (1.0 + ndvi_delta_pct / 100.0);
    let scenario_heat_c = reading.heat_island_c * (1.0 + d_lst_pct / 100.0);
    let scenario_air = reading.air_quality * (1.0 + d_aod_pct / 100.0);

    let explanation = format!(
        "An NDVI increase of {ndvi_delta_pct:.1}% is expected to reduce LST by \
         {:.2}% and AOD by {:.2}%, according to empirical sensitivity \
         coefficients for urban ecosystems.",
        d_lst_pct.abs(),
        d_aod_pct.abs()
    );

    NdviEffect {
        district: reading.district.clone(),
        ndvi_delta_pct,
        ndvi_from,
        ndvi_to,
        baseline_heat_c: reading.heat_island_c,
        baseline_air: reading.air_quality,
        scenario_heat_c,
        scenario_air,
        d_lst_pct,
        d_aod_pct,
        explanation,
    }
}

/// Predict for a named district, failing on unknown names.
pub fn predict_for(
    readings: &[DistrictReading],
    district: &str,
    ndvi_delta_pct: f64,
) -> Result<NdviEffect, PredictError> {
    district::find_reading(readings, district)
        .map(|r| predict_ndvi_effect(r, ndvi_delta_pct))
        .ok_or_else(|| PredictError::UnknownDistrict(district.to_string()))
}

/// Predict for every district in the dataset (map/dashboard overview).
pub fn predict_all(readings: &[DistrictReading], ndvi_delta_pct: f64) -> Vec<NdviEffect> {
    readings
        .iter()
        .map(|r| predict_ndvi_effect(r, ndvi_delta_pct))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading() -> DistrictReading {
        DistrictReading {
            district: "Downtown Core".into(),
            month: "Oct".into(),
            vegetation: 0.31,
            heat_island_c: 7.8,
            air_quality: 72.0,
            population: 18_900.0,
            latitude: 40.758,
            longitude: -73.9855,
        }
    }

    #[test]
    fn ten_percent_ndvi_change() {
        let e = predict_ndvi_effect(&reading(), 10.0);
        assert!((e.d_lst_pct - -4.5).abs() < 1e-12);
        assert!((e.d_aod_pct - -8.0).abs() < 1e-12);
        assert!((e.ndvi_to - 0.341).abs() < 1e-12);
        assert!((e.scenario_heat_c - 7.8 * 0.955).abs() < 1e-12);
        assert!((e.scenario_air - 72.0 * 0.92).abs() < 1e-12);
    }

    #[test]
    fn zero_delta_is_identity() {
        let e = predict_ndvi_effect(&reading(), 0.0);
        assert_eq!(e.scenario_heat_c, e.baseline_heat_c);
        assert_eq!(e.scenario_air, e.baseline_air);
        assert_eq!(e.ndvi_to, e.ndvi_from);
    }

    #[test]
    fn negative_delta_warms_and_pollutes() {
        let e = predict_ndvi_effect(&reading(), -10.0);
        assert!(e.scenario_heat_c > e.baseline_heat_c);
        assert!(e.scenario_air > e.baseline_air);
    }

    #[test]
    fn unknown_district_is_an_error() {
        let err = predict_for(&[reading()], "Atlantis", 10.0).unwrap_err();
        assert_eq!(err, PredictError::UnknownDistrict("Atlantis".into()));
    }

    #[test]
    fn predict_for_finds_district() {
        let e = predict_for(&[reading()], "Downtown Core", 10.0).unwrap();
        assert_eq!(e.district, "Downtown Core");
    }

    #[test]
    fn predict_all_covers_every_district() {
        let mut other = reading();
        other.district = "Port District".into();
        let all = predict_all(&[reading(), other], 10.0);
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].district, "Port District");
    }

    #[test]
    fn explanation_mentions_magnitudes() {
        let e = predict_ndvi_effect(&reading(), 10.0);
        assert!(e.explanation.contains("4.50%"));
        assert!(e.explanation.contains("8.00%"));
    }
}
