//! Scenario impact calculator.
//!
//! Pure function of the four what-if sliders, using fixed policy
//! coefficients. The five outputs are independent — no slider's output
//! depends on another slider's value. Inputs outside the documented
//! slider ranges are rejected, never computed silently.
//!
//! This is a planning widget with fixed multipliers. The per-district
//! empirical model lives in [`crate::predict`] and the two are
//! intentionally separate.

use serde::{Deserialize, Serialize};

use crate::units::{self, TemperatureUnit};

// ---------------------------------------------------------------------------
// Slider ranges
// ---------------------------------------------------------------------------

/// Inclusive bounds and step of a scenario slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderRange {
    const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Whether a value lies inside the slider's bounds.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp a value to the slider's bounds.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Vegetation increase slider, percent.
pub const VEGETATION_INCREASE: SliderRange = SliderRange::new(5.0, 50.0, 5.0);
/// Heat reduction slider, °C.
pub const HEAT_REDUCTION: SliderRange = SliderRange::new(0.5, 10.0, 0.5);
/// Air quality (PM2.5) reduction slider, µg/m³.
pub const AIR_QUALITY_REDUCTION: SliderRange = SliderRange::new(5.0, 50.0, 5.0);
/// Population change slider, percent. The −20 floor keeps the green-space
/// denominator at or above 80.
pub const POPULATION_CHANGE: SliderRange = SliderRange::new(-20.0, 30.0, 5.0);

// ---------------------------------------------------------------------------
// Policy coefficients
// ---------------------------------------------------------------------------

/// °C of temperature reduction per percent of vegetation increase.
pub const TEMP_REDUCTION_PER_VEGETATION_PCT: f64 = 0.3;
/// Percent of PM2.5/AOD reduction per percent of vegetation increase.
pub const PM25_REDUCTION_PER_VEGETATION_PCT: f64 = 0.8;
/// Comfort-index points gained per °C of heat reduction.
pub const COMFORT_GAIN_PER_DEGREE: f64 = 4.2;
/// Percent of health-risk reduction per µg/m³ of PM2.5 reduction.
pub const HEALTH_RISK_REDUCTION_PER_UG: f64 = 0.6;
/// Baseline per-capita green space, m².
pub const BASELINE_GREEN_SPACE_M2: f64 = 12.5;

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

/// The four slider values. Transient UI state — never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    /// Vegetation (NDVI) increase, percent.
    pub vegetation_increase_pct: f64,
    /// Land surface temperature reduction, °C.
    pub heat_reduction_c: f64,
    /// PM2.5 reduction, µg/m³.
    pub air_quality_reduction_ug: f64,
    /// Population change, percent (may be negative).
    pub population_change_pct: f64,
}

impl Default for ScenarioInput {
    fn default() -> Self {
        Self {
            vegetation_increase_pct: 10.0,
            heat_reduction_c: 2.0,
            air_quality_reduction_ug: 15.0,
            population_change_pct: 5.0,
        }
    }
}

impl ScenarioInput {
    /// Check every slider against its documented range.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        for (name, value, range) in self.fields() {
            if !range.contains(value) {
                return Err(ScenarioError::OutOfRange {
                    slider: name,
                    value,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }

    /// Copy with every slider clamped into its range. Used by UI stepping;
    /// [`project`] still validates rather than clamping.
    pub fn clamped(self) -> Self {
        Self {
            vegetation_increase_pct: VEGETATION_INCREASE.clamp(self.vegetation_increase_pct),
            heat_reduction_c: HEAT_REDUCTION.clamp(self.heat_reduction_c),
            air_quality_reduction_ug: AIR_QUALITY_REDUCTION.clamp(self.air_quality_reduction_ug),
            population_change_pct: POPULATION_CHANGE.clamp(self.population_change_pct),
        }
    }

    fn fields(&self) -> [(&'static str, f64, SliderRange); 4] {
        [
            (
                "vegetation_increase_pct",
                self.vegetation_increase_pct,
                VEGETATION_INCREASE,
            ),
            ("heat_reduction_c", self.heat_reduction_c, HEAT_REDUCTION),
            (
                "air_quality_reduction_ug",
                self.air_quality_reduction_ug,
                AIR_QUALITY_REDUCTION,
            ),
            (
                "population_change_pct",
                self.population_change_pct,
                POPULATION_CHANGE,
            ),
        ]
    }
}

/// Derived impacts. Read-only; recomputed on every input change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioImpact {
    /// Temperature reduction, °C (a delta — see
    /// [`ScenarioImpact::temperature_reduction_in`] for display units).
    pub temperature_reduction_c: f64,
    /// PM2.5/AOD reduction, percent.
    pub pm25_reduction_pct: f64,
    /// Comfort-index gain, points.
    pub comfort_gain_points: f64,
    /// Health-risk reduction, percent.
    pub health_risk_reduction_pct: f64,
    /// Per-capita green space after the population change, m².
    pub per_capita_green_space_m2: f64,
}

impl ScenarioImpact {
    /// Temperature reduction converted for display: ×9/5 under Fahrenheit,
    /// numerically unchanged under Kelvin (only the suffix differs).
    pub fn temperature_reduction_in(&self, unit: TemperatureUnit) -> f64 {
        units::convert_delta(self.temperature_reduction_c, unit)
    }
}

/// Error from the scenario calculator.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// A slider value fell outside its documented range.
    OutOfRange {
        slider: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange {
                slider,
                value,
                min,
                max,
            } => write!(f, "{slider} = {value} outside [{min}, {max}]"),
        }
    }
}

impl std::error::Error for ScenarioError {}

/// Project the impact of a scenario.
///
/// Validates the input first; every output is a fixed linear function of
/// exactly one slider. The green-space denominator is ≥ 80 by the clamped
/// population range, so the division cannot blow up.
pub fn project(input: &ScenarioInput) -> Result<ScenarioImpact, ScenarioError> {
    input.validate()?;
    Ok(ScenarioImpact {
        temperature_reduction_c: input.vegetation_increase_pct * TEMP_REDUCTION_PER_VEGETATION_PCT,
        pm25_reduction_pct: input.vegetation_increase_pct * PM25_REDUCTION_PER_VEGETATION_PCT,
        comfort_gain_points: input.heat_reduction_c * COMFORT_GAIN_PER_DEGREE,
        health_risk_reduction_pct: input.air_quality_reduction_ug * HEALTH_RISK_REDUCTION_PER_UG,
        per_capita_green_space_m2: BASELINE_GREEN_SPACE_M2 * 100.0
            / (100.0 + input.population_change_pct),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Projection values
    // -----------------------------------------------------------------------

    #[test]
    fn vegetation_ten_percent() {
        let impact = project(&ScenarioInput {
            vegetation_increase_pct: 10.0,
            ..Default::default()
        })
        .unwrap();
        assert!((impact.temperature_reduction_c - 3.0).abs() < 1e-12);
        assert!((impact.pm25_reduction_pct - 8.0).abs() < 1e-12);
    }

    #[test]
    fn comfort_and_health_coefficients() {
        let impact = project(&ScenarioInput {
            heat_reduction_c: 2.0,
            air_quality_reduction_ug: 15.0,
            ..Default::default()
        })
        .unwrap();
        assert!((impact.comfort_gain_points - 8.4).abs() < 1e-12);
        assert!((impact.health_risk_reduction_pct - 9.0).abs() < 1e-12);
    }

    #[test]
    fn green_space_per_capita() {
        let impact = project(&ScenarioInput {
            population_change_pct: 5.0,
            ..Default::default()
        })
        .unwrap();
        assert!((impact.per_capita_green_space_m2 - 12.5 * 100.0 / 105.0).abs() < 1e-12);
    }

    #[test]
    fn green_space_at_population_floor() {
        // Densest allowed decline: denominator 80, no division error.
        let impact = project(&ScenarioInput {
            population_change_pct: -20.0,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(impact.per_capita_green_space_m2, 15.625);
    }

    #[test]
    fn outputs_are_independent() {
        let base = project(&ScenarioInput::default()).unwrap();
        let moved = project(&ScenarioInput {
            heat_reduction_c: 9.0,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(base.temperature_reduction_c, moved.temperature_reduction_c);
        assert_eq!(base.pm25_reduction_pct, moved.pm25_reduction_pct);
        assert_eq!(
            base.per_capita_green_space_m2,
            moved.per_capita_green_space_m2
        );
        assert_ne!(base.comfort_gain_points, moved.comfort_gain_points);
    }

    // -----------------------------------------------------------------------
    // Range handling
    // -----------------------------------------------------------------------

    #[test]
    fn out_of_range_is_rejected() {
        let err = project(&ScenarioInput {
            population_change_pct: -25.0,
            ..Default::default()
        })
        .unwrap_err();
        match err {
            ScenarioError::OutOfRange { slider, .. } => {
                assert_eq!(slider, "population_change_pct");
            }
        }
    }

    #[test]
    fn vegetation_below_min_is_rejected() {
        assert!(
            project(&ScenarioInput {
                vegetation_increase_pct: 0.0,
                ..Default::default()
            })
            .is_err()
        );
    }

    #[test]
    fn clamped_pulls_into_range() {
        let input = ScenarioInput {
            vegetation_increase_pct: 99.0,
            heat_reduction_c: 0.0,
            air_quality_reduction_ug: 15.0,
            population_change_pct: -50.0,
        }
        .clamped();
        assert_eq!(input.vegetation_increase_pct, 50.0);
        assert_eq!(input.heat_reduction_c, 0.5);
        assert_eq!(input.population_change_pct, -20.0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn default_input_is_valid() {
        assert!(ScenarioInput::default().validate().is_ok());
    }

    // -----------------------------------------------------------------------
    // Display-unit conversion
    // -----------------------------------------------------------------------

    #[test]
    fn temperature_delta_display_units() {
        let impact = project(&ScenarioInput {
            vegetation_increase_pct: 10.0,
            ..Default::default()
        })
        .unwrap();
        assert!((impact.temperature_reduction_in(TemperatureUnit::Celsius) - 3.0).abs() < 1e-12);
        assert!(
            (impact.temperature_reduction_in(TemperatureUnit::Fahrenheit) - 5.4).abs() < 1e-12
        );
        assert!((impact.temperature_reduction_in(TemperatureUnit::Kelvin) - 3.0).abs() < 1e-12);
    }
}
