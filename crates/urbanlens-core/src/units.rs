//! Temperature unit handling.
//!
//! **ALL** stored temperatures are canonical Celsius — conversion happens
//! exactly once, at display or series-generation time, never on the way in.
//! Converted values are display-only and are never fed back into further
//! computation.

use serde::{Deserialize, Serialize};

/// Display unit for temperature values. Storage is always Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    /// Degrees Celsius (canonical, identity conversion).
    #[default]
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
    /// Kelvin.
    Kelvin,
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

impl TemperatureUnit {
    /// Unit suffix as shown next to a formatted value.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
            Self::Kelvin => "K",
        }
    }

    /// Cycle to the next unit (for the dashboard toggle).
    pub fn next(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Kelvin,
            Self::Kelvin => Self::Celsius,
        }
    }
}

/// Convert canonical Celsius to Fahrenheit.
pub fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Convert canonical Celsius to Kelvin.
pub fn to_kelvin(celsius: f64) -> f64 {
    celsius + 273.15
}

/// Convert a canonical Celsius reading into the given display unit.
pub fn convert(celsius: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => to_fahrenheit(celsius),
        TemperatureUnit::Kelvin => to_kelvin(celsius),
    }
}

/// Convert a temperature *difference* (delta) into the given display unit.
///
/// A delta scales by 9/5 under Fahrenheit conversion and is numerically
/// unchanged under Kelvin conversion (only the suffix differs).
pub fn convert_delta(delta_celsius: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius | TemperatureUnit::Kelvin => delta_celsius,
        TemperatureUnit::Fahrenheit => delta_celsius * 9.0 / 5.0,
    }
}

/// Format a canonical Celsius reading for display in the given unit.
///
/// One decimal place, unit-suffixed. Repeated calls with the same input
/// produce the same string.
pub fn format_temperature(celsius: f64, unit: TemperatureUnit) -> String {
    format!("{:.1}{}", convert(celsius, unit), unit.suffix())
}
