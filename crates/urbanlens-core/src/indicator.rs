//! Indicator catalog: the four environmental data layers.
//!
//! Each indicator carries its display metadata — wire key, human label,
//! unit, a three-stop color ramp, legend range — so presentation layers
//! never hold per-layer tables of their own.

use serde::{Deserialize, Serialize};

use crate::units::{self, TemperatureUnit};

/// One of the fixed environmental data layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    /// Normalized difference vegetation index, range [0, 1].
    #[serde(rename = "ndvi")]
    Vegetation,
    /// Urban heat island intensity relative to the rural baseline, in °C.
    #[serde(rename = "uhi")]
    HeatIsland,
    /// Aerosol/particulate exposure index, proxy for air quality.
    #[serde(rename = "aod")]
    AerosolDepth,
    /// Resident population.
    Population,
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Indicator {
    /// All indicators in display order.
    pub const ALL: [Indicator; 4] = [
        Self::Vegetation,
        Self::HeatIsland,
        Self::AerosolDepth,
        Self::Population,
    ];

    /// Stable wire identifier.
    pub fn key(self) -> &'static str {
        match self {
            Self::Vegetation => "ndvi",
            Self::HeatIsland => "uhi",
            Self::AerosolDepth => "aod",
            Self::Population => "population",
        }
    }

    /// Parse a wire identifier (case-insensitive).
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "ndvi" | "vegetation" => Some(Self::Vegetation),
            "uhi" | "heat" => Some(Self::HeatIsland),
            "aod" | "air" => Some(Self::AerosolDepth),
            "population" | "pop" => Some(Self::Population),
            _ => None,
        }
    }

    /// Human-readable label for lists and card titles.
    pub fn label(self) -> &'static str {
        match self {
            Self::Vegetation => "NDVI (Vegetation)",
            Self::HeatIsland => "Urban Heat Island",
            Self::AerosolDepth => "AOD (Aerosol Optical Depth)",
            Self::Population => "Population",
        }
    }

    /// Unit suffix shown next to a value. Heat island follows the active
    /// temperature unit; vegetation is dimensionless.
    pub fn unit(self, unit: TemperatureUnit) -> &'static str {
        match self {
            Self::Vegetation => "",
            Self::HeatIsland => unit.suffix(),
            Self::AerosolDepth => "µg/m³",
            Self::Population => "k",
        }
    }

    /// Three-stop color ramp (low / mid / high) for map and chart styling.
    pub fn color_ramp(self) -> [&'static str; 3] {
        match self {
            Self::Vegetation => ["#f7fcf5", "#74c476", "#00441b"],
            Self::HeatIsland => ["#fff5f0", "#fb6a4a", "#67000d"],
            Self::AerosolDepth => ["#f7fbff", "#6baed6", "#08306b"],
            Self::Population => ["#fcfbfd", "#9e9ac8", "#3f007d"],
        }
    }

    /// Valid numeric domain for readings of this indicator.
    pub fn domain(self) -> (f64, f64) {
        match self {
            Self::Vegetation => (0.0, 1.0),
            Self::HeatIsland => (0.0, 45.0),
            Self::AerosolDepth => (0.0, 150.0),
            Self::Population => (0.0, f64::INFINITY),
        }
    }

    /// Legend endpoints as displayed under the color ramp.
    ///
    /// Heat island legend converts to the active temperature unit;
    /// population has no numeric legend.
    pub fn legend(self, unit: TemperatureUnit) -> (String, String) {
        match self {
            Self::Vegetation => ("0.1".into(), "0.9".into()),
            Self::HeatIsland => (
                units::format_temperature(25.0, unit),
                units::format_temperature(45.0, unit),
            ),
            Self::AerosolDepth => ("0 AOD".into(), "1.5 AOD".into()),
            Self::Population => ("Low".into(), "High".into()),
        }
    }

    /// True when values of this indicator are temperatures and need unit
    /// conversion at display time.
    pub fn is_temperature(self) -> bool {
        matches!(self, Self::HeatIsland)
    }

    /// Cycle to the next indicator in display order (for list navigation).
    pub fn next(self) -> Self {
        match self {
            Self::Vegetation => Self::HeatIsland,
            Self::HeatIsland => Self::AerosolDepth,
            Self::AerosolDepth => Self::Population,
            Self::Population => Self::Vegetation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for ind in Indicator::ALL {
            assert_eq!(Indicator::from_key(ind.key()), Some(ind));
        }
    }

    #[test]
    fn from_key_aliases() {
        assert_eq!(Indicator::from_key("NDVI"), Some(Indicator::Vegetation));
        assert_eq!(Indicator::from_key("pop"), Some(Indicator::Population));
        assert_eq!(Indicator::from_key("nope"), None);
    }

    #[test]
    fn heat_island_unit_follows_temperature_unit() {
        assert_eq!(Indicator::HeatIsland.unit(TemperatureUnit::Celsius), "°C");
        assert_eq!(
            Indicator::HeatIsland.unit(TemperatureUnit::Fahrenheit),
            "°F"
        );
        assert_eq!(Indicator::HeatIsland.unit(TemperatureUnit::Kelvin), "K");
        assert_eq!(Indicator::Vegetation.unit(TemperatureUnit::Kelvin), "");
    }

    #[test]
    fn ramps_have_three_stops() {
        for ind in Indicator::ALL {
            let ramp = ind.color_ramp();
            assert_eq!(ramp.len(), 3);
            for stop in ramp {
                assert!(stop.starts_with('#'), "{ind}: bad color stop {stop}");
            }
        }
    }

    #[test]
    fn vegetation_domain_is_unit_interval() {
        assert_eq!(Indicator::Vegetation.domain(), (0.0, 1.0));
    }

    #[test]
    fn heat_legend_converts() {
        let (lo, hi) = Indicator::HeatIsland.legend(TemperatureUnit::Fahrenheit);
        assert_eq!(lo, "77.0°F");
        assert_eq!(hi, "113.0°F");
    }

    #[test]
    fn next_cycles_through_all() {
        let mut ind = Indicator::Vegetation;
        for expected in [
            Indicator::HeatIsland,
            Indicator::AerosolDepth,
            Indicator::Population,
            Indicator::Vegetation,
        ] {
            ind = ind.next();
            assert_eq!(ind, expected);
        }
    }
}
