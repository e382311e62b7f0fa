//! Severity classification for display badges.
//!
//! Maps a raw reading to one of three concern buckets using fixed
//! per-indicator thresholds. Classification feeds color and badge
//! selection only — it never touches numeric computation.

use serde::{Deserialize, Serialize};

use crate::indicator::Indicator;

/// Vegetation below this is high concern.
pub const VEGETATION_HIGH_BELOW: f64 = 0.25;
/// Vegetation below this (and above the high cutoff) is medium concern.
pub const VEGETATION_MEDIUM_BELOW: f64 = 0.35;
/// Heat island above this is high concern, °C.
pub const HEAT_HIGH_ABOVE: f64 = 8.0;
/// Heat island above this (and below the high cutoff) is medium concern, °C.
pub const HEAT_MEDIUM_ABOVE: f64 = 7.0;
/// Air exposure above this is high concern.
pub const AIR_HIGH_ABOVE: f64 = 75.0;
/// Air exposure above this (and below the high cutoff) is medium concern.
pub const AIR_MEDIUM_ABOVE: f64 = 65.0;

/// Concern bucket for a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low-concern"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high-concern"),
        }
    }
}

/// Classify a raw reading into a concern bucket. Boundaries are exclusive:
/// a vegetation index of exactly 0.25 is medium, not high. Population has
/// no defined thresholds and always classifies low.
pub fn classify(indicator: Indicator, value: f64) -> Severity {
    match indicator {
        Indicator::Vegetation => {
            if value < VEGETATION_HIGH_BELOW {
                Severity::High
            } else if value < VEGETATION_MEDIUM_BELOW {
                Severity::Medium
            } else {
                Severity::Low
            }
        }
        Indicator::HeatIsland => {
            if value > HEAT_HIGH_ABOVE {
                Severity::High
            } else if value > HEAT_MEDIUM_ABOVE {
                Severity::Medium
            } else {
                Severity::Low
            }
        }
        Indicator::AerosolDepth => {
            if value > AIR_HIGH_ABOVE {
                Severity::High
            } else if value > AIR_MEDIUM_ABOVE {
                Severity::Medium
            } else {
                Severity::Low
            }
        }
        Indicator::Population => Severity::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vegetation_buckets() {
        assert_eq!(classify(Indicator::Vegetation, 0.20), Severity::High);
        assert_eq!(classify(Indicator::Vegetation, 0.30), Severity::Medium);
        assert_eq!(classify(Indicator::Vegetation, 0.40), Severity::Low);
    }

    #[test]
    fn vegetation_boundaries_exclusive() {
        assert_eq!(classify(Indicator::Vegetation, 0.25), Severity::Medium);
        assert_eq!(classify(Indicator::Vegetation, 0.35), Severity::Low);
    }

    #[test]
    fn heat_island_buckets() {
        assert_eq!(classify(Indicator::HeatIsland, 8.5), Severity::High);
        assert_eq!(classify(Indicator::HeatIsland, 7.5), Severity::Medium);
        assert_eq!(classify(Indicator::HeatIsland, 6.5), Severity::Low);
        assert_eq!(classify(Indicator::HeatIsland, 8.0), Severity::Medium);
        assert_eq!(classify(Indicator::HeatIsland, 7.0), Severity::Low);
    }

    #[test]
    fn air_exposure_buckets() {
        assert_eq!(classify(Indicator::AerosolDepth, 78.0), Severity::High);
        assert_eq!(classify(Indicator::AerosolDepth, 70.0), Severity::Medium);
        assert_eq!(classify(Indicator::AerosolDepth, 60.0), Severity::Low);
    }

    #[test]
    fn population_always_low() {
        assert_eq!(classify(Indicator::Population, 1_000_000.0), Severity::Low);
    }

    #[test]
    fn display_labels() {
        assert_eq!(Severity::High.to_string(), "high-concern");
        assert_eq!(Severity::Medium.to_string(), "medium");
        assert_eq!(Severity::Low.to_string(), "low-concern");
    }
}
